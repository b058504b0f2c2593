//! Random-access positions into a [`CircularBuffer`].
//!
//! A cursor stores a *logical* index, never a physical slot. The slot is computed from the
//! buffer's current `head` and capacity each time the cursor is read, so a [`CursorMut`]
//! stays meaningful across the insertions, removals and reallocations it performs itself.
//! The index may point before the front or past the back; such cursors compare and subtract
//! normally but read as `None`.

use core::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Index, Sub, SubAssign},
    ptr,
};

use crate::{CircularBuffer, Iter};

pub struct Cursor<'a, T> {
    buf: &'a CircularBuffer<T>,
    index: isize,
}

impl<'a, T> Cursor<'a, T> {
    #[inline]
    pub(crate) fn new(buf: &'a CircularBuffer<T>, index: isize) -> Self {
        Self { buf, index }
    }

    #[inline]
    pub fn index(&self) -> isize {
        self.index
    }

    #[inline]
    pub fn buffer(&self) -> &'a CircularBuffer<T> {
        self.buf
    }

    /// The element under the cursor, or `None` if the cursor is outside `0..len`.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        usize::try_from(self.index).ok().and_then(|idx| self.buf.get(idx))
    }

    /// # Safety
    /// The cursor must be inside `0..len`.
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &'a T {
        self.buf.get_unchecked(self.index as usize)
    }

    /// The element `k` positions away, `None` if that is outside the buffer.
    #[inline]
    pub fn peek(&self, k: isize) -> Option<&'a T> {
        (*self + k).get()
    }

    #[inline]
    pub fn move_next(&mut self) {
        self.index += 1;
    }

    #[inline]
    pub fn move_prev(&mut self) {
        self.index -= 1;
    }

    /// Iterates over `[self, end)`, clamped to the live elements.
    pub fn iter_to(self, end: Cursor<'a, T>) -> Iter<'a, T> {
        debug_assert!(self.same_buffer(&end), "cursors belong to different buffers");
        let len = self.buf.len() as isize;
        let start = self.index.clamp(0, len);
        let end = end.index.clamp(start, len);
        self.buf.range(start as usize..end as usize)
    }

    #[inline]
    fn same_buffer(&self, other: &Self) -> bool {
        ptr::eq(self.buf, other.buf)
    }
}

impl<T> Clone for Cursor<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same_buffer(other) && self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    /// Cursors into different buffers are unordered.
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_buffer(other).then(|| self.index.cmp(&other.index))
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, k: isize) {
        self.index += k;
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, k: isize) {
        self.index -= k;
    }
}

impl<'a, T> Add<isize> for Cursor<'a, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, k: isize) -> Self {
        self += k;
        self
    }
}

impl<'a, T> Sub<isize> for Cursor<'a, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, k: isize) -> Self {
        self -= k;
        self
    }
}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    /// Distance in logical positions. Only meaningful for cursors into the same buffer.
    #[inline]
    fn sub(self, other: Self) -> isize {
        debug_assert!(self.same_buffer(&other), "cursors belong to different buffers");
        self.index - other.index
    }
}

impl<T> Index<isize> for Cursor<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, k: isize) -> &T {
        self.peek(k).expect("Out of bounds access")
    }
}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.index).field(&self.get()).finish()
    }
}

/// A cursor with exclusive access to its buffer.
///
/// Mutations made through the cursor keep its logical index, so after
/// [`insert`](Self::insert) it sits on the new element and after [`erase`](Self::erase) on
/// the element that followed the removed one.
pub struct CursorMut<'a, T> {
    buf: &'a mut CircularBuffer<T>,
    index: isize,
}

impl<'a, T> CursorMut<'a, T> {
    #[inline]
    pub(crate) fn new(buf: &'a mut CircularBuffer<T>, index: isize) -> Self {
        Self { buf, index }
    }

    #[inline]
    pub fn index(&self) -> isize {
        self.index
    }

    #[inline]
    pub fn buffer(&self) -> &CircularBuffer<T> {
        &*self.buf
    }

    #[inline]
    fn position(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.position().and_then(|idx| self.buf.get(idx))
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self.position() {
            Some(idx) => self.buf.get_mut(idx),
            None => None,
        }
    }

    #[inline]
    pub fn move_next(&mut self) {
        self.index += 1;
    }

    #[inline]
    pub fn move_prev(&mut self) {
        self.index -= 1;
    }

    /// A shared cursor at the same position, borrowing this one.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.buf, self.index)
    }

    /// Inserts `val` before the current element. The cursor then points at `val`.
    ///
    /// # Panics
    /// Panics if the cursor is outside `0..=len`.
    pub fn insert(&mut self, val: T) {
        match self.position() {
            Some(idx) if idx <= self.buf.len() => {
                self.buf.insert(idx, val);
            }
            _ => panic!(
                "cursor at {} is outside a circular buffer of length {}",
                self.index,
                self.buf.len()
            ),
        }
    }

    /// Removes the current element. The cursor then points at its successor.
    pub fn erase(&mut self) -> Option<T> {
        self.position().and_then(|idx| self.buf.erase(idx))
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    #[inline]
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Cursor::new(cursor.buf, cursor.index)
    }
}

impl<T> AddAssign<isize> for CursorMut<'_, T> {
    #[inline]
    fn add_assign(&mut self, k: isize) {
        self.index += k;
    }
}

impl<T> SubAssign<isize> for CursorMut<'_, T> {
    #[inline]
    fn sub_assign(&mut self, k: isize) {
        self.index -= k;
    }
}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.index).field(&self.get()).finish()
    }
}

/// Reverse adapter over a [`Cursor`]: reads the element just before its base, and moves
/// the opposite way.
pub struct RevCursor<'a, T> {
    base: Cursor<'a, T>,
}

impl<'a, T> RevCursor<'a, T> {
    #[inline]
    pub fn new(base: Cursor<'a, T>) -> Self {
        Self { base }
    }

    #[inline]
    pub fn base(&self) -> Cursor<'a, T> {
        self.base
    }

    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        (self.base - 1).get()
    }

    #[inline]
    pub fn peek(&self, k: isize) -> Option<&'a T> {
        (*self + k).get()
    }

    #[inline]
    pub fn move_next(&mut self) {
        self.base.move_prev();
    }

    #[inline]
    pub fn move_prev(&mut self) {
        self.base.move_next();
    }
}

impl<T> Clone for RevCursor<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RevCursor<'_, T> {}

impl<T> PartialEq for RevCursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<T> Eq for RevCursor<'_, T> {}

impl<T> PartialOrd for RevCursor<'_, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        other.base.partial_cmp(&self.base)
    }
}

impl<T> AddAssign<isize> for RevCursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, k: isize) {
        self.base -= k;
    }
}

impl<T> SubAssign<isize> for RevCursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, k: isize) {
        self.base += k;
    }
}

impl<'a, T> Add<isize> for RevCursor<'a, T> {
    type Output = Self;

    #[inline]
    fn add(self, k: isize) -> Self {
        Self { base: self.base - k }
    }
}

impl<'a, T> Sub<isize> for RevCursor<'a, T> {
    type Output = Self;

    #[inline]
    fn sub(self, k: isize) -> Self {
        Self { base: self.base + k }
    }
}

impl<'a, T> Sub for RevCursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, other: Self) -> isize {
        other.base - self.base
    }
}

impl<T> Index<isize> for RevCursor<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, k: isize) -> &T {
        self.peek(k).expect("Out of bounds access")
    }
}

impl<T: fmt::Debug> fmt::Debug for RevCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RevCursor").field(&self.base.index).field(&self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{CircularBuffer, Cursor};

    #[test]
    fn arithmetic_only_moves_the_index() {
        let buf = CircularBuffer::from([10, 20, 30, 40]);
        let begin = buf.begin();
        let end = buf.end();
        assert_eq!(end - begin, 4);
        assert_eq!(*(begin + 2).get().unwrap(), 30);
        assert_eq!(begin[3], 40);
        assert_eq!((end - 1).get(), Some(&40));
        assert_eq!(end.get(), None);
        assert_eq!((begin - 1).get(), None);
        assert!(begin - 1 < begin);
        assert!(end > begin);

        let mut it = begin;
        it += 3;
        it -= 1;
        it.move_next();
        it.move_prev();
        assert_eq!(it.index(), 2);
        assert_eq!(it, begin + 2);
    }

    #[test]
    fn cursors_of_different_buffers_never_compare() {
        let a = CircularBuffer::from([1, 2]);
        let b = CircularBuffer::from([1, 2]);
        assert_ne!(a.begin(), b.begin());
        assert_eq!(a.begin().partial_cmp(&b.end()), None);
        assert!(!(a.begin() < b.end()));
        assert_eq!(a.begin(), a.cursor_at(0));
    }

    #[test]
    fn walk_forward_and_backward() {
        let mut buf = CircularBuffer::with_capacity(4);
        buf.extend([0, 0, 0]);
        buf.pop_front();
        buf.pop_front();
        buf.pop_front();
        buf.extend([1, 2, 3, 4]);

        let mut seen = Vec::new();
        let mut it = buf.begin();
        while it != buf.end() {
            seen.push(*it.get().unwrap());
            it.move_next();
        }
        assert_eq!(seen, [1, 2, 3, 4]);

        let mut seen = Vec::new();
        let mut it = buf.rbegin();
        while it != buf.rend() {
            seen.push(*it.get().unwrap());
            it.move_next();
        }
        assert_eq!(seen, [4, 3, 2, 1]);
    }

    #[test]
    fn reverse_cursor_arithmetic() {
        let buf = CircularBuffer::from([1, 2, 3]);
        let r = buf.rbegin();
        assert_eq!(r.get(), Some(&3));
        assert_eq!(r[2], 1);
        assert_eq!(buf.rend() - r, 3);
        assert!(r < buf.rend());
        assert_eq!((r + 1).base(), buf.end() - 1);
        assert_eq!(buf.rend().get(), None);
    }

    #[test]
    fn reverse_cursor_compound_assignment() {
        let buf = CircularBuffer::from([1, 2, 3, 4]);
        let mut r = buf.rbegin();
        r += 1;
        assert_eq!(r.get(), Some(&3));
        assert_eq!(r.base(), buf.end() - 1);
        r += 3;
        assert_eq!(r, buf.rend());
        assert_eq!(r.get(), None);
        r -= 2;
        assert_eq!(r.get(), Some(&2));
        assert_eq!(r, buf.rbegin() + 2);
    }

    #[test]
    fn iter_to_clamps() {
        let buf = CircularBuffer::from([1, 2, 3, 4, 5]);
        assert!(buf.begin().iter_to(buf.end()).copied().eq(1..=5));
        assert!((buf.begin() + 1).iter_to(buf.end() - 1).copied().eq(2..=4));
        assert!((buf.begin() - 3).iter_to(buf.end() + 3).copied().eq(1..=5));
        assert_eq!(buf.end().iter_to(buf.begin()).len(), 0);
    }

    #[test]
    fn cursor_mut_resolves_against_current_head() {
        let mut buf = CircularBuffer::from([1, 2, 3, 4, 5, 6]);
        let mut cur = buf.cursor_mut_at(1);
        // fewer elements before index 1 than after, so this pushes at the front
        cur.insert(9);
        assert_eq!(cur.get(), Some(&9));
        cur.move_next();
        assert_eq!(cur.get(), Some(&2));
        *cur.get_mut().unwrap() = 20;
        assert_eq!(cur.erase(), Some(20));
        assert_eq!(cur.get(), Some(&3));
        assert_eq!(buf, [1, 9, 3, 4, 5, 6]);
    }

    #[test]
    fn cursor_mut_survives_reallocation() {
        let mut buf = CircularBuffer::new();
        let mut cur = buf.end_mut();
        for i in 0..20 {
            cur.insert(i);
            cur.move_next();
        }
        assert_eq!(cur.index(), 20);
        cur -= 20;
        assert_eq!(cur.get(), Some(&0));
        cur += 19;
        assert_eq!(cur.get(), Some(&19));
        assert!(buf.iter().copied().eq(0..20));
    }

    #[test]
    fn cursor_mut_converts_one_way() {
        let mut buf = CircularBuffer::from([1, 2, 3]);
        let cur = buf.begin_mut();
        assert_eq!(cur.as_cursor().peek(2), Some(&3));
        let shared: Cursor<'_, i32> = cur.into();
        assert_eq!(shared.get(), Some(&1));
        assert_eq!(shared.buffer().len(), 3);
    }

    #[test]
    fn erase_out_of_range_is_none() {
        let mut buf = CircularBuffer::from([1]);
        let mut cur = buf.end_mut();
        assert_eq!(cur.erase(), None);
        cur -= 5;
        assert_eq!(cur.erase(), None);
        assert_eq!(cur.get(), None);
    }

    #[test]
    #[should_panic(expected = "outside a circular buffer")]
    fn insert_before_front_panics() {
        let mut buf = CircularBuffer::from([1]);
        let mut cur = buf.begin_mut();
        cur.move_prev();
        cur.insert(0);
    }
}
