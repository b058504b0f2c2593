//! A growable ring buffer with random access, O(1) pushes and pops at both ends, and
//! cursors that address elements by logical index.
//!
//! ```
//! use circular_buffer::CircularBuffer;
//!
//! let mut buf = CircularBuffer::from([10, 20, 30]);
//! buf.insert(1, 99);
//! assert_eq!(buf, [10, 99, 20, 30]);
//! assert_eq!(buf.erase(0), Some(10));
//! assert_eq!(buf, [99, 20, 30]);
//! ```

mod cursor;
mod error;
mod iter;

pub use cursor::{Cursor, CursorMut, RevCursor};
pub use error::TryReserveError;
pub use iter::{IntoIter, Iter, IterMut};

use std::alloc::{self, Layout};

use core::{
    cmp::Ordering,
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem::{self, ManuallyDrop, MaybeUninit},
    ops::{Bound, Index, IndexMut, Range, RangeBounds},
    ptr::{self, NonNull},
    slice,
};

/// A double-ended queue stored in a single wrap-around allocation.
///
/// Logical index `i` lives in physical slot `(head + i) % capacity`. One slot is always
/// kept free once anything has been allocated, so `len() < capacity()` whenever
/// `capacity() > 0`.
pub struct CircularBuffer<T> {
    buf: NonNull<T>,
    cap: usize,
    head: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T> CircularBuffer<T> {
    #[inline]
    pub const fn new() -> Self {
        Self { buf: NonNull::dangling(), cap: 0, head: 0, len: 0, _marker: PhantomData }
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        let mut this = Self::new();
        this.reserve(cap);
        this
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots, including the one slot that is never occupied.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    const fn usable_capacity(&self) -> usize {
        self.cap.saturating_sub(1)
    }

    // this will never panic, as self.cap >= self.len is guaranteed.
    #[inline]
    pub const fn is_contiguous(&self) -> bool {
        self.head <= self.cap - self.len
    }

    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let ptr = self.buf.as_ptr();
        if self.is_contiguous() {
            let slice = unsafe { slice::from_raw_parts(ptr.add(self.head), self.len) };
            (slice, &[])
        } else {
            let cap = self.cap;
            let tail = self.head + self.len - cap;
            let slice1 = unsafe { slice::from_raw_parts(ptr.add(self.head), cap - self.head) };
            let slice2 = unsafe { slice::from_raw_parts(ptr, tail) };
            (slice1, slice2)
        }
    }

    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let ptr = self.buf.as_ptr();
        if self.is_contiguous() {
            let slice = unsafe { slice::from_raw_parts_mut(ptr.add(self.head), self.len) };
            (slice, &mut [])
        } else {
            let cap = self.cap;
            let tail = self.head + self.len - cap;
            let slice1 = unsafe { slice::from_raw_parts_mut(ptr.add(self.head), cap - self.head) };
            let slice2 = unsafe { slice::from_raw_parts_mut(ptr, tail) };
            (slice1, slice2)
        }
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|idx| self.get(idx))
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len.checked_sub(1) {
            Some(idx) => self.get_mut(idx),
            None => None,
        }
    }

    /// Maps a logical index to its physical slot.
    ///
    /// Note that idx must be in the range of [0..self.cap) for this to work properly
    #[inline]
    fn wrap_idx(&self, idx: usize) -> usize {
        if idx < self.cap - self.head {
            self.head + idx
        } else {
            self.head.wrapping_add(idx).wrapping_sub(self.cap)
        }
    }

    /// # Safety:
    /// idx must be smaller than self.cap
    #[inline]
    unsafe fn ptr_at_idx(&self, idx: usize) -> *mut T {
        self.buf.as_ptr().add(self.wrap_idx(idx))
    }

    /// Physical slot one past the back element. Only meaningful while `len < cap`.
    #[inline]
    fn tail(&self) -> usize {
        self.wrap_idx(self.len)
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&T> {
        if idx >= self.len {
            None
        } else {
            Some(unsafe { self.get_unchecked(idx) })
        }
    }

    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        if idx >= self.len {
            None
        } else {
            Some(unsafe { self.get_unchecked_mut(idx) })
        }
    }

    /// # Safety
    /// Callers must ensure that `idx < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, idx: usize) -> &T {
        debug_assert!(idx < self.len, "index {idx} out of bounds for length {}", self.len);
        &*self.ptr_at_idx(idx)
    }

    /// # Safety
    /// Callers must ensure that `idx < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, idx: usize) -> &mut T {
        debug_assert!(idx < self.len, "index {idx} out of bounds for length {}", self.len);
        &mut *self.ptr_at_idx(idx)
    }

    /// Reserves room for at least `n` elements in total.
    ///
    /// Does nothing if the buffer can already hold `n` elements. Otherwise the buffer is
    /// reallocated to exactly `n + 1` slots.
    ///
    /// # Panics
    /// Panics if the new capacity overflows.
    pub fn reserve(&mut self, n: usize) {
        handle_reserve(self.reserve_inner(n));
    }

    /// Like [`reserve`](Self::reserve), but reports failure instead of panicking or
    /// aborting. On error the buffer is unchanged.
    pub fn try_reserve(&mut self, n: usize) -> Result<(), TryReserveError> {
        self.reserve_inner(n).map_err(|err| {
            tracing::debug!(requested = n, capacity = self.cap, error = %err, "reservation failed");
            err
        })
    }

    fn reserve_inner(&mut self, n: usize) -> Result<(), TryReserveError> {
        if n <= self.usable_capacity() {
            return Ok(());
        }
        let new_cap = n.checked_add(1).ok_or(TryReserveError::CapacityOverflow)?;
        self.grow_to(new_cap)
    }

    #[inline]
    fn reserve_for_push(&mut self) {
        if self.len + 1 >= self.cap {
            handle_reserve(self.grow_for_push());
        }
    }

    #[cold]
    fn grow_for_push(&mut self) -> Result<(), TryReserveError> {
        let new_cap = if self.cap == 0 {
            2
        } else {
            // doubles the usable capacity, cap - 1
            (self.cap - 1)
                .checked_mul(2)
                .and_then(|c| c.checked_add(1))
                .ok_or(TryReserveError::CapacityOverflow)?
        };
        self.grow_to(new_cap)
    }

    /// Moves every element into a fresh block of `new_cap` slots, front first, so that
    /// `head` becomes 0. The block is allocated before anything is touched, so on error
    /// the buffer is left as it was.
    #[cold]
    fn grow_to(&mut self, new_cap: usize) -> Result<(), TryReserveError> {
        debug_assert!(new_cap > self.cap);
        let layout = Self::array_layout(new_cap)?;
        let new_buf = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: the layout has a non-zero size
            let ptr = unsafe { alloc::alloc(layout) };
            NonNull::new(ptr.cast::<T>()).ok_or(TryReserveError::AllocError { layout })?
        };

        tracing::trace!(
            old_capacity = self.cap,
            new_capacity = new_cap,
            len = self.len,
            "growing circular buffer"
        );

        // from here on nothing can unwind: the elements are moved bitwise into the new block
        // and the old block is released without running any destructors.
        let (front, back) = self.as_slices();
        let (front_ptr, front_len) = (front.as_ptr(), front.len());
        let (back_ptr, back_len) = (back.as_ptr(), back.len());
        unsafe {
            ptr::copy_nonoverlapping(front_ptr, new_buf.as_ptr(), front_len);
            ptr::copy_nonoverlapping(back_ptr, new_buf.as_ptr().add(front_len), back_len);
            self.release();
        }

        self.buf = new_buf;
        self.cap = new_cap;
        self.head = 0;
        Ok(())
    }

    /// Frees the current block without dropping any element.
    ///
    /// # Safety
    /// The elements must already have been moved out or dropped, and `self.buf` must not
    /// be used again before it's replaced.
    unsafe fn release(&mut self) {
        let layout = Self::array_layout_unchecked(self.cap);
        if layout.size() != 0 {
            alloc::dealloc(self.buf.as_ptr().cast(), layout);
        }
    }

    #[inline]
    fn array_layout(cap: usize) -> Result<Layout, TryReserveError> {
        Layout::array::<T>(cap).map_err(|_| TryReserveError::CapacityOverflow)
    }

    #[inline]
    unsafe fn array_layout_unchecked(cap: usize) -> Layout {
        Layout::from_size_align_unchecked(mem::size_of::<T>() * cap, mem::align_of::<T>())
    }

    #[inline]
    pub fn push_back(&mut self, val: T) {
        self.reserve_for_push();

        // SAFETY: reserve_for_push() leaves at least one free slot, and self.tail is free
        unsafe { self.buf.as_ptr().add(self.tail()).write(val) };
        self.len += 1;
    }

    #[inline]
    pub fn push_front(&mut self, val: T) {
        self.reserve_for_push();

        let new_head = self.head.checked_sub(1).unwrap_or(self.cap - 1);

        // SAFETY: due to the call to reserve_for_push() there's guaranteed to be space before self.head
        unsafe { self.buf.as_ptr().add(new_head).write(val) };
        self.head = new_head;
        self.len += 1;
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        // We wrap the read value in a ManuallyDrop just in case something unwinds before we
        // updated everything
        let val = ManuallyDrop::new(unsafe { self.buf.as_ptr().add(self.head).read() });
        self.len -= 1;
        self.head = if self.head == self.cap - 1 { 0 } else { self.head + 1 };

        Some(ManuallyDrop::into_inner(val))
    }

    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        self.len -= 1;
        Some(unsafe { self.ptr_at_idx(self.len).read() })
    }

    /// Exchanges the whole contents of two buffers without touching any element.
    #[inline]
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        if i >= self.len || j >= self.len {
            panic!(
                "swap indices out of bounds: tried to swap {i} and {j} on a circular buffer of length {}",
                self.len
            );
        }
        unsafe { self.swap_unchecked(i, j) }
    }

    /// # Safety
    /// `i` and `j` must be smaller than `self.len()`
    #[inline]
    unsafe fn swap_unchecked(&mut self, i: usize, j: usize) {
        ptr::swap(self.ptr_at_idx(i), self.ptr_at_idx(j))
    }

    /// Inserts `val` so that it ends up at logical index `idx`, and returns `idx`.
    ///
    /// The new element enters at whichever end is strictly closer to `idx` (the back on a
    /// tie) and is swapped into place, so at most `min(idx, len - idx)` elements move.
    /// References into the moved stretch between `idx` and that end are invalidated.
    ///
    /// # Panics
    /// Panics if `idx > len`.
    pub fn insert(&mut self, idx: usize, val: T) -> usize {
        if idx > self.len {
            panic!("tried to insert at index {idx} into a circular buffer of length {}", self.len);
        }
        if idx < self.len - idx {
            self.push_front(val);
            for i in 0..idx {
                unsafe { self.swap_unchecked(i, i + 1) };
            }
        } else {
            self.push_back(val);
            for i in (idx + 1..self.len).rev() {
                unsafe { self.swap_unchecked(i, i - 1) };
            }
        }
        idx
    }

    /// Removes and returns the element at logical index `idx`, or `None` if out of bounds.
    ///
    /// The element is swapped out through the nearer end and popped there.
    pub fn erase(&mut self, idx: usize) -> Option<T> {
        if idx >= self.len {
            return None;
        }
        if idx < self.len - idx {
            for i in (0..idx).rev() {
                unsafe { self.swap_unchecked(i + 1, i) };
            }
            self.pop_front()
        } else {
            for i in idx..self.len - 1 {
                unsafe { self.swap_unchecked(i, i + 1) };
            }
            self.pop_back()
        }
    }

    /// Removes the elements in the logical range `range`, keeping the order of the rest.
    ///
    /// Whichever run outside the range is shorter is swapped across the gap, then the
    /// vacated end is popped. If an element destructor panics, the buffer stays valid but
    /// its contents are unspecified.
    ///
    /// # Panics
    /// Panics if the range is decreasing or extends past `len`.
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) {
        let Range { start: first, end: last } = self.slice_range(range);
        let count = last - first;
        if count == 0 {
            return;
        }

        if first < self.len - last {
            for i in (0..first).rev() {
                unsafe { self.swap_unchecked(i, i + count) };
            }
            for _ in 0..count {
                self.pop_front();
            }
        } else {
            for i in last..self.len {
                unsafe { self.swap_unchecked(i, i - count) };
            }
            for _ in 0..count {
                self.pop_back();
            }
        }
    }

    fn slice_range<R: RangeBounds<usize>>(&self, range: R) -> Range<usize> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.checked_add(1).expect("range start overflow"),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.checked_add(1).expect("range end overflow"),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };
        if start > end {
            panic!("range starts at {start} but ends at {end}");
        }
        if end > self.len {
            panic!("range end {end} out of bounds for a circular buffer of length {}", self.len);
        }
        start..end
    }

    fn slice_ranges<R: RangeBounds<usize>>(&self, r: R) -> (Range<usize>, Range<usize>) {
        let r = self.slice_range(r);
        let a_len = (self.cap - self.head).min(self.len);
        if r.end <= a_len {
            (r, 0..0)
        } else if r.start >= a_len {
            (0..0, r.start - a_len..r.end - a_len)
        } else {
            (r.start..a_len, 0..r.end - a_len)
        }
    }

    #[inline]
    pub fn range<R: RangeBounds<usize>>(&self, r: R) -> Iter<'_, T> {
        let (a_range, b_range) = self.slice_ranges(r);
        let (a, b) = self.as_slices();
        Iter::new(a[a_range].iter(), b[b_range].iter())
    }

    #[inline]
    pub fn range_mut<R: RangeBounds<usize>>(&mut self, r: R) -> IterMut<'_, T> {
        let (a_range, b_range) = self.slice_ranges(r);
        let (a, b) = self.as_mut_slices();
        IterMut::new(a[a_range].iter_mut(), b[b_range].iter_mut())
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        let (a, b) = self.as_slices();
        Iter::new(a.iter(), b.iter())
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (a, b) = self.as_mut_slices();
        IterMut::new(a.iter_mut(), b.iter_mut())
    }

    /// Cursor at the front element.
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, 0)
    }

    /// Cursor one past the back element.
    #[inline]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.len as isize)
    }

    #[inline]
    pub fn cursor_at(&self, idx: usize) -> Cursor<'_, T> {
        Cursor::new(self, idx as isize)
    }

    #[inline]
    pub fn rbegin(&self) -> RevCursor<'_, T> {
        RevCursor::new(self.end())
    }

    #[inline]
    pub fn rend(&self) -> RevCursor<'_, T> {
        RevCursor::new(self.begin())
    }

    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, 0)
    }

    #[inline]
    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len as isize;
        CursorMut::new(self, len)
    }

    #[inline]
    pub fn cursor_mut_at(&mut self, idx: usize) -> CursorMut<'_, T> {
        CursorMut::new(self, idx as isize)
    }

    /// Rotates the storage so that the front element sits in slot 0 and returns the
    /// elements as one slice.
    pub fn make_contiguous(&mut self) -> &mut [T] {
        if self.head != 0 && !self.is_empty() {
            // SAFETY: the whole block is viewed as possibly-uninitialized slots, which may
            // be moved around freely
            let slots = unsafe {
                slice::from_raw_parts_mut(self.buf.as_ptr().cast::<MaybeUninit<T>>(), self.cap)
            };
            slots.rotate_left(self.head);
        }
        self.head = 0;
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        if !mem::needs_drop::<T>() {
            self.len = len;
            return;
        }
        struct Dropper<T>(*mut [T]);
        impl<T> Drop for Dropper<T> {
            fn drop(&mut self) {
                unsafe { ptr::drop_in_place(self.0) }
            }
        }

        let (a, b) = self.as_mut_slices();
        if len <= a.len() {
            let a = &mut a[len..] as *mut [T];
            let b = b as *mut [T];
            self.len = len;
            let _dropper = Dropper(b);
            unsafe { ptr::drop_in_place(a) }
        } else {
            let b = &mut b[len - a.len()..] as *mut [T];
            self.len = len;
            unsafe { ptr::drop_in_place(b) }
        }
    }

    /// Drops every element. The allocation is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
        self.head = 0;
    }

    #[inline]
    pub fn contains(&self, t: &T) -> bool
    where
        T: PartialEq,
    {
        let (a, b) = self.as_slices();
        a.contains(t) || b.contains(t)
    }

    /// Deep-copies the buffer with a fallible element copy.
    ///
    /// The copy is built in a separate buffer. If `f` fails, the elements copied so far are
    /// dropped back to front and the error is returned; `self` is never modified.
    pub fn try_clone_with<E, F>(&self, mut f: F) -> Result<Self, E>
    where
        F: FnMut(&T) -> Result<T, E>,
    {
        let mut copy = Self::with_capacity(self.len);
        for val in self.iter() {
            match f(val) {
                Ok(val) => copy.push_back(val),
                Err(err) => {
                    while copy.pop_back().is_some() {}
                    return Err(err);
                }
            }
        }
        Ok(copy)
    }
}

#[inline]
fn handle_reserve(result: Result<(), TryReserveError>) {
    match result {
        Ok(()) => {}
        Err(TryReserveError::CapacityOverflow) => panic!("capacity overflow"),
        Err(TryReserveError::AllocError { layout }) => alloc::handle_alloc_error(layout),
    }
}

impl<T> Drop for CircularBuffer<T> {
    fn drop(&mut self) {
        struct DeallocGuard {
            ptr: NonNull<u8>,
            layout: Layout,
        }

        impl Drop for DeallocGuard {
            fn drop(&mut self) {
                if self.layout.size() != 0 {
                    unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) };
                }
            }
        }

        let layout = unsafe { Self::array_layout_unchecked(self.cap) };

        let _guard = DeallocGuard { ptr: self.buf.cast(), layout };

        if mem::needs_drop::<T>() {
            struct Dropper<'a, T>(&'a mut [T]);

            impl<'a, T> Drop for Dropper<'a, T> {
                fn drop(&mut self) {
                    unsafe { ptr::drop_in_place(self.0) }
                }
            }

            let (a, b) = self.as_mut_slices();
            let _back_dropper = Dropper(b);
            unsafe { ptr::drop_in_place(a) };
        }
    }
}

impl<T> From<Vec<T>> for CircularBuffer<T> {
    fn from(v: Vec<T>) -> Self {
        let mut this = Self::with_capacity(v.len());
        this.extend(v);
        this
    }
}

impl<T, const N: usize> From<[T; N]> for CircularBuffer<T> {
    #[inline]
    fn from(arr: [T; N]) -> Self {
        let mut this = Self::with_capacity(N);
        this.extend(arr);
        this
    }
}

impl<T> From<CircularBuffer<T>> for Vec<T> {
    fn from(buf: CircularBuffer<T>) -> Self {
        let mut v = Vec::with_capacity(buf.len());
        v.extend(buf);
        v
    }
}

impl<T> Extend<T> for CircularBuffer<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(self.len.saturating_add(iter.size_hint().0));
        iter.for_each(|val| self.push_back(val));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for CircularBuffer<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T> FromIterator<T> for CircularBuffer<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularBuffer<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> Clone for CircularBuffer<T> {
    /// If `T::clone` panics, the elements cloned so far are dropped and `self` is left
    /// untouched.
    #[inline]
    fn clone(&self) -> Self {
        match self.try_clone_with(|val| Ok::<T, Infallible>(val.clone())) {
            Ok(copy) => copy,
            Err(never) => match never {},
        }
    }

    /// Builds the copy first and swaps it in, so a panicking `T::clone` leaves `self` as
    /// it was.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap_with(&mut copy);
    }
}

impl<T> Default for CircularBuffer<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq<U>, U> PartialEq<CircularBuffer<U>> for CircularBuffer<T> {
    fn eq(&self, other: &CircularBuffer<U>) -> bool {
        if self.len != other.len {
            return false;
        }
        let (a, b) = self.as_slices();
        let (c, d) = other.as_slices();
        match a.len().cmp(&c.len()) {
            Ordering::Equal => a == c && b == d,
            Ordering::Less => {
                let front = a.len();
                let mid = c.len() - front;
                let (c_front, c_mid) = c.split_at(front);
                let (b_mid, b_back) = b.split_at(mid);
                a == c_front && b_mid == c_mid && b_back == d
            }
            Ordering::Greater => {
                let front = c.len();
                let mid = a.len() - front;
                let (a_front, a_mid) = a.split_at(front);
                let (d_mid, d_back) = d.split_at(mid);
                a_front == c && a_mid == d_mid && b == d_back
            }
        }
    }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for CircularBuffer<T> {
    #[inline]
    fn eq(&self, other: &[U]) -> bool {
        if self.len != other.len() {
            return false;
        }
        let (a, b) = self.as_slices();
        let (c, d) = other.split_at(a.len());
        a == c && b == d
    }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for CircularBuffer<T> {
    #[inline]
    fn eq(&self, other: &&[U]) -> bool {
        *self == **other
    }
}

impl<T: PartialEq<U>, U> PartialEq<Vec<U>> for CircularBuffer<T> {
    #[inline]
    fn eq(&self, other: &Vec<U>) -> bool {
        *self == *other.as_slice()
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for CircularBuffer<T> {
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        *self == *other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for CircularBuffer<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for CircularBuffer<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Eq> Eq for CircularBuffer<T> {}

impl<T: Hash> Hash for CircularBuffer<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|t| t.hash(state));
    }
}

impl<T> Index<usize> for CircularBuffer<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("Out of bounds access")
    }
}

impl<T> IndexMut<usize> for CircularBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).expect("Out of bounds access")
    }
}

unsafe impl<T: Send> Send for CircularBuffer<T> {}

unsafe impl<T: Sync> Sync for CircularBuffer<T> {}

impl<T> IntoIterator for CircularBuffer<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a CircularBuffer<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut CircularBuffer<T> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Buffer whose live run starts at `head` in a block of `cap` slots.
    fn wrapped(cap: usize, head: usize, vals: &[i32]) -> CircularBuffer<i32> {
        let mut buf = CircularBuffer::with_capacity(cap - 1);
        assert_eq!(buf.capacity(), cap);
        for _ in 0..head {
            buf.push_back(0);
        }
        for _ in 0..head {
            buf.pop_front();
        }
        buf.extend(vals);
        assert_eq!(buf.capacity(), cap);
        assert_eq!(buf.head, head);
        buf
    }

    #[test]
    fn growth_doubles_usable_capacity() {
        let mut buf = CircularBuffer::new();
        let mut caps = vec![buf.capacity()];
        for i in 0..16 {
            buf.push_back(i);
            if *caps.last().unwrap() != buf.capacity() {
                caps.push(buf.capacity());
            }
        }
        assert_eq!(caps, [0, 2, 3, 5, 9, 17]);
        assert!(buf.iter().copied().eq(0..16));
    }

    #[test]
    fn push_front_grows_the_same_way() {
        let mut buf = CircularBuffer::new();
        for i in 0..5 {
            buf.push_front(i);
        }
        assert_eq!(buf.capacity(), 9);
        assert_eq!(buf, [4, 3, 2, 1, 0]);
    }

    #[test]
    fn growth_unwraps_into_slot_zero() {
        let mut buf = wrapped(5, 3, &[1, 2, 3, 4]);
        assert!(!buf.is_contiguous());
        buf.push_back(5);
        assert_eq!(buf.capacity(), 9);
        assert_eq!(buf.head, 0);
        assert_eq!(buf.as_slices(), (&[1, 2, 3, 4, 5][..], &[][..]));
    }

    #[test]
    fn physical_slot_wraps() {
        let buf = wrapped(5, 3, &[1, 2, 3, 4]);
        assert_eq!(buf.wrap_idx(0), 3);
        assert_eq!(buf.wrap_idx(1), 4);
        assert_eq!(buf.wrap_idx(2), 0);
        assert_eq!(buf.as_slices(), (&[1, 2][..], &[3, 4][..]));
        assert_eq!(buf[3], 4);
    }

    #[test]
    fn reserve_sets_exact_capacity() {
        let mut buf: CircularBuffer<u8> = CircularBuffer::new();
        buf.reserve(0);
        assert_eq!(buf.capacity(), 0);
        buf.reserve(10);
        assert_eq!(buf.capacity(), 11);
        buf.reserve(10);
        buf.reserve(4);
        assert_eq!(buf.capacity(), 11);
        for i in 0..10 {
            buf.push_back(i);
        }
        assert_eq!(buf.capacity(), 11);
        buf.push_back(10);
        assert_eq!(buf.capacity(), 21);
    }

    #[test]
    fn try_reserve_overflow_leaves_buffer_alone() {
        let mut buf = CircularBuffer::from([1u64, 2, 3]);
        let cap = buf.capacity();
        assert_eq!(buf.try_reserve(usize::MAX), Err(TryReserveError::CapacityOverflow));
        assert_eq!(buf.try_reserve(usize::MAX / 2), Err(TryReserveError::CapacityOverflow));
        assert_eq!(buf.capacity(), cap);
        assert_eq!(buf, [1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn reserve_overflow_panics() {
        let mut buf: CircularBuffer<u32> = CircularBuffer::new();
        buf.reserve(usize::MAX);
    }

    #[test]
    fn make_contiguous_on_wrapped_buffer() {
        let mut buf = wrapped(9, 6, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(buf.make_contiguous(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(buf.head, 0);
        buf.push_front(0);
        assert_eq!(buf, [0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn truncate_across_the_wrap() {
        let mut buf = wrapped(9, 6, &[1, 2, 3, 4, 5, 6]);
        buf.truncate(4);
        assert_eq!(buf, [1, 2, 3, 4]);
        buf.truncate(2);
        assert_eq!(buf, [1, 2]);
        buf.truncate(5);
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn clear_resets_head_and_keeps_capacity() {
        let mut buf = wrapped(5, 2, &[7, 8, 9]);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.head, 0);
        assert_eq!(buf.capacity(), 5);
    }

    #[test]
    fn insert_picks_the_shorter_side() {
        let mut buf = wrapped(9, 7, &[1, 2, 3, 4, 5, 6]);
        buf.insert(1, 10);
        // one element before, five after: growth happened at the front
        assert_eq!(buf.head, 6);
        assert_eq!(buf, [1, 10, 2, 3, 4, 5, 6]);

        let mut buf = wrapped(9, 7, &[1, 2, 3, 4]);
        buf.insert(2, 10);
        // tie goes to the back
        assert_eq!(buf.head, 7);
        assert_eq!(buf, [1, 2, 10, 3, 4]);
    }

    #[test]
    fn erase_range_front_side_moves_head() {
        let mut buf = wrapped(9, 5, &[1, 2, 3, 4, 5, 6, 7]);
        buf.erase_range(1..3);
        assert_eq!(buf.head, 7);
        assert_eq!(buf, [1, 4, 5, 6, 7]);
        buf.erase_range(2..);
        assert_eq!(buf.head, 7);
        assert_eq!(buf, [1, 4]);
    }

    #[test]
    fn zero_sized_elements() {
        let mut buf = CircularBuffer::new();
        for _ in 0..100 {
            buf.push_back(());
        }
        assert_eq!(buf.len(), 100);
        buf.insert(50, ());
        assert_eq!(buf.erase(3), Some(()));
        buf.erase_range(..10);
        assert_eq!(buf.len(), 90);
        assert_eq!(buf.iter().count(), 90);
    }
}
