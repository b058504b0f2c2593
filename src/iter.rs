use core::{cmp::Ordering, fmt, iter::FusedIterator, mem, slice};

use crate::CircularBuffer;

/// Shared front-to-back iterator over a [`CircularBuffer`]. Walks the two contiguous runs
/// of the ring one after the other.
pub struct Iter<'a, T> {
    i1: slice::Iter<'a, T>,
    i2: slice::Iter<'a, T>,
}

pub struct IterMut<'a, T> {
    i1: slice::IterMut<'a, T>,
    i2: slice::IterMut<'a, T>,
}

/// Owning iterator, popping from either end of the buffer it consumed.
#[derive(Clone, Debug)]
pub struct IntoIter<T>(CircularBuffer<T>);

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(i1: slice::Iter<'a, T>, i2: slice::Iter<'a, T>) -> Self {
        Self { i1, i2 }
    }
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub(crate) fn new(i1: slice::IterMut<'a, T>, i2: slice::IterMut<'a, T>) -> Self {
        Self { i1, i2 }
    }

    #[inline]
    pub fn as_iter(&self) -> Iter<'_, T> {
        Iter { i1: self.i1.as_slice().iter(), i2: self.i2.as_slice().iter() }
    }
}

impl<T> IntoIter<T> {
    #[inline]
    pub(crate) fn new(buf: CircularBuffer<T>) -> Self {
        Self(buf)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self.i1.next() {
            Some(t) => Some(t),
            None => {
                mem::swap(&mut self.i1, &mut self.i2);
                self.i1.next()
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let len1 = self.i1.len();
        if n < len1 {
            return self.i1.nth(n);
        }
        self.i1 = self.i2.clone();
        self.i2 = Default::default();
        self.i1.nth(n - len1)
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }

    #[inline]
    fn fold<B, F>(self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        let accum = self.i1.fold(init, &mut f);
        self.i2.fold(accum, f)
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }

    #[inline]
    fn max_by<F>(self, mut compare: F) -> Option<Self::Item>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        let (m1, m2) = match (self.i1.max_by(&mut compare), self.i2.max_by(&mut compare)) {
            (None, None) => return None,
            (None, Some(max)) | (Some(max), None) => return Some(max),
            (Some(m1), Some(m2)) => (m1, m2),
        };
        match compare(&m1, &m2) {
            Ordering::Greater => Some(m1),
            _ => Some(m2),
        }
    }

    #[inline]
    fn position<P>(&mut self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(Self::Item) -> bool,
    {
        let len1 = self.i1.len();
        if let Some(i) = self.i1.position(&mut predicate) {
            return Some(i);
        }
        mem::swap(&mut self.i1, &mut self.i2);
        self.i1.position(predicate).map(|i| i + len1)
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.i2.next_back() {
            Some(t) => Some(t),
            None => {
                mem::swap(&mut self.i1, &mut self.i2);
                self.i2.next_back()
            }
        }
    }

    #[inline]
    fn rfold<B, F>(self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        let accum = self.i2.rfold(init, &mut f);
        self.i1.rfold(accum, f)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.i1.len() + self.i2.len()
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self { i1: self.i1.clone(), i2: self.i2.clone() }
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.i1.as_slice()).field(&self.i2.as_slice()).finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self.i1.next() {
            Some(t) => Some(t),
            None => {
                mem::swap(&mut self.i1, &mut self.i2);
                self.i1.next()
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }

    #[inline]
    fn fold<B, F>(self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        let accum = self.i1.fold(init, &mut f);
        self.i2.fold(accum, f)
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }

    #[inline]
    fn max_by<F>(self, mut compare: F) -> Option<Self::Item>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        let (m1, m2) = match (self.i1.max_by(&mut compare), self.i2.max_by(&mut compare)) {
            (None, None) => return None,
            (None, Some(max)) | (Some(max), None) => return Some(max),
            (Some(m1), Some(m2)) => (m1, m2),
        };
        match compare(&m1, &m2) {
            Ordering::Greater => Some(m1),
            _ => Some(m2),
        }
    }

    #[inline]
    fn position<P>(&mut self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(Self::Item) -> bool,
    {
        let len1 = self.i1.len();
        if let Some(i) = self.i1.position(&mut predicate) {
            return Some(i);
        }
        mem::swap(&mut self.i1, &mut self.i2);
        self.i1.position(predicate).map(|i| i + len1)
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.i2.next_back() {
            Some(t) => Some(t),
            None => {
                mem::swap(&mut self.i1, &mut self.i2);
                self.i2.next_back()
            }
        }
    }

    #[inline]
    fn rfold<B, F>(self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        let accum = self.i2.rfold(init, &mut f);
        self.i1.rfold(accum, f)
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.i1.len() + self.i2.len()
    }
}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

impl<'a, T: fmt::Debug> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.i1.as_slice()).field(&self.i2.as_slice()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}
