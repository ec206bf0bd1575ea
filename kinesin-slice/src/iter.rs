//! Iterators over views

use std::iter::{Chain, FusedIterator};
use std::slice;

use crate::error::Error;
use crate::view::wrap_forward;

/// borrowing iterator over the elements of a view, in logical order
///
/// The iterator holds a shared borrow of the view, so the view cannot be
/// mutated until the iterator is dropped. Once exhausted it stays exhausted;
/// call [`CyclicView::iter`](crate::CyclicView::iter) again to start over.
pub struct Iter<'v, E> {
    /// backing buffer of the view
    buf: &'v [E],
    /// head of the view at iterator creation
    head: usize,
    /// logical index of next front element
    front: usize,
    /// logical index one past the next back element
    back: usize,
}

impl<'v, E> Iter<'v, E> {
    pub(crate) fn new(buf: &'v [E], head: usize, len: usize) -> Iter<'v, E> {
        Iter {
            buf,
            head,
            front: 0,
            back: len,
        }
    }

    /// advance the iterator, failing with [`Error::Exhausted`] at the end
    pub fn try_next(&mut self) -> Result<&'v E, Error> {
        self.next().ok_or(Error::Exhausted)
    }

    fn element(&self, index: usize) -> &'v E {
        &self.buf[wrap_forward(self.head, self.buf.len(), index)]
    }
}

impl<'v, E> Iterator for Iter<'v, E> {
    type Item = &'v E;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        } else {
            let element = self.element(self.front);
            self.front += 1;
            Some(element)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'v, E> DoubleEndedIterator for Iter<'v, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        } else {
            self.back -= 1;
            Some(self.element(self.back))
        }
    }
}

impl<'v, E> ExactSizeIterator for Iter<'v, E> {}

impl<'v, E> FusedIterator for Iter<'v, E> {}

impl<'v, E> Clone for Iter<'v, E> {
    fn clone(&self) -> Self {
        Iter {
            buf: self.buf,
            head: self.head,
            front: self.front,
            back: self.back,
        }
    }
}

/// mutable iterator over the elements of a view, in logical order
pub struct IterMut<'v, E> {
    inner: Chain<slice::IterMut<'v, E>, slice::IterMut<'v, E>>,
}

impl<'v, E> IterMut<'v, E> {
    /// iterate `a` followed by `b`
    pub(crate) fn new(a: &'v mut [E], b: &'v mut [E]) -> IterMut<'v, E> {
        IterMut {
            inner: a.iter_mut().chain(b.iter_mut()),
        }
    }
}

impl<'v, E> Iterator for IterMut<'v, E> {
    type Item = &'v mut E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'v, E> DoubleEndedIterator for IterMut<'v, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<'v, E> ExactSizeIterator for IterMut<'v, E> {}

impl<'v, E> FusedIterator for IterMut<'v, E> {}
