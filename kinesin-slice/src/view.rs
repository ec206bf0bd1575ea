//! Cyclic view over a fixed-size buffer

use std::fmt;
use std::mem::{self, MaybeUninit};
use std::ops::Range;
use std::ptr;

use tracing::trace;

use crate::bounds::ViewBounds;
use crate::error::Error;
use crate::iter::{Iter, IterMut};

/// cyclic window into a borrowed buffer
///
/// Logical position `i` of the view lives at buffer offset
/// `(head + i) % capacity`. When the window runs off the end of the buffer it
/// continues at offset 0. The view never resizes or replaces the buffer, it
/// only moves its own boundaries and permutes elements in place.
///
/// Length is stored explicitly so that an empty view and a view covering the
/// whole buffer remain distinct even though both have the same head and
/// computed end.
pub struct CyclicView<'a, E> {
    // buf: [==>-----<(head)=====]
    buf: &'a mut [E],
    head: usize,
    len: usize,
}

// Invariants:
// - `len <= buf.len()`
// - `head < buf.len()`, or `head == 0` if the buffer is empty

/// get offset into a buffer of `capacity` elements that lies `index`
/// positions after `head`
///
/// `index` may equal `capacity`, which yields `head` again.
#[inline]
pub(crate) fn wrap_forward(head: usize, capacity: usize, index: usize) -> usize {
    debug_assert!(index <= capacity, "index cannot exceed capacity");
    let remaining = capacity - index;
    if head < remaining {
        // does not wrap
        head + index
    } else {
        // does wrap
        head - remaining
    }
}

/// get offset into a buffer of `capacity` elements that lies `index`
/// positions before `head`
#[inline]
fn wrap_backward(head: usize, capacity: usize, index: usize) -> usize {
    debug_assert!(index <= capacity, "index cannot exceed capacity");
    if head >= index {
        // does not wrap
        head - index
    } else {
        // does wrap
        head + (capacity - index)
    }
}

impl<'a, E> CyclicView<'a, E> {
    /// create view from already validated parts
    pub(crate) fn from_parts(buf: &'a mut [E], head: usize, len: usize) -> CyclicView<'a, E> {
        debug_assert!(len <= buf.len(), "length exceeds capacity");
        debug_assert!(
            head < buf.len() || head == 0,
            "head out of range for capacity"
        );
        CyclicView { buf, head, len }
    }

    /// create view over `buf` with the given bounds
    pub fn new(buf: &'a mut [E], bounds: ViewBounds) -> Result<CyclicView<'a, E>, Error> {
        bounds.build(buf)
    }

    /// create view covering the entire buffer
    pub fn all(buf: &'a mut [E]) -> CyclicView<'a, E> {
        let len = buf.len();
        CyclicView::from_parts(buf, 0, len)
    }

    /// number of elements in the backing buffer
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// number of elements in the view
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// whether the view covers the entire backing buffer
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// buffer offset of the first element of the view
    pub fn head(&self) -> usize {
        self.head
    }

    /// determine if the view occupies a contiguous segment of the buffer
    pub fn is_contiguous(&self) -> bool {
        // head + len <= capacity
        self.head <= self.capacity() - self.len
    }

    /// get offset into backing buffer from element index
    #[inline]
    fn offset_of(&self, index: usize) -> usize {
        wrap_forward(self.head, self.capacity(), index)
    }

    /// ensure index refers to an element of the view, returning its offset
    fn check_index(&self, index: usize) -> Result<usize, Error> {
        if self.len == 0 {
            return Err(Error::EmptyView);
        }
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(self.offset_of(index))
    }

    /// get reference to element at logical index
    pub fn get(&self, index: usize) -> Result<&E, Error> {
        let offset = self.check_index(index)?;
        Ok(&self.buf[offset])
    }

    /// get mutable reference to element at logical index
    pub fn get_mut(&mut self, index: usize) -> Result<&mut E, Error> {
        let offset = self.check_index(index)?;
        Ok(&mut self.buf[offset])
    }

    /// replace element at logical index, returning the previous element
    pub fn set(&mut self, index: usize, value: E) -> Result<E, Error> {
        let offset = self.check_index(index)?;
        Ok(mem::replace(&mut self.buf[offset], value))
    }

    /// exchange elements at two logical indices
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), Error> {
        let a = self.check_index(a)?;
        let b = self.check_index(b)?;
        self.buf.swap(a, b);
        Ok(())
    }

    /// map the view to backing buffer range(s)
    fn map_range(&self) -> (Range<usize>, Option<Range<usize>>) {
        if self.len == 0 {
            // zero size range
            return (self.head..self.head, None);
        }
        let end = self.offset_of(self.len - 1);

        if end >= self.head {
            // range does not wrap
            (self.head..end + 1, None)
        } else {
            // range does wrap
            (self.head..self.capacity(), Some(0..end + 1))
        }
    }

    /// get slices representing the view, the second one present only if the
    /// view wraps around the end of the buffer
    pub fn as_slices(&self) -> (&[E], Option<&[E]>) {
        let (a, b) = self.map_range();
        (&self.buf[a], b.map(|r| &self.buf[r]))
    }

    /// get mutable slices representing the view
    pub fn as_mut_slices(&mut self) -> (&mut [E], Option<&mut [E]>) {
        match self.map_range() {
            (a, None) => (&mut self.buf[a], None),
            (a, Some(b)) => {
                // from: [==b=>-----<==a==]
                let (low, high) = self.buf.split_at_mut(a.start);
                (high, Some(&mut low[b]))
            }
        }
    }

    /// iterate over elements in logical order
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(self.buf, self.head, self.len)
    }

    /// iterate mutably over elements in logical order
    pub fn iter_mut(&mut self) -> IterMut<'_, E> {
        let (a, b) = self.as_mut_slices();
        IterMut::new(a, b.unwrap_or_default())
    }

    /// move the view `steps` positions towards the start of the buffer
    pub fn move_left(&mut self, steps: usize) {
        let capacity = self.capacity();
        if capacity == 0 {
            return;
        }
        self.head = wrap_backward(self.head, capacity, steps % capacity);
    }

    /// move the view `steps` positions towards the end of the buffer
    pub fn move_right(&mut self, steps: usize) {
        let capacity = self.capacity();
        if capacity == 0 {
            return;
        }
        self.head = wrap_forward(self.head, capacity, steps % capacity);
    }

    /// move both boundaries of the view, preserving its length
    ///
    /// Negative `delta` moves left, positive moves right. The view wraps
    /// around either end of the buffer.
    pub fn move_by(&mut self, delta: isize) {
        if delta < 0 {
            self.move_left(delta.unsigned_abs());
        } else {
            self.move_right(delta.unsigned_abs());
        }
        trace!(delta, head = self.head, "moved view");
    }

    /// grow the front of the view by up to `amount` elements, stopping when
    /// the view covers the whole buffer
    ///
    /// Returns the number of elements actually added.
    pub fn expand_head(&mut self, amount: usize) -> usize {
        let actual = usize::min(amount, self.capacity() - self.len);
        if actual > 0 {
            self.head = wrap_backward(self.head, self.capacity(), actual);
            self.len += actual;
        }
        actual
    }

    /// shrink the front of the view by up to `amount` elements, stopping
    /// when the view is empty
    ///
    /// Returns the number of elements actually removed.
    pub fn contract_head(&mut self, amount: usize) -> usize {
        let actual = usize::min(amount, self.len);
        if actual > 0 {
            self.head = wrap_forward(self.head, self.capacity(), actual);
            self.len -= actual;
        }
        actual
    }

    /// grow the back of the view by up to `amount` elements
    pub fn expand_tail(&mut self, amount: usize) -> usize {
        let actual = usize::min(amount, self.capacity() - self.len);
        self.len += actual;
        actual
    }

    /// shrink the back of the view by up to `amount` elements
    pub fn contract_tail(&mut self, amount: usize) -> usize {
        let actual = usize::min(amount, self.len);
        self.len -= actual;
        actual
    }

    /// shift the front boundary of the view
    ///
    /// Negative `delta` expands the front, positive `delta` contracts it.
    /// Saturates at an empty view and at a full view.
    pub fn move_head_pointer(&mut self, delta: isize) {
        let applied = if delta < 0 {
            self.expand_head(delta.unsigned_abs())
        } else {
            self.contract_head(delta.unsigned_abs())
        };
        trace!(
            delta,
            applied,
            head = self.head,
            len = self.len,
            "moved head pointer"
        );
    }

    /// shift the back boundary of the view
    ///
    /// Positive `delta` expands the back, negative `delta` contracts it.
    /// Saturates at an empty view and at a full view.
    pub fn move_tail_pointer(&mut self, delta: isize) {
        let applied = if delta < 0 {
            self.contract_tail(delta.unsigned_abs())
        } else {
            self.expand_tail(delta.unsigned_abs())
        };
        trace!(delta, applied, len = self.len, "moved tail pointer");
    }

    /// reverse the order of elements in the view
    pub fn reverse(&mut self) {
        if self.len < 2 {
            return;
        }

        let (mut l, mut r) = (0, self.len - 1);
        while l < r {
            let (a, b) = (self.offset_of(l), self.offset_of(r));
            self.buf.swap(a, b);
            l += 1;
            r -= 1;
        }
    }

    /// rotate the contents of the view without moving its boundaries
    ///
    /// Negative `delta` rotates left (towards lower logical indices), positive
    /// rotates right.
    pub fn rotate(&mut self, delta: isize) {
        if delta < 0 {
            self.rotate_left(delta.unsigned_abs());
        } else {
            self.rotate_right(delta.unsigned_abs());
        }
    }

    /// rotate contents `steps` positions to the left
    pub fn rotate_left(&mut self, steps: usize) {
        if self.len < 2 {
            // trivially rotated
            return;
        }

        let steps = steps % self.len;
        if steps == 0 {
            return;
        }

        // move whichever block is smaller
        if steps <= self.len - steps {
            trace!(steps, "rotate left");
            unsafe { self.rotate_left_impl(steps) };
        } else {
            trace!(steps = self.len - steps, "rotate right (for left)");
            unsafe { self.rotate_right_impl(self.len - steps) };
        }
    }

    /// rotate contents `steps` positions to the right
    pub fn rotate_right(&mut self, steps: usize) {
        if self.len < 2 {
            // trivially rotated
            return;
        }

        let steps = steps % self.len;
        if steps == 0 {
            return;
        }

        if steps <= self.len - steps {
            trace!(steps, "rotate right");
            unsafe { self.rotate_right_impl(steps) };
        } else {
            trace!(steps = self.len - steps, "rotate left (for right)");
            unsafe { self.rotate_left_impl(self.len - steps) };
        }
    }

    /// rotate left through a scratch buffer holding `steps` elements
    ///
    /// safety: requires `0 < steps < self.len`
    unsafe fn rotate_left_impl(&mut self, steps: usize) {
        debug_assert!(steps > 0 && steps < self.len, "steps out of range");
        let (head, capacity, len) = (self.head, self.capacity(), self.len);
        let offset = |index: usize| wrap_forward(head, capacity, index);

        // allocate before anything is moved out
        let mut scratch: Vec<MaybeUninit<E>> = Vec::with_capacity(steps);
        let base = self.buf.as_mut_ptr();

        // from: [<aa|bbbbbb>]
        // load scratch with the leading block
        for index in 0..steps {
            scratch.push(MaybeUninit::new(ptr::read(base.add(offset(index)))));
        }

        // shift the rest down
        for index in steps..len {
            ptr::copy_nonoverlapping(base.add(offset(index)), base.add(offset(index - steps)), 1);
        }

        // dump scratch into the vacated tail
        // to:   [<bbbbbb|aa>]
        for (i, element) in scratch.into_iter().enumerate() {
            ptr::write(base.add(offset(len - steps + i)), element.assume_init());
        }
    }

    /// rotate right through a scratch buffer holding `steps` elements
    ///
    /// safety: requires `0 < steps < self.len`
    unsafe fn rotate_right_impl(&mut self, steps: usize) {
        debug_assert!(steps > 0 && steps < self.len, "steps out of range");
        let (head, capacity, len) = (self.head, self.capacity(), self.len);
        let offset = |index: usize| wrap_forward(head, capacity, index);

        let mut scratch: Vec<MaybeUninit<E>> = Vec::with_capacity(steps);
        let base = self.buf.as_mut_ptr();

        // from: [<aaaaaa|bb>]
        // load scratch with the trailing block
        for index in len - steps..len {
            scratch.push(MaybeUninit::new(ptr::read(base.add(offset(index)))));
        }

        // shift the rest up, highest index first
        for index in (0..len - steps).rev() {
            ptr::copy_nonoverlapping(base.add(offset(index)), base.add(offset(index + steps)), 1);
        }

        // dump scratch into the vacated head
        // to:   [<bb|aaaaaa>]
        for (index, element) in scratch.into_iter().enumerate() {
            ptr::write(base.add(offset(index)), element.assume_init());
        }
    }
}

impl<'v, 'a, E> IntoIterator for &'v CyclicView<'a, E> {
    type Item = &'v E;
    type IntoIter = Iter<'v, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'v, 'a, E> IntoIterator for &'v mut CyclicView<'a, E> {
    type Item = &'v mut E;
    type IntoIter = IterMut<'v, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<E: fmt::Display> fmt::Display for CyclicView<'_, E> {
    /// elements in logical order, separated by single spaces
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut has_prev = false;
        for element in self {
            if has_prev {
                write!(f, " ")?;
            } else {
                has_prev = true;
            }
            fmt::Display::fmt(element, f)?;
        }
        Ok(())
    }
}

impl<E: fmt::Debug> fmt::Debug for CyclicView<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CyclicView")
            .field("head", &self.head)
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("contents", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_util::sequence;
    use proptest::prelude::*;

    const MAX_CAPACITY: usize = 48;

    /// (capacity, start, end) describing a valid view
    fn bounds() -> impl Strategy<Value = (usize, usize, usize)> {
        (0..MAX_CAPACITY).prop_flat_map(|capacity| (Just(capacity), 0..=capacity, 0..=capacity))
    }

    fn build(buf: &mut [u32], start: usize, end: usize) -> CyclicView<'_, u32> {
        ViewBounds::starting_from(start)
            .until(end)
            .build(buf)
            .expect("bounds are in range")
    }

    fn contents(view: &CyclicView<'_, u32>) -> Vec<u32> {
        view.iter().copied().collect()
    }

    proptest! {
        /// Property: logical index i maps to buffer offset (start + i) mod N
        #[test]
        fn index_mapping((capacity, start, end) in bounds(), moves in prop::collection::vec(-50isize..50, 0..8)) {
            let mut buf = sequence(capacity);
            let mut view = build(&mut buf, start, end);
            let head = view.head();
            let len = view.len();
            prop_assert!(len <= capacity);

            // wander around, then come back to the same place
            let mut total = 0;
            for delta in moves {
                view.move_by(delta);
                total += delta;
            }
            view.move_by(-total);
            let applied = view.expand_head(3);
            view.contract_head(applied);
            prop_assert_eq!(view.head(), head);

            for i in 0..view.len() {
                prop_assert_eq!(*view.get(i).unwrap() as usize, (start + i) % capacity);
            }
        }

        /// Property: reversing twice restores the contents
        #[test]
        fn reverse_twice((capacity, start, end) in bounds()) {
            let mut buf = sequence(capacity);
            let mut view = build(&mut buf, start, end);
            let before = contents(&view);
            view.reverse();
            let mut expected = before.clone();
            expected.reverse();
            prop_assert_eq!(contents(&view), expected);
            view.reverse();
            prop_assert_eq!(contents(&view), before);
        }

        /// Property: rotate matches std rotation and is undone by its inverse
        #[test]
        fn rotate_matches_naive((capacity, start, end) in bounds(), delta in -200isize..200) {
            let mut buf = sequence(capacity);
            let mut view = build(&mut buf, start, end);
            let before = contents(&view);

            let mut expected = before.clone();
            if !expected.is_empty() {
                let k = delta.unsigned_abs() % expected.len();
                if delta < 0 {
                    expected.rotate_left(k);
                } else {
                    expected.rotate_right(k);
                }
            }

            view.rotate(delta);
            prop_assert_eq!(contents(&view), expected);
            view.rotate(-delta);
            prop_assert_eq!(contents(&view), before);
        }

        /// Property: rotating by a multiple of the length is a no-op
        #[test]
        fn rotate_by_length((capacity, start, end) in bounds(), multiple in -4isize..4) {
            let mut buf = sequence(capacity);
            let mut view = build(&mut buf, start, end);
            let before = contents(&view);
            view.rotate(view.len() as isize * multiple);
            prop_assert_eq!(contents(&view), before);
        }

        /// Property: boundary motion never leaves 0..=capacity
        #[test]
        fn boundaries_saturate((capacity, start, end) in bounds(), deltas in prop::collection::vec(any::<isize>(), 1..16)) {
            let mut buf = sequence(capacity);
            let mut view = build(&mut buf, start, end);
            for (i, delta) in deltas.into_iter().enumerate() {
                if i % 2 == 0 {
                    view.move_head_pointer(delta);
                } else {
                    view.move_tail_pointer(delta);
                }
                prop_assert!(view.len() <= capacity);
                prop_assert!(capacity == 0 || view.head() < capacity);
                prop_assert_eq!(view.iter().len(), view.len());
            }
        }
    }
}
