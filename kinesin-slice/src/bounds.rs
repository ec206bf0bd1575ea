//! Validated construction of views

use std::ops::{Range, RangeFrom, RangeFull};

use tracing::debug;

use crate::error::Error;
use crate::view::CyclicView;

/// where a view ends
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum End {
    /// view runs to the end of the backing buffer
    BufferEnd,
    /// view ends before this (exclusive) buffer index, wrapping around if it
    /// is lower than the start
    At(usize),
}

/// boundaries of a view, checked against a buffer by [`ViewBounds::build`]
///
/// ```
/// use kinesin_slice::ViewBounds;
///
/// let mut buf: Vec<u32> = (0..20).collect();
/// let view = ViewBounds::starting_from(18).until(2).build(&mut buf).unwrap();
/// assert_eq!(view.to_string(), "18 19 0 1");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ViewBounds {
    /// buffer index of the first element, may equal the capacity
    pub start: usize,
    /// end of the view
    pub end: End,
}

impl ViewBounds {
    /// bounds covering the entire buffer
    pub const fn all() -> ViewBounds {
        ViewBounds::starting_from(0)
    }

    /// bounds starting at `start` and running to the end of the buffer
    pub const fn starting_from(start: usize) -> ViewBounds {
        ViewBounds {
            start,
            end: End::BufferEnd,
        }
    }

    /// end the view before buffer index `end`
    ///
    /// If `end < start` the view wraps around the end of the buffer. If
    /// `end == start` the view is empty, never full.
    pub const fn until(self, end: usize) -> ViewBounds {
        ViewBounds {
            start: self.start,
            end: End::At(end),
        }
    }

    /// validate bounds against `buf` and create the view
    pub fn build<E>(self, buf: &mut [E]) -> Result<CyclicView<'_, E>, Error> {
        let capacity = buf.len();
        check_boundary(self.start, capacity)?;
        let end = match self.end {
            End::BufferEnd => capacity,
            End::At(end) => {
                check_boundary(end, capacity)?;
                end
            }
        };

        let len = if self.start <= end {
            end - self.start
        } else {
            capacity - self.start + end
        };
        // start == capacity is the wraparound point
        let head = if self.start == capacity { 0 } else { self.start };

        debug!(start = self.start, end, len, capacity, "created view");
        Ok(CyclicView::from_parts(buf, head, len))
    }
}

/// ensure a boundary index lies within 0..=capacity
fn check_boundary(index: usize, capacity: usize) -> Result<(), Error> {
    if index > capacity {
        Err(Error::BoundaryOutOfRange { index, capacity })
    } else {
        Ok(())
    }
}

impl Default for ViewBounds {
    fn default() -> Self {
        ViewBounds::all()
    }
}

impl From<Range<usize>> for ViewBounds {
    /// `start..end`, where `end < start` wraps around
    fn from(range: Range<usize>) -> Self {
        ViewBounds::starting_from(range.start).until(range.end)
    }
}

impl From<RangeFrom<usize>> for ViewBounds {
    fn from(range: RangeFrom<usize>) -> Self {
        ViewBounds::starting_from(range.start)
    }
}

impl From<RangeFull> for ViewBounds {
    fn from(_: RangeFull) -> Self {
        ViewBounds::all()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_util::sequence;

    const SIZE: usize = 20;

    #[test]
    fn sizes() {
        let mut buf = sequence(SIZE);
        assert_eq!(ViewBounds::all().build(&mut buf).unwrap().len(), SIZE);
        assert_eq!(ViewBounds::from(3..6).build(&mut buf).unwrap().len(), 3);
        assert_eq!(ViewBounds::from(3..5).build(&mut buf).unwrap().len(), 2);
        assert_eq!(ViewBounds::from(3..4).build(&mut buf).unwrap().len(), 1);
        assert_eq!(ViewBounds::from(3..3).build(&mut buf).unwrap().len(), 0);
        assert_eq!(ViewBounds::from(3..).build(&mut buf).unwrap().len(), 17);
        assert_eq!(ViewBounds::from(..).build(&mut buf).unwrap().len(), SIZE);
    }

    #[test]
    fn empty_is_not_full() {
        let mut buf = sequence(SIZE);
        let view = ViewBounds::starting_from(3).until(3).build(&mut buf).unwrap();
        assert_eq!(view.len(), 0);
        assert!(view.is_empty());
        assert!(!view.is_full());

        let view = ViewBounds::all().build(&mut buf).unwrap();
        assert!(view.is_full());
        assert!(!view.is_empty());
    }

    #[test]
    fn wraparound() {
        let mut buf = sequence(SIZE);
        let view = ViewBounds::starting_from(SIZE - 2)
            .build(&mut buf)
            .unwrap();
        assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec![18, 19]);

        let view = ViewBounds::starting_from(SIZE - 2)
            .until(1)
            .build(&mut buf)
            .unwrap();
        assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec![18, 19, 0]);
    }

    #[test]
    fn start_at_capacity() {
        let mut buf = sequence(SIZE);
        let view = ViewBounds::starting_from(SIZE).build(&mut buf).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.head(), 0);

        let view = ViewBounds::starting_from(SIZE)
            .until(4)
            .build(&mut buf)
            .unwrap();
        assert_eq!(view.head(), 0);
        assert_eq!(view.to_string(), "0 1 2 3");

        let view = ViewBounds::starting_from(0)
            .until(SIZE)
            .build(&mut buf)
            .unwrap();
        assert!(view.is_full());
    }

    #[test]
    fn out_of_range() {
        let mut buf = sequence(SIZE);
        let err = ViewBounds::starting_from(SIZE + 1)
            .build(&mut buf)
            .unwrap_err();
        assert_eq!(
            err,
            Error::BoundaryOutOfRange {
                index: SIZE + 1,
                capacity: SIZE
            }
        );
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = ViewBounds::starting_from(3)
            .until(SIZE + 5)
            .build(&mut buf)
            .unwrap_err();
        assert_eq!(
            err,
            Error::BoundaryOutOfRange {
                index: SIZE + 5,
                capacity: SIZE
            }
        );
    }

    #[test]
    fn empty_buffer() {
        let mut buf: Vec<u32> = Vec::new();
        let view = ViewBounds::all().build(&mut buf).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.capacity(), 0);
        assert!(ViewBounds::starting_from(1).build(&mut buf).is_err());
        assert!(CyclicView::new(&mut buf, ViewBounds::from(0..0)).is_ok());
    }
}
