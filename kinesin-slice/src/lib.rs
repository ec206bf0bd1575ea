//! Cyclic windowed views over fixed-size buffers
//!
//! A [`CyclicView`] borrows a buffer and exposes a window into it that may
//! wrap around the end of the buffer. The window can be moved, grown,
//! shrunk, reversed and rotated in place; the buffer itself is never
//! reallocated.
//!
//! ```
//! use kinesin_slice::ViewBounds;
//!
//! let mut buf: Vec<u32> = (0..20).collect();
//! let mut view = ViewBounds::starting_from(5).until(10).build(&mut buf).unwrap();
//! view.rotate(-2);
//! assert_eq!(view.to_string(), "7 8 9 5 6");
//! view.move_head_pointer(-1);
//! assert_eq!(view.to_string(), "4 7 8 9 5 6");
//! ```
//!
//! Views hold an exclusive borrow of their buffer and are not meant to be
//! shared between threads; wrap the buffer in a lock and build the view
//! while holding the guard if that is needed.

pub mod bounds;
pub mod error;
pub mod iter;
pub mod view;

#[cfg(test)]
pub mod test_util;

pub use bounds::{End, ViewBounds};
pub use error::{Error, ErrorKind};
pub use iter::{Iter, IterMut};
pub use view::CyclicView;
