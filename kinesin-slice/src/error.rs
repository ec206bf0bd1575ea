//! Error types

use thiserror::Error;

/// broad classification of an [`Error`]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// bad arguments while constructing a view
    InvalidArgument,
    /// logical index outside of the view
    OutOfRange,
    /// iterator advanced past its last element
    Exhausted,
}

/// errors produced by views and their iterators
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum Error {
    /// start or end boundary lies past the end of the backing buffer
    #[error("boundary index {index} is too large, should be at most {capacity}")]
    BoundaryOutOfRange { index: usize, capacity: usize },
    /// element access on a view of length 0
    #[error("reading from an empty view")]
    EmptyView,
    /// element access past the end of the view
    #[error("index {index} out of range for view of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// iterator has no elements left
    #[error("iterator exhausted")]
    Exhausted,
}

impl Error {
    /// classify error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BoundaryOutOfRange { .. } => ErrorKind::InvalidArgument,
            Error::EmptyView | Error::IndexOutOfRange { .. } => ErrorKind::OutOfRange,
            Error::Exhausted => ErrorKind::Exhausted,
        }
    }
}
