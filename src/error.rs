//! Error types for sorted array operations.

use thiserror::Error;

/// Error returned by positional operations on a [`SortedArray`](crate::sorted::SortedArray).
///
/// Positional access is never pre-validated by the caller contract, so every
/// operation that addresses an element by index (or by end) reports misuse
/// through this type instead of panicking.
///
/// # Examples
///
/// ```rust
/// use sorted_array::prelude::*;
///
/// let array = SortedArray::from_ord(0);
/// array.add([1, 2]);
///
/// assert_eq!(
///     array.get(5),
///     Err(SortedArrayError::IndexOutOfBounds { index: 5, length: 2 })
/// );
/// assert_eq!(
///     array.get(5).unwrap_err().to_string(),
///     "index 5 out of bounds for sorted array of length 2"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SortedArrayError {
    /// The index does not address an element of the array.
    #[error("index {index} out of bounds for sorted array of length {length}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The length of the array at the time of the request.
        length: usize,
    },

    /// An element was popped from an empty array.
    #[error("cannot pop from an empty sorted array")]
    Empty,
}

impl SortedArrayError {
    #[inline]
    pub(crate) const fn out_of_bounds(index: usize, length: usize) -> Self {
        Self::IndexOutOfBounds { index, length }
    }
}
