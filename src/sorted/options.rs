//! Construction options for sorted arrays.

/// Configuration applied when a [`SortedArray`](super::SortedArray) is built.
///
/// The lock mode is not part of the options: it is the array's lock strategy
/// type parameter and is selected by the constructor.
///
/// # Examples
///
/// ```rust
/// use sorted_array::prelude::*;
///
/// let options = SortedArrayOptions::new().with_capacity(64).with_unique(true);
/// let array = SortedArray::with_options(options, i32::cmp);
///
/// array.add([2, 1, 2]);
/// assert_eq!(array.slice().into_vec(), vec![1, 2]);
/// assert_eq!(array.capacity_hint(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortedArrayOptions {
    /// Capacity reserved up front and after every `clear`. Advisory only.
    pub capacity: usize,
    /// Whether duplicates are rejected from the start.
    pub unique: bool,
}

impl SortedArrayOptions {
    /// Returns options with no reserved capacity and uniqueness disabled.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            capacity: 0,
            unique: false,
        }
    }

    /// Sets the capacity hint.
    #[inline]
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets whether duplicates are rejected.
    #[inline]
    #[must_use]
    pub const fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }
}
