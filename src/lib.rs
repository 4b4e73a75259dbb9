//! # sorted-array
//!
//! A thread-safe dynamic array that keeps its elements sorted at all times
//! according to a caller-supplied comparison function.
//!
//! ## Overview
//!
//! [`SortedArray`](sorted::SortedArray) answers membership and rank queries
//! with binary search over a flat, contiguous sequence, without a separate
//! index structure. It supports:
//!
//! - **Sorted insertion**: single values or atomic batches
//! - **Lookup**: binary search, positional `get`, `contains`
//! - **Removal**: positional `remove`, `pop_left`, `pop_right`, `clear`
//! - **Uniqueness**: switchable at runtime, deduplicating existing contents
//! - **Scoped critical sections**: caller closures run under the read or write lock
//!
//! ## Lock Strategies
//!
//! - [`SharedLock`](sync::SharedLock): `parking_lot` reader/writer lock (default)
//! - [`LocalLock`](sync::LocalLock): borrow-checked, single-threaded, no synchronization
//!
//! ## Example
//!
//! ```rust
//! use sorted_array::prelude::*;
//!
//! let array = SortedArray::new(0, |left: &i32, right: &i32| left.cmp(right));
//! array.add([5, 3, 8, 3]);
//! assert_eq!(array.slice().into_vec(), vec![3, 3, 5, 8]);
//!
//! array.set_unique(true);
//! assert_eq!(array.len(), 3);
//! assert!(array.contains(&5));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use sorted_array::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::SortedArrayError;
    pub use crate::sorted::*;
}

pub mod error;
pub mod sorted;
pub mod sync;
