//! Sorted, lock-guarded dynamic array.
//!
//! This module provides [`SortedArray`], a contiguous sequence kept in
//! ascending order under a caller-supplied comparator:
//!
//! - [`SortedArray`]: the container and its operations
//! - [`SearchResult`]: outcome of a binary search
//! - [`Snapshot`]: contents returned by [`SortedArray::slice`]
//! - [`SortedArrayOptions`]: construction configuration
//!
//! # Examples
//!
//! ## Ranking with duplicates
//!
//! ```rust
//! use sorted_array::prelude::*;
//!
//! let scores = SortedArray::from_ord(0);
//! scores.add([70, 95, 70, 88]);
//!
//! // Rank of 88 among all scores
//! assert_eq!(scores.search(&88).found(), Some(2));
//! assert_eq!(scores.pop_right(), Ok(95));
//! assert_eq!(scores.pop_left(), Ok(70));
//! ```
//!
//! ## Sharing between threads
//!
//! ```rust
//! use sorted_array::prelude::*;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let array = Arc::new(SortedArray::from_ord(0));
//! let handles: Vec<_> = (0..4)
//!     .map(|offset| {
//!         let array = Arc::clone(&array);
//!         thread::spawn(move || array.add((0..10).map(|value| value * 4 + offset)))
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(array.slice().into_vec(), (0..40).collect::<Vec<_>>());
//! ```

mod array;
mod options;
mod search;
mod snapshot;

pub use array::{Comparator, LocalSortedArray, SortedArray};
pub use options::SortedArrayOptions;
pub use search::SearchResult;
pub use snapshot::Snapshot;
