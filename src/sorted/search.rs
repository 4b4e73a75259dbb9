//! Binary search over the backing sequence.

use std::cmp::Ordering;
use std::collections::VecDeque;

/// Outcome of a binary search over a sorted array.
///
/// A search over a non-empty array always ends on a probed index together
/// with the ordering of the searched value relative to the element there.
/// `Ordering::Equal` means an exact match; any other ordering means the
/// value is absent and `index` is the nearest probed position.
///
/// # Examples
///
/// ```rust
/// use sorted_array::prelude::*;
/// use std::cmp::Ordering;
///
/// let array = SortedArray::from_ord(0);
/// assert_eq!(array.search(&1), SearchResult::Empty);
///
/// array.add([10, 20, 30]);
/// assert_eq!(array.search(&20), SearchResult::Probed { index: 1, ordering: Ordering::Equal });
/// assert_eq!(array.search(&25).found(), None);
/// assert_eq!(array.search(&25).insertion_index(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchResult {
    /// The array was empty; nothing was compared.
    Empty,
    /// The search ended at `index`, where the value compared as `ordering`
    /// against the element stored there.
    Probed {
        /// Last probed position.
        index: usize,
        /// Ordering of the searched value relative to the element at `index`.
        ordering: Ordering,
    },
}

impl SearchResult {
    /// Returns the index of an exact match, if any.
    #[inline]
    #[must_use]
    pub const fn found(self) -> Option<usize> {
        match self {
            Self::Probed {
                index,
                ordering: Ordering::Equal,
            } => Some(index),
            _ => None,
        }
    }

    /// Returns `true` if the search ended on an exact match.
    #[inline]
    #[must_use]
    pub const fn is_found(self) -> bool {
        self.found().is_some()
    }

    /// Returns the last probed index, or `None` for an empty array.
    #[inline]
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Probed { index, .. } => Some(index),
        }
    }

    /// Returns the last comparison result, or `None` for an empty array.
    #[inline]
    #[must_use]
    pub const fn ordering(self) -> Option<Ordering> {
        match self {
            Self::Empty => None,
            Self::Probed { ordering, .. } => Some(ordering),
        }
    }

    /// Returns the position at which the searched value keeps the array sorted.
    ///
    /// A value greater than the probed element goes right after it; otherwise
    /// it goes at the probed position, ahead of any equal elements.
    #[inline]
    #[must_use]
    pub const fn insertion_index(self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Probed {
                index,
                ordering: Ordering::Greater,
            } => index + 1,
            Self::Probed { index, .. } => index,
        }
    }
}

/// Runs a binary search for `value` without taking any lock.
///
/// The midpoint of the inclusive range `[low, high]` is `(low + high) / 2`,
/// rounded down. The search stops on an exact match or once the range is
/// exhausted, and reports the last midpoint with its comparison result.
pub(crate) fn locate<T, C>(elements: &VecDeque<T>, value: &T, compare: &C) -> SearchResult
where
    C: Fn(&T, &T) -> Ordering,
{
    if elements.is_empty() {
        return SearchResult::Empty;
    }

    // `high` is exclusive so the range never underflows.
    let mut low = 0;
    let mut high = elements.len();
    let mut index = 0;
    let mut ordering = Ordering::Equal;

    while low < high {
        index = low + (high - low - 1) / 2;
        ordering = compare(value, &elements[index]);
        match ordering {
            Ordering::Less => high = index,
            Ordering::Greater => low = index + 1,
            Ordering::Equal => break,
        }
    }

    SearchResult::Probed { index, ordering }
}
