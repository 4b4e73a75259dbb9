//! Snapshots of a sorted array's contents.

use std::collections::VecDeque;
use std::fmt;
use std::ops::Deref;

use crate::sync::LockStrategy;

/// Contents of a sorted array as returned by [`SortedArray::slice`](super::SortedArray::slice).
///
/// With a thread-safe lock strategy the snapshot is an independent copy,
/// taken under the read lock and isolated from later mutation.
///
/// With [`LocalLock`](crate::sync::LocalLock) the snapshot is the live backing
/// sequence, held through a read borrow. No copy is made, but the array
/// cannot be mutated while the snapshot is alive: doing so panics with a
/// borrow conflict. Drop the snapshot (or call [`into_vec`](Self::into_vec))
/// before mutating again.
///
/// Both variants dereference to the sequence.
///
/// # Examples
///
/// ```rust
/// use sorted_array::prelude::*;
///
/// let array = SortedArray::from_ord(0);
/// array.add([3, 1, 2]);
///
/// let snapshot = array.slice();
/// array.add([0]);
///
/// // The copy does not see the later insertion.
/// assert!(!snapshot.is_live());
/// assert_eq!(snapshot.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert_eq!(array.len(), 4);
/// ```
pub enum Snapshot<'a, T, S>
where
    S: LockStrategy<T> + 'a,
{
    /// Independent copy of the sequence.
    Copied(VecDeque<T>),
    /// The live backing sequence, borrowed for as long as the snapshot lives.
    Live(S::ReadGuard<'a>),
}

impl<T, S> Snapshot<'_, T, S>
where
    S: LockStrategy<T>,
{
    /// Returns `true` if the snapshot borrows the live backing sequence.
    #[inline]
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// Converts the snapshot into an owned `Vec`, releasing any live borrow.
    #[must_use]
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        match self {
            Self::Copied(elements) => Vec::from(elements),
            Self::Live(guard) => guard.iter().cloned().collect(),
        }
    }
}

impl<T, S> Deref for Snapshot<'_, T, S>
where
    S: LockStrategy<T>,
{
    type Target = VecDeque<T>;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Copied(elements) => elements,
            Self::Live(guard) => &**guard,
        }
    }
}

impl<T: fmt::Debug, S> fmt::Debug for Snapshot<'_, T, S>
where
    S: LockStrategy<T>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}
