//! Lock strategies guarding the backing sequence of a sorted array.
//!
//! A [`SortedArray`](crate::sorted::SortedArray) never touches its elements
//! directly. It goes through a [`LockStrategy`], which owns the sequence and
//! hands out scoped guards in read or write mode. The strategy is a type
//! parameter, so the choice between a real lock and the single-threaded
//! stand-in is made once at construction and can never change afterwards.
//!
//! - [`SharedLock`]: a `parking_lot` reader/writer lock. Readers share access,
//!   writers are exclusive. The array is `Send + Sync`.
//! - [`LocalLock`]: a `RefCell` borrow flag with no atomic operations. The
//!   array is `Send` but `!Sync`, so it cannot be shared between threads.
//!
//! Guards release their access when dropped, including while unwinding out
//! of a panicking closure. `parking_lot` locks are not poisoned by panics.
//!
//! # Examples
//!
//! ```rust
//! use sorted_array::sync::{LocalLock, LockStrategy, SharedLock};
//! use std::collections::VecDeque;
//!
//! let shared = SharedLock::new(VecDeque::from(vec![1, 2, 3]));
//! assert_eq!(shared.read().len(), 3);
//! shared.write().push_back(4);
//! assert_eq!(shared.into_inner(), VecDeque::from(vec![1, 2, 3, 4]));
//!
//! let local = LocalLock::new(VecDeque::from(vec![1]));
//! assert!(!<LocalLock<i32> as LockStrategy<i32>>::IS_SAFE);
//! assert_eq!(local.read()[0], 1);
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::fmt;
use std::ops::{Deref, DerefMut};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Scoped read/write access to the backing sequence of a sorted array.
///
/// Implementations own the sequence. `read` grants shared access and `write`
/// grants exclusive access; both are released when the returned guard drops.
pub trait LockStrategy<T> {
    /// `true` when the strategy provides real mutual exclusion between threads.
    const IS_SAFE: bool;

    /// Guard for shared access.
    type ReadGuard<'a>: Deref<Target = VecDeque<T>>
    where
        Self: 'a;

    /// Guard for exclusive access.
    type WriteGuard<'a>: DerefMut<Target = VecDeque<T>>
    where
        Self: 'a;

    /// Wraps `elements` in a new lock.
    fn new(elements: VecDeque<T>) -> Self;

    /// Acquires shared access, blocking (or panicking, for [`LocalLock`]) on conflict.
    fn read(&self) -> Self::ReadGuard<'_>;

    /// Acquires exclusive access, blocking (or panicking, for [`LocalLock`]) on conflict.
    fn write(&self) -> Self::WriteGuard<'_>;

    /// Consumes the lock and returns the sequence.
    fn into_inner(self) -> VecDeque<T>;
}

// =============================================================================
// SharedLock
// =============================================================================

/// Reader/writer lock backed by [`parking_lot::RwLock`].
///
/// Used by default. Shared operations never contend with each other; a
/// writer waits for active readers and blocks new ones.
pub struct SharedLock<T> {
    inner: RwLock<VecDeque<T>>,
}

impl<T> LockStrategy<T> for SharedLock<T> {
    const IS_SAFE: bool = true;

    type ReadGuard<'a>
        = RwLockReadGuard<'a, VecDeque<T>>
    where
        Self: 'a;

    type WriteGuard<'a>
        = RwLockWriteGuard<'a, VecDeque<T>>
    where
        Self: 'a;

    #[inline]
    fn new(elements: VecDeque<T>) -> Self {
        Self {
            inner: RwLock::new(elements),
        }
    }

    #[inline]
    fn read(&self) -> Self::ReadGuard<'_> {
        self.inner.read()
    }

    #[inline]
    fn write(&self) -> Self::WriteGuard<'_> {
        self.inner.write()
    }

    #[inline]
    fn into_inner(self) -> VecDeque<T> {
        self.inner.into_inner()
    }
}

impl<T> fmt::Debug for SharedLock<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("SharedLock")
    }
}

// =============================================================================
// LocalLock
// =============================================================================

/// Single-threaded stand-in for a lock.
///
/// Performs no synchronization; it only tracks borrows so that conflicting
/// access from the same thread (for example, mutating the array from inside a
/// read section) panics instead of aliasing the sequence. Because `RefCell`
/// is `!Sync`, an array using this strategy cannot be shared across threads.
///
/// # Panics
///
/// `read` panics while a write guard is alive, and `write` panics while any
/// guard is alive.
pub struct LocalLock<T> {
    inner: RefCell<VecDeque<T>>,
}

impl<T> LockStrategy<T> for LocalLock<T> {
    const IS_SAFE: bool = false;

    type ReadGuard<'a>
        = Ref<'a, VecDeque<T>>
    where
        Self: 'a;

    type WriteGuard<'a>
        = RefMut<'a, VecDeque<T>>
    where
        Self: 'a;

    #[inline]
    fn new(elements: VecDeque<T>) -> Self {
        Self {
            inner: RefCell::new(elements),
        }
    }

    #[inline]
    fn read(&self) -> Self::ReadGuard<'_> {
        self.inner.borrow()
    }

    #[inline]
    fn write(&self) -> Self::WriteGuard<'_> {
        self.inner.borrow_mut()
    }

    #[inline]
    fn into_inner(self) -> VecDeque<T> {
        self.inner.into_inner()
    }
}

impl<T> fmt::Debug for LocalLock<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("LocalLock")
    }
}
