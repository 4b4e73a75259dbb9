//! The sorted array container.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use tracing::{debug, trace};

use super::options::SortedArrayOptions;
use super::search::{SearchResult, locate};
use super::snapshot::Snapshot;
use crate::error::SortedArrayError;
use crate::sync::{LocalLock, LockStrategy, SharedLock};

/// Function pointer form of a comparator, used when the element type is `Ord`.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// A sorted array that is restricted to a single thread.
pub type LocalSortedArray<T, C = Comparator<T>> = SortedArray<T, C, LocalLock<T>>;

/// A dynamic array that keeps its elements sorted under a caller-supplied comparator.
///
/// Every insertion places the value at its ordered position, so the contents
/// are sorted at the start and end of every operation. Lookups use binary
/// search. Duplicates are allowed until [`set_unique`](Self::set_unique)
/// enables uniqueness, which also removes duplicates already present.
///
/// All operations take `&self`. Mutations acquire the write lock of the
/// lock strategy `S`, reads acquire the read lock. The default strategy,
/// [`SharedLock`], makes the array `Send + Sync`; [`LocalLock`] skips
/// synchronization for single-threaded use.
///
/// # Type Parameters
///
/// * `T` - The element type
/// * `C` - The comparator, `Fn(&T, &T) -> Ordering`. It must be a total order
///   and must give the same answer for the same inputs; a comparator that
///   violates this silently breaks the ordering of the array.
/// * `S` - The lock strategy
///
/// # Complexity
///
/// | Operation                  | Cost           |
/// |----------------------------|----------------|
/// | `search`, `contains`       | O(log n)       |
/// | `add` (per value)          | O(n)           |
/// | `get`, `len`               | O(1)           |
/// | `pop_left`, `pop_right`    | O(1)           |
/// | `remove` (either end)      | O(1)           |
/// | `remove` (interior)        | O(n)           |
/// | `slice` (thread-safe)      | O(n)           |
/// | `set_unique(true)`         | O(n)           |
///
/// # Examples
///
/// ```rust
/// use sorted_array::prelude::*;
/// use std::cmp::Ordering;
///
/// let array = SortedArray::new(0, i32::cmp);
/// array.add([5, 3, 8, 3]);
/// assert_eq!(array.slice().into_vec(), vec![3, 3, 5, 8]);
///
/// array.set_unique(true);
/// assert_eq!(array.slice().into_vec(), vec![3, 5, 8]);
///
/// assert_eq!(array.search(&5), SearchResult::Probed { index: 1, ordering: Ordering::Equal });
/// assert_eq!(array.remove(0), Ok(3));
/// assert_eq!(array.slice().into_vec(), vec![5, 8]);
/// ```
pub struct SortedArray<T, C = Comparator<T>, S = SharedLock<T>>
where
    S: LockStrategy<T>,
{
    lock: S,
    compare: C,
    unique: AtomicBool,
    capacity_hint: usize,
    marker: PhantomData<T>,
}

// =============================================================================
// Constructors
// =============================================================================

impl<T, C> SortedArray<T, C, SharedLock<T>>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty, thread-safe array.
    ///
    /// # Arguments
    ///
    /// * `capacity_hint` - Capacity reserved up front and after `clear`
    /// * `compare` - Total order over the elements
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_array::prelude::*;
    ///
    /// let array = SortedArray::new(16, |left: &String, right: &String| left.len().cmp(&right.len()));
    /// array.add(["ccc".to_string(), "a".to_string(), "bb".to_string()]);
    /// assert_eq!(array.get(0).as_deref(), Ok("a"));
    /// assert!(array.is_safe());
    /// ```
    #[must_use]
    pub fn new(capacity_hint: usize, compare: C) -> Self {
        Self::with_strategy(SortedArrayOptions::new().with_capacity(capacity_hint), compare)
    }

    /// Creates an empty, thread-safe array from options.
    #[must_use]
    pub fn with_options(options: SortedArrayOptions, compare: C) -> Self {
        Self::with_strategy(options, compare)
    }
}

impl<T, C> SortedArray<T, C, LocalLock<T>>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty array without synchronization.
    ///
    /// The returned array is `!Sync`. Snapshots returned by
    /// [`slice`](Self::slice) borrow the live sequence instead of copying it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_array::prelude::*;
    ///
    /// let array = SortedArray::new_local(0, u8::cmp);
    /// array.add([2, 1]);
    /// assert!(!array.is_safe());
    /// assert!(array.slice().is_live());
    /// ```
    #[must_use]
    pub fn new_local(capacity_hint: usize, compare: C) -> Self {
        Self::with_strategy(SortedArrayOptions::new().with_capacity(capacity_hint), compare)
    }

    /// Creates an empty array without synchronization from options.
    #[must_use]
    pub fn local_with_options(options: SortedArrayOptions, compare: C) -> Self {
        Self::with_strategy(options, compare)
    }
}

impl<T: Ord> SortedArray<T> {
    /// Creates an empty, thread-safe array ordered by `Ord`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_array::prelude::*;
    ///
    /// let array = SortedArray::from_ord(4);
    /// array.add(['c', 'a', 'b']);
    /// assert_eq!(array.slice().into_vec(), vec!['a', 'b', 'c']);
    /// ```
    #[must_use]
    pub fn from_ord(capacity_hint: usize) -> Self {
        Self::new(capacity_hint, Ord::cmp)
    }
}

// =============================================================================
// Operations
// =============================================================================

impl<T, C, S> SortedArray<T, C, S>
where
    C: Fn(&T, &T) -> Ordering,
    S: LockStrategy<T>,
{
    /// Creates an empty array with an explicitly chosen lock strategy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_array::prelude::*;
    /// use sorted_array::sync::LocalLock;
    ///
    /// let array: SortedArray<i32, _, LocalLock<i32>> =
    ///     SortedArray::with_strategy(SortedArrayOptions::new().with_unique(true), i32::cmp);
    /// assert!(array.is_unique());
    /// ```
    #[must_use]
    pub fn with_strategy(options: SortedArrayOptions, compare: C) -> Self {
        Self {
            lock: S::new(VecDeque::with_capacity(options.capacity)),
            compare,
            unique: AtomicBool::new(options.unique),
            capacity_hint: options.capacity,
            marker: PhantomData,
        }
    }

    /// Returns the capacity hint given at construction.
    #[inline]
    #[must_use]
    pub const fn capacity_hint(&self) -> usize {
        self.capacity_hint
    }

    /// Returns `true` if the array synchronizes access between threads.
    #[inline]
    #[must_use]
    pub const fn is_safe(&self) -> bool {
        S::IS_SAFE
    }

    /// Returns `true` if duplicates are currently rejected.
    #[inline]
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique.load(AtomicOrdering::Acquire)
    }

    /// Inserts every value at its ordered position.
    ///
    /// The write lock is acquired once for the whole batch, so other
    /// operations observe either none or all of the insertions. When
    /// uniqueness is enabled, values that compare equal to an element already
    /// present (including one inserted earlier in the same batch) are skipped.
    ///
    /// Returns the number of values inserted. An empty batch does not touch
    /// the lock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_array::prelude::*;
    ///
    /// let array = SortedArray::from_ord(0);
    /// assert_eq!(array.add([4, 2, 4]), 3);
    ///
    /// array.set_unique(true);
    /// assert_eq!(array.add([1, 2, 1]), 1);
    /// assert_eq!(array.slice().into_vec(), vec![1, 2, 4]);
    /// ```
    pub fn add<I>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return 0;
        }

        let mut elements = self.lock.write();
        let unique = self.is_unique();
        let mut inserted = 0;
        let mut skipped = 0;

        for value in values {
            let result = locate(&elements, &value, &self.compare);
            if unique && result.is_found() {
                skipped += 1;
                continue;
            }
            elements.insert(result.insertion_index(), value);
            inserted += 1;
        }

        trace!(inserted, skipped, length = elements.len(), "added to sorted array");
        inserted
    }

    /// Inserts a single value. Returns `false` if it was rejected as a duplicate.
    pub fn insert(&self, value: T) -> bool {
        self.add(std::iter::once(value)) == 1
    }

    /// Returns a copy of the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SortedArrayError::IndexOutOfBounds`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<T, SortedArrayError>
    where
        T: Clone,
    {
        let elements = self.lock.read();
        elements
            .get(index)
            .cloned()
            .ok_or_else(|| SortedArrayError::out_of_bounds(index, elements.len()))
    }

    /// Removes and returns the element at `index`.
    ///
    /// Removing the first or last element is O(1); any other index shifts
    /// the shorter side of the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SortedArrayError::IndexOutOfBounds`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_array::prelude::*;
    ///
    /// let array = SortedArray::from_ord(0);
    /// array.add([1, 2, 3]);
    /// assert_eq!(array.remove(1), Ok(2));
    /// assert_eq!(array.remove(2), Err(SortedArrayError::IndexOutOfBounds { index: 2, length: 2 }));
    /// ```
    pub fn remove(&self, index: usize) -> Result<T, SortedArrayError> {
        let mut elements = self.lock.write();
        let length = elements.len();

        let removed = if index == 0 {
            elements.pop_front()
        } else if Some(index) == length.checked_sub(1) {
            elements.pop_back()
        } else {
            elements.remove(index)
        };

        removed.ok_or(SortedArrayError::out_of_bounds(index, length))
    }

    /// Removes and returns the smallest element.
    ///
    /// # Errors
    ///
    /// Returns [`SortedArrayError::Empty`] if the array is empty.
    pub fn pop_left(&self) -> Result<T, SortedArrayError> {
        self.lock
            .write()
            .pop_front()
            .ok_or(SortedArrayError::Empty)
    }

    /// Removes and returns the largest element.
    ///
    /// # Errors
    ///
    /// Returns [`SortedArrayError::Empty`] if the array is empty.
    pub fn pop_right(&self) -> Result<T, SortedArrayError> {
        self.lock.write().pop_back().ok_or(SortedArrayError::Empty)
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock.read().len()
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock.read().is_empty()
    }

    /// Returns the contents in order.
    ///
    /// With a thread-safe strategy this is a copy isolated from later
    /// mutation. With [`LocalLock`] it is the live sequence; see [`Snapshot`].
    pub fn slice(&self) -> Snapshot<'_, T, S>
    where
        T: Clone,
    {
        if S::IS_SAFE {
            Snapshot::Copied(VecDeque::clone(&self.lock.read()))
        } else {
            Snapshot::Live(self.lock.read())
        }
    }

    /// Searches for `value` under the read lock.
    ///
    /// See [`SearchResult`] for how to interpret the outcome.
    #[must_use]
    pub fn search(&self, value: &T) -> SearchResult {
        let elements = self.lock.read();
        locate(&elements, value, &self.compare)
    }

    /// Returns `true` if an element comparing equal to `value` is present.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_found()
    }

    /// Enables or disables uniqueness.
    ///
    /// Enabling it on an array that allowed duplicates collapses every run of
    /// equal elements to its first element. The flag change and the
    /// deduplication happen under one write lock acquisition. Other
    /// transitions only update the flag.
    pub fn set_unique(&self, unique: bool) {
        let mut elements = self.lock.write();
        let previous = self.unique.swap(unique, AtomicOrdering::AcqRel);
        if unique && !previous {
            let removed = deduplicate(&mut elements, &self.compare);
            debug!(removed, remaining = elements.len(), "enabled uniqueness on sorted array");
        }
    }

    /// Removes every element.
    ///
    /// A non-empty array gets a fresh buffer sized by the capacity hint; an
    /// empty one is left untouched.
    pub fn clear(&self) {
        let mut elements = self.lock.write();
        if !elements.is_empty() {
            let dropped = elements.len();
            *elements = VecDeque::with_capacity(self.capacity_hint);
            trace!(dropped, "cleared sorted array");
        }
    }

    /// Runs `operation` with exclusive access to the backing sequence.
    ///
    /// The lock is released however `operation` exits, including by
    /// unwinding. The sequence must still be sorted under the array's
    /// comparator (and duplicate-free if uniqueness is enabled) when
    /// `operation` returns; debug builds assert the ordering.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_array::prelude::*;
    ///
    /// let array = SortedArray::from_ord(0);
    /// array.add([1, 2, 3, 4]);
    ///
    /// // Drop the two largest elements atomically.
    /// let dropped = array.with_write_lock(|elements| {
    ///     let keep = elements.len().saturating_sub(2);
    ///     elements.split_off(keep).len()
    /// });
    /// assert_eq!(dropped, 2);
    /// assert_eq!(array.slice().into_vec(), vec![1, 2]);
    /// ```
    pub fn with_write_lock<R, F>(&self, operation: F) -> R
    where
        F: FnOnce(&mut VecDeque<T>) -> R,
    {
        let mut elements = self.lock.write();
        let result = operation(&mut *elements);
        debug_assert!(
            is_sorted_by(&elements, &self.compare),
            "with_write_lock left the sequence unsorted"
        );
        result
    }

    /// Runs `operation` with shared access to the backing sequence.
    ///
    /// The lock is released however `operation` exits, including by
    /// unwinding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_array::prelude::*;
    ///
    /// let array = SortedArray::from_ord(0);
    /// array.add([10, 20, 30]);
    /// let total: i32 = array.with_read_lock(|elements| elements.iter().sum());
    /// assert_eq!(total, 60);
    /// ```
    pub fn with_read_lock<R, F>(&self, operation: F) -> R
    where
        F: FnOnce(&VecDeque<T>) -> R,
    {
        let elements = self.lock.read();
        operation(&*elements)
    }

    /// Consumes the array and returns its elements in order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        Vec::from(self.lock.into_inner())
    }
}

/// Collapses each run of equal elements to its first element.
///
/// Returns the number of elements removed.
fn deduplicate<T, C>(elements: &mut VecDeque<T>, compare: &C) -> usize
where
    C: Fn(&T, &T) -> Ordering,
{
    let before = elements.len();
    if before < 2 {
        return 0;
    }

    let mut kept: VecDeque<T> = VecDeque::with_capacity(elements.capacity());
    for value in elements.drain(..) {
        let duplicate = kept
            .back()
            .is_some_and(|last| compare(last, &value) == Ordering::Equal);
        if !duplicate {
            kept.push_back(value);
        }
    }
    *elements = kept;

    before - elements.len()
}

fn is_sorted_by<T, C>(elements: &VecDeque<T>, compare: &C) -> bool
where
    C: Fn(&T, &T) -> Ordering,
{
    elements
        .iter()
        .zip(elements.iter().skip(1))
        .all(|(left, right)| compare(left, right) != Ordering::Greater)
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T: Ord> Default for SortedArray<T> {
    fn default() -> Self {
        Self::from_ord(0)
    }
}

impl<T: Ord> FromIterator<T> for SortedArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let array = Self::from_ord(0);
        array.add(iter);
        array
    }
}

impl<T, C, S> Extend<T> for SortedArray<T, C, S>
where
    C: Fn(&T, &T) -> Ordering,
    S: LockStrategy<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add(iter);
    }
}

impl<T, C, S> fmt::Debug for SortedArray<T, C, S>
where
    T: fmt::Debug,
    S: LockStrategy<T>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SortedArray")
            .field("elements", &*self.lock.read())
            .field("unique", &self.unique.load(AtomicOrdering::Acquire))
            .field("safe", &S::IS_SAFE)
            .finish()
    }
}
