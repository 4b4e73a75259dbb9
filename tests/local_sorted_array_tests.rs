//! Tests for sorted arrays built on the single-threaded `LocalLock` strategy.

use std::panic::{AssertUnwindSafe, catch_unwind};

use rstest::rstest;
use sorted_array::prelude::*;
use sorted_array::sync::LocalLock;

#[rstest]
fn test_new_local_is_not_safe() {
    let array = SortedArray::new_local(4, i32::cmp);
    assert!(!array.is_safe());
    assert_eq!(array.capacity_hint(), 4);
}

#[rstest]
fn test_local_scenario_matches_shared() {
    let array: LocalSortedArray<i32, _> = SortedArray::new_local(0, i32::cmp);
    array.add([5, 3, 8, 3]);
    assert_eq!(array.slice().into_vec(), vec![3, 3, 5, 8]);

    array.set_unique(true);
    assert_eq!(array.slice().into_vec(), vec![3, 5, 8]);
    assert_eq!(array.search(&5).found(), Some(1));
    assert_eq!(array.remove(0), Ok(3));
    assert_eq!(array.pop_right(), Ok(8));
    assert_eq!(array.pop_left(), Ok(5));
    assert_eq!(array.pop_left(), Err(SortedArrayError::Empty));
}

#[rstest]
fn test_local_slice_is_live_view() {
    let array = SortedArray::new_local(0, i32::cmp);
    array.add([2, 1]);

    let snapshot = array.slice();
    assert!(snapshot.is_live());
    assert_eq!(snapshot.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    // Reads may overlap the live view.
    assert_eq!(array.len(), 2);
    assert_eq!(array.get(1), Ok(2));
}

#[rstest]
fn test_local_snapshot_into_vec_releases_borrow() {
    let array = SortedArray::new_local(0, i32::cmp);
    array.add([1]);

    let copied = array.slice().into_vec();
    array.add([0]);

    assert_eq!(copied, vec![1]);
    assert_eq!(array.slice().into_vec(), vec![0, 1]);
}

#[rstest]
#[should_panic(expected = "already")]
fn test_local_mutation_during_live_snapshot_panics() {
    let array = SortedArray::new_local(0, i32::cmp);
    array.add([1]);

    let _snapshot = array.slice();
    array.add([2]);
}

#[rstest]
#[should_panic(expected = "already")]
fn test_local_mutation_inside_read_section_panics() {
    let array = SortedArray::new_local(0, i32::cmp);
    array.with_read_lock(|_| array.clear());
}

#[rstest]
fn test_local_lock_released_after_panic() {
    let array = SortedArray::new_local(0, i32::cmp);
    array.add([1, 2, 3]);

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        array.with_write_lock(|_| panic!("aborted"));
    }));

    assert!(outcome.is_err());
    assert_eq!(array.pop_right(), Ok(3));
}

#[rstest]
fn test_local_array_can_move_between_threads() {
    let array = SortedArray::new_local(0, i32::cmp);
    array.add([3, 1]);

    let handle = std::thread::spawn(move || {
        array.add([2]);
        array.into_vec()
    });

    assert_eq!(handle.join().unwrap(), vec![1, 2, 3]);
}

#[rstest]
fn test_with_strategy_builds_local_array() {
    let array: SortedArray<i32, _, LocalLock<i32>> = SortedArray::with_strategy(
        SortedArrayOptions::new().with_capacity(2).with_unique(true),
        i32::cmp,
    );
    array.add([1, 1, 2]);
    assert_eq!(array.len(), 2);
    assert!(!array.is_safe());
}

#[rstest]
fn test_local_with_options() {
    let array = SortedArray::local_with_options(SortedArrayOptions::new().with_unique(true), i32::cmp);
    array.add([9, 9]);
    assert_eq!(array.slice().into_vec(), vec![9]);
}
