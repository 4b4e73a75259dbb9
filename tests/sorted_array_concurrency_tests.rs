//! Concurrency tests for the thread-safe SortedArray.
//!
//! These tests share one array between many threads and check that batch
//! insertion is atomic, that readers only observe sorted states, and that the
//! invariants hold once all threads have finished.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use rstest::rstest;
use sorted_array::prelude::*;

const THREADS: usize = 8;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn is_sorted(elements: &VecDeque<i64>) -> bool {
    elements
        .iter()
        .zip(elements.iter().skip(1))
        .all(|(left, right)| left <= right)
}

fn assert_send_sync<V: Send + Sync>() {}

#[rstest]
fn test_shared_array_is_send_sync() {
    assert_send_sync::<SortedArray<i64>>();
}

/// Test that concurrent batches all land and the result is sorted.
#[rstest]
fn test_concurrent_add_keeps_every_value() {
    init_tracing();
    let array = Arc::new(SortedArray::from_ord(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_index| {
            let array = Arc::clone(&array);
            thread::spawn(move || {
                for round in 0..50_i64 {
                    let base = (round * THREADS as i64 + thread_index as i64) * 3;
                    array.add([base + 2, base, base + 1]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer panicked");
    }

    let contents = array.slice().into_vec();
    let expected: Vec<i64> = (0..(THREADS as i64 * 50 * 3)).collect();
    assert_eq!(contents, expected);
}

/// Test that readers only ever see sorted, batch-complete states.
#[rstest]
fn test_readers_observe_whole_batches() {
    init_tracing();
    let array = Arc::new(SortedArray::from_ord(0));
    let violations = Arc::new(AtomicUsize::new(0));

    let writers: Vec<_> = (0..4_i64)
        .map(|writer| {
            let array = Arc::clone(&array);
            thread::spawn(move || {
                for round in 0..100_i64 {
                    // Every batch inserts exactly four values.
                    let base = (round * 4 + writer) * 10;
                    array.add([base + 3, base + 1, base + 2, base]);
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let array = Arc::clone(&array);
            let violations = Arc::clone(&violations);
            thread::spawn(move || {
                for _ in 0..200 {
                    let consistent = array.with_read_lock(|elements| {
                        elements.len() % 4 == 0 && is_sorted(elements)
                    });
                    if !consistent {
                        violations.fetch_add(1, Ordering::SeqCst);
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().expect("thread panicked");
    }

    assert_eq!(violations.load(Ordering::SeqCst), 0);
    assert_eq!(array.len(), 4 * 100 * 4);
}

/// Test that uniqueness holds when many threads add overlapping values.
#[rstest]
fn test_concurrent_unique_add() {
    init_tracing();
    let array = Arc::new(SortedArray::from_ord(0));
    array.set_unique(true);
    let inserted = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let array = Arc::clone(&array);
            let inserted = Arc::clone(&inserted);
            thread::spawn(move || {
                let count = array.add(0..200_i64);
                inserted.fetch_add(count, Ordering::SeqCst);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer panicked");
    }

    assert_eq!(inserted.load(Ordering::SeqCst), 200);
    assert_eq!(array.slice().into_vec(), (0..200).collect::<Vec<_>>());
}

/// Test that enabling uniqueness while writers run leaves no duplicates.
#[rstest]
fn test_set_unique_during_writes() {
    init_tracing();
    let array = Arc::new(SortedArray::from_ord(0));

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let array = Arc::clone(&array);
            thread::spawn(move || {
                for value in 0..100_i64 {
                    array.add([value % 10, value % 10]);
                }
            })
        })
        .collect();

    let toggler = {
        let array = Arc::clone(&array);
        thread::spawn(move || array.set_unique(true))
    };

    for handle in writers.into_iter().chain(std::iter::once(toggler)) {
        handle.join().expect("thread panicked");
    }

    assert!(array.is_unique());
    assert_eq!(array.slice().into_vec(), (0..10).collect::<Vec<_>>());
}

/// Test that pops from both ends drain every element exactly once.
#[rstest]
fn test_concurrent_pops_drain_exactly_once() {
    let array: Arc<SortedArray<i64>> = Arc::new((0..1_000).collect());
    let popped = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_index| {
            let array = Arc::clone(&array);
            let popped = Arc::clone(&popped);
            thread::spawn(move || {
                let mut previous: Option<i64> = None;
                loop {
                    let result = if thread_index % 2 == 0 {
                        array.pop_left()
                    } else {
                        array.pop_right()
                    };
                    match result {
                        Ok(value) => {
                            // Each thread sees a monotonic stream from its end.
                            if let Some(previous) = previous {
                                assert!(if thread_index % 2 == 0 {
                                    value > previous
                                } else {
                                    value < previous
                                });
                            }
                            previous = Some(value);
                            popped.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(error) => {
                            assert_eq!(error, SortedArrayError::Empty);
                            break;
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("popper panicked");
    }

    assert_eq!(popped.load(Ordering::SeqCst), 1_000);
    assert!(array.is_empty());
}

/// Test that a write section is atomic relative to other writers.
#[rstest]
fn test_with_write_lock_is_atomic() {
    let array = Arc::new(SortedArray::from_ord(0));
    array.add([0_i64]);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let array = Arc::clone(&array);
            thread::spawn(move || {
                for _ in 0..100 {
                    // Read-modify-write of the largest element.
                    array.with_write_lock(|elements| {
                        let next = elements.back().copied().unwrap_or_default() + 1;
                        elements.push_back(next);
                    });
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer panicked");
    }

    let expected: Vec<i64> = (0..=(THREADS as i64 * 100)).collect();
    assert_eq!(array.slice().into_vec(), expected);
}
