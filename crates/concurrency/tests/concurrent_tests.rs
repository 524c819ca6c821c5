//! Concurrent/Multi-threaded Tests for widgetdb-concurrency
//!
//! These tests verify the store under actual concurrent execution:
//!
//! 1. **Atomic Blocks** - other callers make no progress while a block runs
//! 2. **Concurrent Adds** - racing adds on one zIndex admit exactly one winner
//! 3. **Reader Consistency** - readers never see a half-applied mutation
//! 4. **Stress Testing** - mixed load leaves the indexes consistent
//!
//! ## Running These Tests
//!
//! ```bash
//! cargo test -p widgetdb-concurrency --test concurrent_tests
//! cargo test -p widgetdb-concurrency --test concurrent_tests -- --nocapture --test-threads=1
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use rand::Rng;
use widgetdb_concurrency::InMemoryWidgetStore;
use widgetdb_core::{
    Area, AtomicScope, NewWidget, SequentialIds, Timestamp, Widget, WidgetBuilder,
    WidgetRepository,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_store() -> Arc<InMemoryWidgetStore<i64>> {
    Arc::new(InMemoryWidgetStore::new(SequentialIds::default()))
}

fn new_widget(x: i32, y: i32, z_index: i32) -> NewWidget {
    NewWidget::new(x, y, z_index, 10, 10, Timestamp::now()).unwrap()
}

// ============================================================================
// SECTION 1: Atomic Blocks
// ============================================================================

mod atomic_blocks {
    use super::*;

    /// A block that reads, waits for a competing writer to start, then reads
    /// again must see identical state both times.
    #[test]
    fn test_block_sees_stable_state_while_writer_waits() {
        let store = create_store();
        let seeded = store.add(new_widget(0, 0, 5)).unwrap();

        let entered = Arc::new(Barrier::new(2));
        let writer_done = Arc::new(AtomicBool::new(false));

        let writer = {
            let store = Arc::clone(&store);
            let entered = Arc::clone(&entered);
            let writer_done = Arc::clone(&writer_done);
            thread::spawn(move || {
                entered.wait();
                store.add(new_widget(0, 0, 100)).unwrap();
                let moved = WidgetBuilder::from(&store.get_by_id(&0).unwrap())
                    .with_x(50)
                    .build()
                    .unwrap();
                store.save(moved).unwrap();
                writer_done.store(true, Ordering::SeqCst);
            })
        };

        let (before, after, writer_finished_inside) = store.run_atomically(|scope| {
            let before = (scope.get_max_z_index(), scope.get_by_id(seeded.id()));
            entered.wait();
            thread::sleep(Duration::from_millis(50));
            let after = (scope.get_max_z_index(), scope.get_by_id(seeded.id()));
            (before, after, writer_done.load(Ordering::SeqCst))
        });
        writer.join().unwrap();

        assert_eq!(before, after);
        assert_eq!(before.0, Some(5));
        assert!(!writer_finished_inside);

        assert_eq!(store.get_max_z_index(), Some(100));
        assert_eq!(store.get_by_id(seeded.id()).unwrap().x(), 50);
    }

    /// A reader queued behind an atomic block observes the block's final state.
    #[test]
    fn test_reader_waits_for_block() {
        let store = create_store();
        let entered = Arc::new(Barrier::new(2));

        let reader = {
            let store = Arc::clone(&store);
            let entered = Arc::clone(&entered);
            thread::spawn(move || {
                entered.wait();
                store.len()
            })
        };

        store.run_atomically(|scope| {
            entered.wait();
            thread::sleep(Duration::from_millis(20));
            scope.add(new_widget(0, 0, 0)).unwrap();
            scope.add(new_widget(0, 0, 1)).unwrap();
        });

        assert_eq!(reader.join().unwrap(), 2);
    }

    /// Concurrent create-at-front blocks never collide on a zIndex.
    #[test]
    fn test_concurrent_shift_then_add_blocks() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 25;

        let store = create_store();
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..PER_THREAD {
                        store
                            .run_atomically(|scope| {
                                scope.shift_upwards(0)?;
                                scope.add(new_widget(0, 0, 0))
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let zs: Vec<i32> = store.get_all().iter().map(Widget::z_index).collect();
        let expected: Vec<i32> = (0..(THREADS * PER_THREAD) as i32).collect();
        assert_eq!(zs, expected);
        assert!(store.is_consistent());
    }
}

// ============================================================================
// SECTION 2: Concurrent Adds
// ============================================================================

mod concurrent_adds {
    use super::*;

    #[test]
    fn test_one_winner_per_z_index() {
        const THREADS: usize = 16;

        let store = create_store();
        let barrier = Arc::new(Barrier::new(THREADS));
        let winners = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                let winners = Arc::clone(&winners);
                thread::spawn(move || {
                    barrier.wait();
                    match store.add(new_widget(0, 0, 42)) {
                        Ok(_) => {
                            winners.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(err) => assert!(err.is_conflict()),
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_distinct_z_indexes_all_succeed() {
        const THREADS: i32 = 8;
        const PER_THREAD: i32 = 50;

        let store = create_store();
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        store.add(new_widget(i, t, t * PER_THREAD + i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), (THREADS * PER_THREAD) as usize);
        let ids: std::collections::HashSet<i64> =
            store.get_all().into_iter().map(Widget::into_id).collect();
        assert_eq!(ids.len(), (THREADS * PER_THREAD) as usize);
    }
}

// ============================================================================
// SECTION 3: Reader Consistency
// ============================================================================

mod reader_consistency {
    use super::*;

    /// A writer moves one widget back and forth; area readers must always find
    /// it in exactly one of the two spots.
    #[test]
    fn test_area_reads_never_see_partial_move() {
        let store = create_store();
        let widget = store.add(new_widget(0, 0, 0)).unwrap();
        let home = Area::new(0, 10, 0, 10).unwrap();
        let away = Area::new(100, 110, 0, 10).unwrap();
        let stop = Arc::new(AtomicBool::new(false));

        let writer = {
            let store = Arc::clone(&store);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut x = 0;
                while !stop.load(Ordering::Relaxed) {
                    x = if x == 0 { 100 } else { 0 };
                    let moved = WidgetBuilder::from(&widget).with_x(x).build().unwrap();
                    store.save(moved).unwrap();
                }
            })
        };

        for _ in 0..2_000 {
            let seen = store.run_atomically(|scope| {
                scope.get_in_area(&home).len() + scope.get_in_area(&away).len()
            });
            assert_eq!(seen, 1);
        }
        stop.store(true, Ordering::Relaxed);
        writer.join().unwrap();
        assert!(store.is_consistent());
    }

    #[test]
    fn test_max_z_matches_get_all_under_load() {
        let store = create_store();
        let stop = Arc::new(AtomicBool::new(false));

        let writer = {
            let store = Arc::clone(&store);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut z = 0;
                while !stop.load(Ordering::Relaxed) && z < 5_000 {
                    store.add(new_widget(0, 0, z)).unwrap();
                    z += 1;
                }
            })
        };

        for _ in 0..500 {
            let (max, last) = store.run_atomically(|scope| {
                (scope.get_max_z_index(), scope.get_all().last().map(Widget::z_index))
            });
            assert_eq!(max, last);
        }
        stop.store(true, Ordering::Relaxed);
        writer.join().unwrap();
    }
}

// ============================================================================
// SECTION 4: Stress Testing
// ============================================================================

mod stress {
    use super::*;

    #[test]
    fn test_mixed_operations_keep_indexes_consistent() {
        const THREADS: usize = 6;
        const OPS: usize = 400;

        let store = create_store();
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let mut rng = rand::thread_rng();
                    barrier.wait();
                    for _ in 0..OPS {
                        let z = rng.gen_range(-50..50);
                        match rng.gen_range(0..5) {
                            0 => {
                                let _ = store.add(new_widget(rng.gen_range(-100..100), 0, z));
                            }
                            1 => {
                                store
                                    .run_atomically(|scope| {
                                        scope.shift_upwards(z)?;
                                        scope.add(new_widget(0, rng.gen_range(-100..100), z))
                                    })
                                    .unwrap();
                            }
                            2 => {
                                if let Some(widget) = store.get_all().first() {
                                    let moved = WidgetBuilder::from(widget)
                                        .with_x(rng.gen_range(-100..100))
                                        .with_z_index(z)
                                        .build()
                                        .unwrap();
                                    let _ = store.save(moved);
                                }
                            }
                            3 => {
                                if let Some(widget) = store.get_all().last() {
                                    store.delete_by_id(widget.id());
                                }
                            }
                            _ => {
                                let area = Area::new(-100, 110, -100, 110).unwrap();
                                let found = store.get_in_area(&area);
                                assert!(found.windows(2).all(|w| w[0].z_index() < w[1].z_index()));
                            }
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(store.is_consistent());
    }
}
