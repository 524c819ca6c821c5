//! WidgetDb shared across threads

use std::sync::{Arc, Barrier};
use std::thread;

use crate::common::*;

#[test]
fn test_concurrent_top_placement_yields_distinct_z() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 50;

    let db = open_shared_db();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let db = Arc::clone(&db);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..PER_THREAD {
                    db.create(CreateWidget::new(0, 0, 1, 1)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let zs = z_indexes(&db);
    assert_eq!(zs.len(), THREADS * PER_THREAD);
    let base = i32::MIN + 1;
    let expected: Vec<i32> = (0..(THREADS * PER_THREAD) as i32).map(|i| base + i).collect();
    assert_eq!(zs, expected);
}

#[test]
fn test_concurrent_front_insertion_keeps_order_unique() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 50;

    let db = open_shared_db();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let db = Arc::clone(&db);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    let x = (t * PER_THREAD + i) as i32;
                    db.create(CreateWidget::new(x, 0, 1, 1).with_z_index(0))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let expected: Vec<i32> = (0..(THREADS * PER_THREAD) as i32).collect();
    assert_eq!(z_indexes(&db), expected);
}
