//! Concurrency tests for openmotion-atomic.
//!
//! These tests verify thread-safety properties of the counters and the
//! latest-value mailbox.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use openmotion_atomic::{FilterCounters, Mailbox};

#[test]
fn test_concurrent_increment_single_counter() {
    let counters = Arc::new(FilterCounters::new());
    let num_threads: u64 = 8;
    let increments_per_thread: u64 = 10_000;

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let counters = Arc::clone(&counters);
            thread::spawn(move || {
                for _ in 0..increments_per_thread {
                    counters.inc_filtered();
                }
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().is_ok(), "thread panicked unexpectedly");
    }

    assert_eq!(
        counters.snapshot().samples_filtered,
        num_threads * increments_per_thread
    );
}

#[test]
fn test_snapshot_and_reset_loses_nothing() {
    let counters = Arc::new(FilterCounters::new());
    let increments: u64 = 50_000;

    let writer = {
        let counters = Arc::clone(&counters);
        thread::spawn(move || {
            for _ in 0..increments {
                counters.inc_rejected();
            }
        })
    };

    let mut collected = 0u64;
    while !writer.is_finished() {
        collected += counters.snapshot_and_reset().samples_rejected;
    }
    assert!(writer.join().is_ok(), "writer panicked unexpectedly");
    collected += counters.snapshot_and_reset().samples_rejected;

    assert_eq!(collected, increments);
}

#[test]
fn test_mailbox_reader_only_sees_whole_values() {
    // Each published value is a pair whose halves must always match.
    let mailbox: Arc<Mailbox<(u64, u64)>> = Arc::new(Mailbox::new());
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let mailbox = Arc::clone(&mailbox);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for i in 0..20_000u64 {
                mailbox.publish((i, i.wrapping_mul(3)));
            }
            done.store(true, Ordering::Release);
        })
    };

    let mut last_seen = None;
    loop {
        if let Some((a, b)) = mailbox.take() {
            assert_eq!(b, a.wrapping_mul(3), "torn value observed");
            if let Some(prev) = last_seen {
                assert!(a > prev, "mailbox went backwards: {prev} then {a}");
            }
            last_seen = Some(a);
        } else if done.load(Ordering::Acquire) && !mailbox.is_pending() {
            break;
        }
    }

    assert!(writer.join().is_ok(), "writer panicked unexpectedly");
    assert_eq!(last_seen, Some(19_999));
}
