//! Concurrency specs
//!
//! Verify sequencing and delivery with many producers and a racing subscriber.

use crate::prelude::*;
#[allow(unused_imports)]
use crate::prelude::assert_eq;
use std::collections::BTreeSet;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 4;
const PER_THREAD: usize = 100;

#[test]
fn concurrent_producers_get_unique_dense_sequences() {
    let h = Harness::with_config(LogConfig::new().with_capacity(THREADS * PER_THREAD));
    let sink = h.observe();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = h.logger.clone();
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|i| {
                        logger
                            .info(Event::message("t{0} i{1}").arg(t).arg(i))
                            .unwrap()
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut returned: Vec<i64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    returned.sort_unstable();

    let expected: Vec<i64> = (0..(THREADS * PER_THREAD) as i64).collect();
    assert_eq!(returned, expected);

    let mut delivered = sink.sequences();
    delivered.sort_unstable();
    assert_eq!(delivered, expected);
}

#[test]
fn sink_added_mid_stream_sees_each_entry_once() {
    let total = THREADS * PER_THREAD;
    let h = Harness::with_config(LogConfig::new().with_capacity(total));
    let barrier = Arc::new(Barrier::new(THREADS + 1));

    let producers: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = h.logger.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..PER_THREAD {
                    logger.info("tick").unwrap();
                }
            })
        })
        .collect();

    barrier.wait();
    let late = MemorySink::new();
    h.logger.add_sink(late.clone());

    for p in producers {
        p.join().unwrap();
    }

    let sequences = late.sequences();
    let unique: BTreeSet<i64> = sequences.iter().copied().collect();
    assert_eq!(unique.len(), sequences.len(), "duplicate delivery");
    assert_eq!(unique.len(), total);
}

#[test]
fn backlog_window_is_exact_after_concurrent_writes() {
    let h = Harness::with_config(LogConfig::new().with_capacity(16));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = h.logger.clone();
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    logger.trace("x").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let last = (THREADS * PER_THREAD) as i64 - 1;
    let expected: Vec<i64> = (last - 15..=last).collect();
    assert_eq!(h.observe().sequences(), expected);
}
