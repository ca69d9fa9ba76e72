// ==============================================
// LIST GAUGE CONCURRENCY TESTS (integration)
// ==============================================
//
// Multi-threaded producers and readers sharing one gauge. These need real
// threads and cannot live inline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use listgauge::gauge::ListGauge;

const THREAD_TEST_TIMEOUT: Duration = Duration::from_secs(10);

// ==============================================
// Two Producers
// ==============================================

mod two_producers {
    use super::*;

    #[test]
    fn keeps_last_twenty_values() {
        let gauge: Arc<ListGauge<(&'static str, u32)>> =
            Arc::new(ListGauge::new("listGauge", 20, Duration::from_secs(3600)));

        let spawn = |tag: &'static str| {
            let gauge = Arc::clone(&gauge);
            thread::spawn(move || {
                for i in 1..=100 {
                    gauge.add((tag, i));
                }
            })
        };
        let thread1 = spawn("thread1");
        let thread2 = spawn("key");

        thread1.join().unwrap();
        thread2.join().unwrap();

        let snapshot = gauge.snapshot();
        assert_eq!(snapshot.len(), 20, "ListGauge should have the last 20 values");
        for (tag, value) in snapshot.iter() {
            assert!(
                *value > 80 && *value <= 100,
                "{tag}:{value} should be within the last 20 of its producer"
            );
        }
    }
}

// ==============================================
// Many Producers, Concurrent Readers
// ==============================================

mod many_producers {
    use super::*;

    const PRODUCERS: usize = 8;
    const PER_PRODUCER: u64 = 2_000;
    const MAX_ITEMS: usize = 64;

    #[test]
    fn snapshots_stay_bounded_and_ordered_per_producer() {
        let gauge: Arc<ListGauge<(usize, u64)>> =
            Arc::new(ListGauge::new("stress", MAX_ITEMS, Duration::from_secs(3600)));
        let barrier = Arc::new(Barrier::new(PRODUCERS + 1));
        let done = Arc::new(AtomicBool::new(false));

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|id| {
                let gauge = Arc::clone(&gauge);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for seq in 0..PER_PRODUCER {
                        gauge.add((id, seq));
                    }
                })
            })
            .collect();

        let reader = {
            let gauge = Arc::clone(&gauge);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut reads = 0usize;
                while !done.load(Ordering::Acquire) {
                    let snapshot = gauge.snapshot();
                    assert!(snapshot.len() <= MAX_ITEMS);

                    // Sequential adds from one producer must appear in order.
                    let mut last_seen = [None::<u64>; PRODUCERS];
                    for &(id, seq) in snapshot.iter() {
                        if let Some(prev) = last_seen[id] {
                            assert!(seq > prev, "producer {id}: {seq} after {prev}");
                        }
                        last_seen[id] = Some(seq);
                    }
                    reads += 1;
                }
                reads
            })
        };

        barrier.wait();
        for producer in producers {
            producer.join().unwrap();
        }
        done.store(true, Ordering::Release);
        let reads = reader.join().unwrap();
        assert!(reads > 0);

        let snapshot = gauge.snapshot();
        assert_eq!(snapshot.len(), MAX_ITEMS);
        let min_kept = PER_PRODUCER - MAX_ITEMS as u64;
        assert!(snapshot.iter().all(|&(_, seq)| seq >= min_kept));
    }

    #[test]
    fn snapshot_taken_mid_stream_is_never_mutated() {
        let gauge: Arc<ListGauge<u64>> =
            Arc::new(ListGauge::new("frozen", 16, Duration::from_secs(3600)));
        for i in 0..16 {
            gauge.add(i);
        }
        let frozen = gauge.snapshot();
        let expected = frozen.to_vec();

        let writer = {
            let gauge = Arc::clone(&gauge);
            thread::spawn(move || {
                for i in 100..1_100 {
                    gauge.add(i);
                }
            })
        };
        writer.join().unwrap();

        assert_eq!(frozen.to_vec(), expected);
        assert_ne!(gauge.snapshot().to_vec(), expected);
    }
}

// ==============================================
// Send / Sync
// ==============================================

mod thread_safety_bounds {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn gauge_and_snapshot_are_shareable() {
        assert_send_sync::<ListGauge<String>>();
        assert_send_sync::<listgauge::snapshot::ListGaugeSnapshot<String>>();
    }

    #[test]
    fn join_within_timeout() {
        let gauge = Arc::new(ListGauge::new("timed", 4, Duration::from_secs(60)));
        let handle = {
            let gauge = Arc::clone(&gauge);
            thread::spawn(move || {
                for i in 0..10_000u32 {
                    gauge.add(i);
                }
            })
        };
        let start = std::time::Instant::now();
        handle.join().unwrap();
        assert!(start.elapsed() < THREAD_TEST_TIMEOUT);
        assert_eq!(gauge.snapshot().as_slice(), &[9_996, 9_997, 9_998, 9_999]);
    }
}
