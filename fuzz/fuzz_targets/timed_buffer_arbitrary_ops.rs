#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use listgauge::ds::TimedBuffer;

// Fuzz arbitrary operation sequences on TimedBuffer
//
// Drives push, evict, and clear with a clock that mostly moves forward but
// may step backwards. The count bound and insertion order are checked after
// every step; the full invariants are checked while time has only moved
// forward since the last clear.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let max_items = usize::from(data[0] % 33);
    let max_staleness = Duration::from_millis(u64::from(data[1]) * 4);
    let mut buffer = TimedBuffer::new(max_items, max_staleness);

    let mut now: u64 = 1_000;
    let mut monotonic = true;
    let mut next_value: u32 = 0;

    let mut idx = 2;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let arg = u64::from(data[idx + 1]);

        match op {
            0..=3 => {
                // Push at the current instant
                buffer.push(next_value, now);
                next_value += 1;
            }
            4 | 5 => {
                // Advance time and evict
                now += arg;
                buffer.evict(now);
            }
            6 => {
                // Step the clock backwards
                now = now.saturating_sub(arg);
                monotonic = false;
            }
            _ => {
                buffer.clear();
                monotonic = true;
            }
        }

        assert!(buffer.len() <= max_items);
        let values = buffer.values();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        if monotonic {
            assert!(buffer.check_invariants(now).is_ok());
        }

        idx += 2;
    }
});
