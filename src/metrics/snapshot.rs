/// Point-in-time copy of a gauge's self-instrumentation counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListGaugeMetricsSnapshot {
    pub add_calls: u64,
    pub snapshot_calls: u64,
    pub evict_calls: u64, // one per add and one per snapshot
    pub size_evictions: u64,
    pub age_evictions: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub max_items: usize,
}

impl ListGaugeMetricsSnapshot {
    /// Total entries dropped by either eviction stage.
    #[inline]
    pub fn evicted_entries(&self) -> u64 {
        self.size_evictions + self.age_evictions
    }
}
