use super::metrics::CacheMetrics;
use super::store::MemoryRecordStore;
use sluice_dns_application::clock;
use tracing::debug;

/// Extension methods for MemoryRecordStore compaction
impl MemoryRecordStore {
    /// Physically remove every expired record, dropping keys left empty.
    ///
    /// Only the shard being visited is locked at any time. Returns the
    /// number of records removed.
    pub fn compact(&self) -> usize {
        let now = clock::now();
        let mut removed = 0;

        self.records.retain(|_key, set| {
            let before = set.len();
            set.retain(|record| record.is_valid_at(now));
            removed += before - set.len();
            !set.is_empty()
        });

        if removed > 0 {
            CacheMetrics::bump(&self.metrics.swept, removed as u64);
            debug!(
                removed,
                keys = self.records.len(),
                "Record store compaction completed"
            );
        }

        removed
    }
}
