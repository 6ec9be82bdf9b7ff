use super::{CacheKey, CacheMetrics};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use sluice_dns_application::clock;
use sluice_dns_application::ports::RecordStore;
use sluice_dns_domain::{fqdn, DnsQuestion, DnsRecord, RecordType};
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, info};

/// Records stored under one key. Most keys hold one or two values.
pub(crate) type RecordSet = SmallVec<[DnsRecord; 2]>;

/// In-memory TTL store.
///
/// A sharded map keyed by (name, type); each key holds every value seen for
/// it. Expired records stay in place until [`MemoryRecordStore::compact`]
/// runs, but reads never return them. Readers get owned copies.
pub struct MemoryRecordStore {
    pub(crate) records: DashMap<CacheKey, RecordSet, FxBuildHasher>,
    pub(crate) metrics: Arc<CacheMetrics>,
}

impl MemoryRecordStore {
    pub fn new(initial_capacity: usize) -> Self {
        info!(initial_capacity, "Initializing record store");

        Self {
            records: DashMap::with_capacity_and_hasher(initial_capacity, FxBuildHasher::default()),
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn hit_rate(&self) -> f64 {
        self.metrics.hit_rate()
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RecordStore for MemoryRecordStore {
    fn get(&self, question: &DnsQuestion) -> Option<Vec<DnsRecord>> {
        let now = clock::now();
        let valid: Vec<DnsRecord> = self
            .records
            .get(&CacheKey::from(question))
            .map(|set| {
                set.iter()
                    .filter(|record| record.is_valid_at(now))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if valid.is_empty() {
            CacheMetrics::bump(&self.metrics.misses, 1);
            None
        } else {
            CacheMetrics::bump(&self.metrics.hits, 1);
            Some(valid)
        }
    }

    fn set(&self, mut record: DnsRecord) {
        record.name = fqdn(&record.name);
        record.refresh(clock::now());

        let key = CacheKey::new(&record.name, record.record_type);
        let mut set = self.records.entry(key).or_default();

        if let Some(existing) = set.iter_mut().find(|r| r.same_entry(&record)) {
            *existing = record;
            CacheMetrics::bump(&self.metrics.refreshes, 1);
        } else {
            debug!(
                domain = %record.name,
                record_type = %record.record_type,
                value = %record.value,
                ttl = record.ttl,
                "Record stored"
            );
            set.push(record);
            CacheMetrics::bump(&self.metrics.insertions, 1);
        }
    }

    fn delete(&self, name: &str, record_type: RecordType, value: Option<&str>) -> usize {
        let key = CacheKey::new(&fqdn(name), record_type);

        let removed = match value.filter(|v| !v.is_empty()) {
            None => self
                .records
                .remove(&key)
                .map(|(_, set)| set.len())
                .unwrap_or(0),
            Some(value) => {
                let removed = match self.records.get_mut(&key) {
                    Some(mut set) => {
                        let before = set.len();
                        set.retain(|r| r.value != value);
                        before - set.len()
                    }
                    None => 0,
                };
                self.records.remove_if(&key, |_, set| set.is_empty());
                removed
            }
        };

        if removed > 0 {
            CacheMetrics::bump(&self.metrics.deletions, removed as u64);
        }
        removed
    }

    fn list(&self) -> Vec<DnsRecord> {
        let now = clock::now();
        self.records
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|record| record.is_valid_at(now))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn sweep(&self) -> usize {
        self.compact()
    }

    fn len(&self) -> usize {
        self.records.iter().map(|entry| entry.value().len()).sum()
    }
}
