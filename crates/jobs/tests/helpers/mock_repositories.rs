#![allow(dead_code)]

use sluice_dns_application::ports::RecordStore;
use sluice_dns_domain::{DnsQuestion, DnsRecord, RecordType};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Store that only counts sweeps and reports a fixed number removed each time.
pub struct CountingStore {
    sweeps: AtomicUsize,
    removed_per_sweep: usize,
}

impl CountingStore {
    pub fn new(removed_per_sweep: usize) -> Self {
        Self {
            sweeps: AtomicUsize::new(0),
            removed_per_sweep,
        }
    }

    pub fn sweeps(&self) -> usize {
        self.sweeps.load(Ordering::SeqCst)
    }
}

impl RecordStore for CountingStore {
    fn get(&self, _question: &DnsQuestion) -> Option<Vec<DnsRecord>> {
        None
    }

    fn set(&self, _record: DnsRecord) {}

    fn delete(&self, _name: &str, _record_type: RecordType, _value: Option<&str>) -> usize {
        0
    }

    fn list(&self) -> Vec<DnsRecord> {
        Vec::new()
    }

    fn sweep(&self) -> usize {
        self.sweeps.fetch_add(1, Ordering::SeqCst);
        self.removed_per_sweep
    }

    fn len(&self) -> usize {
        0
    }
}
