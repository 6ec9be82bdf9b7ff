#![allow(dead_code)]

use async_trait::async_trait;
use sluice_dns_application::clock;
use sluice_dns_application::ports::{RecordStore, ResolutionStrategy};
use sluice_dns_domain::{DnsQuestion, DnsRecord, DnsResponse, DomainError, RecordType};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock RecordStore
// ============================================================================

#[derive(Default)]
pub struct MockRecordStore {
    records: Mutex<HashMap<(String, RecordType), Vec<DnsRecord>>>,
    sets: AtomicUsize,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

impl RecordStore for MockRecordStore {
    fn get(&self, question: &DnsQuestion) -> Option<Vec<DnsRecord>> {
        let now = clock::now();
        let records = self.records.lock().unwrap();
        let valid: Vec<DnsRecord> = records
            .get(&(question.name.to_string(), question.record_type))?
            .iter()
            .filter(|r| r.is_valid_at(now))
            .cloned()
            .collect();
        (!valid.is_empty()).then_some(valid)
    }

    fn set(&self, mut record: DnsRecord) {
        self.sets.fetch_add(1, Ordering::SeqCst);
        record.refresh(clock::now());
        let mut records = self.records.lock().unwrap();
        let entries = records
            .entry((record.name.clone(), record.record_type))
            .or_default();
        entries.retain(|r| !r.same_entry(&record));
        entries.push(record);
    }

    fn delete(&self, name: &str, record_type: RecordType, _value: Option<&str>) -> usize {
        self.records
            .lock()
            .unwrap()
            .remove(&(name.to_string(), record_type))
            .map(|v| v.len())
            .unwrap_or(0)
    }

    fn list(&self) -> Vec<DnsRecord> {
        self.records.lock().unwrap().values().flatten().cloned().collect()
    }

    fn sweep(&self) -> usize {
        let now = clock::now();
        let mut removed = 0;
        for entries in self.records.lock().unwrap().values_mut() {
            let before = entries.len();
            entries.retain(|r| r.is_valid_at(now));
            removed += before - entries.len();
        }
        removed
    }

    fn len(&self) -> usize {
        self.records.lock().unwrap().values().map(Vec::len).sum()
    }
}

// ============================================================================
// Mock ResolutionStrategy
// ============================================================================

pub struct MockStrategy {
    outcome: Mutex<Result<DnsResponse, DomainError>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockStrategy {
    pub fn answering(records: Vec<DnsRecord>) -> Self {
        Self {
            outcome: Mutex::new(Ok(DnsResponse::success(records))),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            outcome: Mutex::new(Err(error)),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResolutionStrategy for MockStrategy {
    async fn resolve(&self, _question: &DnsQuestion) -> Result<DnsResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.lock().unwrap().clone()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

pub fn a_record(name: &str, ip: &str, ttl: u32) -> DnsRecord {
    DnsRecord::new(name, RecordType::A, ip, ttl)
}
