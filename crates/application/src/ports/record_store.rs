use sluice_dns_domain::{DnsQuestion, DnsRecord, RecordType};

/// Key-value-with-expiry store behind the resolution engine.
///
/// Entries are keyed by `(name, type)`; several values may live under one
/// key. Every read filters out expired entries regardless of whether a sweep
/// has run, and hands back owned copies.
pub trait RecordStore: Send + Sync {
    /// Valid records for the question, `None` when there are none.
    fn get(&self, question: &DnsQuestion) -> Option<Vec<DnsRecord>>;

    /// Insert, or refresh the expiry of an identical `(name, type, value)`.
    fn set(&self, record: DnsRecord);

    /// Remove the whole key when `value` is `None` or empty, otherwise only
    /// the matching values. Returns how many entries went away.
    fn delete(&self, name: &str, record_type: RecordType, value: Option<&str>) -> usize;

    /// Every currently valid record.
    fn list(&self) -> Vec<DnsRecord>;

    /// Physically drop expired entries. Returns how many were removed.
    fn sweep(&self) -> usize;

    /// Number of stored entries, expired ones included until swept.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
