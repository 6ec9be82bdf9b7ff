use super::RecordType;
use std::time::{Duration, Instant};

/// A resource record as cached and served.
///
/// `value` holds the type-specific textual encoding (dotted IPv4 for A,
/// FQDN for NS/CNAME/PTR, `"<pref> <exchange>"` for MX, space-joined strings
/// for TXT). `ttl` is the origin TTL and never changes once stored; only
/// `expires_at` moves when the record is refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: String,
    pub record_type: RecordType,
    pub value: String,
    pub ttl: u32,
    pub expires_at: Instant,
}

impl DnsRecord {
    /// Create a record expiring `ttl` seconds from now.
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self::stamped(name, record_type, value, ttl, Instant::now())
    }

    /// Create a record expiring `ttl` seconds after `now`.
    pub fn stamped(
        name: impl Into<String>,
        record_type: RecordType,
        value: impl Into<String>,
        ttl: u32,
        now: Instant,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            value: value.into(),
            ttl,
            expires_at: now + Duration::from_secs(u64::from(ttl)),
        }
    }

    /// Re-anchor the expiry at `now + ttl`.
    pub fn refresh(&mut self, now: Instant) {
        self.expires_at = now + Duration::from_secs(u64::from(self.ttl));
    }

    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    /// Whole seconds left before expiry, zero once expired.
    pub fn remaining_ttl(&self, now: Instant) -> u32 {
        let secs = self.expires_at.saturating_duration_since(now).as_secs();
        u32::try_from(secs).unwrap_or(u32::MAX)
    }

    /// Copy of this record whose `ttl` is the time left at `now`.
    pub fn with_remaining_ttl(&self, now: Instant) -> Self {
        Self {
            ttl: self.remaining_ttl(now),
            ..self.clone()
        }
    }

    /// True when name, type and value all match.
    pub fn same_entry(&self, other: &DnsRecord) -> bool {
        self.record_type == other.record_type && self.value == other.value && self.name == other.name
    }
}
