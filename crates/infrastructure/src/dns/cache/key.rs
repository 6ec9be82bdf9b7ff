use sluice_dns_domain::{DnsQuestion, RecordType};
use std::sync::Arc;

/// Store key: owner name and record type.
///
/// The name is shared with the question it came from, so lookups do not
/// copy it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub name: Arc<str>,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(name: &str, record_type: RecordType) -> Self {
        Self {
            name: Arc::from(name),
            record_type,
        }
    }
}

impl From<&DnsQuestion> for CacheKey {
    #[inline]
    fn from(question: &DnsQuestion) -> Self {
        Self {
            name: Arc::clone(&question.name),
            record_type: question.record_type,
        }
    }
}
