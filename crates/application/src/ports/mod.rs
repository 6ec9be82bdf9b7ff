mod record_store;
mod resolution_strategy;

pub use record_store::RecordStore;
pub use resolution_strategy::ResolutionStrategy;

// Re-export for convenience
pub use sluice_dns_domain::{DnsQuestion, DnsRecord, DnsResponse};
