use async_trait::async_trait;
use sluice_dns_domain::{DnsQuestion, DnsResponse, DomainError};

/// How a cache miss gets answered: forwarded upstream or walked from the root.
///
/// Implementations return `Ok` only for a successful (NOERROR) answer; every
/// other outcome is a `DomainError` whose `response_code()` is what the client
/// receives.
#[async_trait]
pub trait ResolutionStrategy: Send + Sync {
    async fn resolve(&self, question: &DnsQuestion) -> Result<DnsResponse, DomainError>;

    fn name(&self) -> &'static str;
}
