use crate::clock;
use crate::ports::{RecordStore, ResolutionStrategy};
use sluice_dns_domain::{DnsQuestion, DnsResponse, DomainError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of handling one question.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub response: DnsResponse,
    pub cache_hit: bool,
}

/// Cache-first resolution of a decoded question.
///
/// Hits are served with the TTL left on each record. Misses go to the
/// configured strategy under the overall deadline; successful answers are
/// written back to the store. Failures become a response carrying the
/// matching status, so the caller always has something to encode.
pub struct HandleDnsQueryUseCase {
    store: Arc<dyn RecordStore>,
    strategy: Arc<dyn ResolutionStrategy>,
    deadline: Duration,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        store: Arc<dyn RecordStore>,
        strategy: Arc<dyn ResolutionStrategy>,
        deadline: Duration,
    ) -> Self {
        Self {
            store,
            strategy,
            deadline,
        }
    }

    pub async fn execute(&self, question: &DnsQuestion) -> Resolution {
        if let Some(records) = self.store.get(question) {
            let now = clock::now();
            debug!(
                domain = %question.name,
                record_type = %question.record_type,
                records = records.len(),
                "Cache HIT"
            );
            let records = records
                .iter()
                .map(|record| record.with_remaining_ttl(now))
                .collect();
            return Resolution {
                response: DnsResponse::success(records),
                cache_hit: true,
            };
        }

        debug!(
            domain = %question.name,
            record_type = %question.record_type,
            strategy = self.strategy.name(),
            "Cache MISS"
        );

        let outcome = tokio::time::timeout(self.deadline, self.strategy.resolve(question))
            .await
            .unwrap_or(Err(DomainError::QueryTimeout));

        match outcome {
            Ok(response) => {
                for record in &response.records {
                    self.store.set(record.clone());
                }
                Resolution {
                    response: DnsResponse::success(response.records),
                    cache_hit: false,
                }
            }
            Err(e) => {
                let rcode = e.response_code();
                warn!(
                    domain = %question.name,
                    record_type = %question.record_type,
                    strategy = self.strategy.name(),
                    rcode = %rcode,
                    error = %e,
                    "Resolution failed"
                );
                Resolution {
                    response: DnsResponse::failure(rcode),
                    cache_hit: false,
                }
            }
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}
