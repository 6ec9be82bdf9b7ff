#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use sluice_dns_api::{create_doh_routes, AppState};
use sluice_dns_application::ports::ResolutionStrategy;
use sluice_dns_application::use_cases::HandleDnsQueryUseCase;
use sluice_dns_domain::{DnsQuestion, DnsRecord, DnsResponse, DomainError, RecordType};
use sluice_dns_infrastructure::dns::{MemoryRecordStore, ResolutionEngine};
use std::sync::Arc;
use std::time::Duration;

/// Answers every A question with 192.0.2.1, except names under
/// `missing.` which have no delegation.
pub struct StaticStrategy;

#[async_trait]
impl ResolutionStrategy for StaticStrategy {
    async fn resolve(&self, question: &DnsQuestion) -> Result<DnsResponse, DomainError> {
        if question.name.starts_with("missing.") {
            return Err(DomainError::NoDelegation(question.name.to_string()));
        }
        let records = match question.record_type {
            RecordType::A => vec![DnsRecord::new(&*question.name, RecordType::A, "192.0.2.1", 300)],
            RecordType::MX => vec![DnsRecord::new(
                &*question.name,
                RecordType::MX,
                "10 mail.example.com.",
                300,
            )],
            _ => Vec::new(),
        };
        Ok(DnsResponse::success(records))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

pub fn create_test_app() -> Router {
    let store = Arc::new(MemoryRecordStore::new(16));
    let handler = HandleDnsQueryUseCase::new(store, Arc::new(StaticStrategy), Duration::from_secs(5));
    let engine = Arc::new(ResolutionEngine::new(Arc::new(handler)));
    create_doh_routes(AppState::new(engine))
}
