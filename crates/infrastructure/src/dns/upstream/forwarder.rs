use crate::dns::transport::DnsTransport;
use crate::dns::wire::{MessageBuilder, MessageParser};
use async_trait::async_trait;
use sluice_dns_application::ports::ResolutionStrategy;
use sluice_dns_domain::{DnsQuestion, DnsResponse, DomainError, ResponseCode};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Forward-only strategy: one round trip to a fixed upstream resolver.
pub struct UpstreamForwarder {
    upstream: SocketAddr,
    transport: Arc<dyn DnsTransport>,
    timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(upstream: SocketAddr, transport: Arc<dyn DnsTransport>, timeout: Duration) -> Self {
        Self {
            upstream,
            transport,
            timeout,
        }
    }

    pub fn upstream(&self) -> SocketAddr {
        self.upstream
    }

    /// Send `question` upstream once and return the answer section with the
    /// upstream's status. No retries.
    pub async fn query(
        &self,
        question: &DnsQuestion,
        timeout: Duration,
    ) -> Result<DnsResponse, DomainError> {
        let id = fastrand::u16(..);
        let request = MessageBuilder::build_query(&question.name, &question.record_type, id)?;

        let reply = self
            .transport
            .exchange(self.upstream, &request, timeout)
            .await?;
        let parsed = MessageParser::parse_response(&reply)?;

        if parsed.id != id {
            return Err(DomainError::ProtocolError(format!(
                "Response id {} does not match query id {}",
                parsed.id, id
            )));
        }
        if parsed.question_count != 1 {
            return Err(DomainError::ProtocolError(format!(
                "Response echoes {} questions, expected 1",
                parsed.question_count
            )));
        }

        debug!(
            domain = %question.name,
            record_type = %question.record_type,
            upstream = %self.upstream,
            protocol = self.transport.protocol_name(),
            rcode = %parsed.rcode,
            answers = parsed.answers.len(),
            "Upstream answered"
        );

        Ok(DnsResponse::new(parsed.answers, parsed.rcode))
    }
}

#[async_trait]
impl ResolutionStrategy for UpstreamForwarder {
    async fn resolve(&self, question: &DnsQuestion) -> Result<DnsResponse, DomainError> {
        let response = self.query(question, self.timeout).await?;
        if response.rcode != ResponseCode::NoError {
            return Err(DomainError::UpstreamRcode {
                server: self.upstream,
                rcode: response.rcode,
            });
        }
        Ok(response)
    }

    fn name(&self) -> &'static str {
        "forward"
    }
}
