use crate::dns::transport::MAX_UDP_MESSAGE_SIZE;
use crate::dns::wire::{MessageBuilder, MessageParser};
use sluice_dns_application::ports::RecordStore;
use sluice_dns_application::use_cases::{HandleDnsQueryUseCase, Resolution};
use sluice_dns_domain::{DnsQuestion, DomainError, ResponseCode};
use std::sync::Arc;
use tracing::{debug, warn};

/// Raw query bytes in, raw reply bytes out.
///
/// Every transport funnels through [`ResolutionEngine::resolve`] or, for UDP,
/// [`ResolutionEngine::resolve_datagram`]. A query that decodes always gets a
/// reply; one that does not gets FORMERR when its id can be read and nothing
/// otherwise.
pub struct ResolutionEngine {
    handler: Arc<HandleDnsQueryUseCase>,
}

impl ResolutionEngine {
    pub fn new(handler: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { handler }
    }

    pub async fn resolve(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        self.resolve_within(query, u16::MAX).await
    }

    /// Resolve for a UDP client: the reply fits one 512-byte datagram, with
    /// TC set when answers had to be left out.
    pub async fn resolve_datagram(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        self.resolve_within(query, MAX_UDP_MESSAGE_SIZE as u16).await
    }

    async fn resolve_within(&self, query: &[u8], max_size: u16) -> Result<Vec<u8>, DomainError> {
        let decoded = match MessageParser::decode_query(query) {
            Ok(decoded) => decoded,
            Err(e) => {
                return match MessageParser::parse_query_id(query) {
                    Some(id) => {
                        debug!(id, error = %e, "Replying FORMERR to malformed query");
                        MessageBuilder::build_error(id, ResponseCode::FormErr)
                    }
                    None => {
                        warn!(bytes = query.len(), error = %e, "Dropping undecodable datagram");
                        Err(e)
                    }
                };
            }
        };

        let question = &decoded.question;
        let resolution = self.handler.execute(question).await;

        debug!(
            domain = %question.name,
            record_type = %question.record_type,
            rcode = %resolution.response.rcode,
            answers = resolution.response.records.len(),
            cache_hit = resolution.cache_hit,
            "Query answered"
        );

        let reply = MessageBuilder::build_reply(
            decoded.id,
            &decoded.query,
            &resolution.response.records,
            resolution.response.rcode,
            max_size,
        );

        match reply {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                warn!(
                    domain = %question.name,
                    error = %e,
                    "Reply could not be encoded, answering SERVFAIL"
                );
                MessageBuilder::build_error(decoded.id, ResponseCode::ServFail)
            }
        }
    }

    /// Resolve an already decoded question (DoH JSON).
    pub async fn resolve_question(&self, question: &DnsQuestion) -> Resolution {
        self.handler.execute(question).await
    }

    /// The record store backing this engine, for administrative access.
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        self.handler.store()
    }

    pub fn strategy_name(&self) -> &'static str {
        self.handler.strategy_name()
    }
}
