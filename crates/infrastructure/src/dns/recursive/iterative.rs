//! Iterative resolution from the root servers.
//!
//! Each round queries the current candidate servers in order and uses the
//! first reply that arrives. An authoritative reply ends the walk; otherwise
//! the authority section names the next zone's nameservers. Their addresses
//! come from glue in the additional section when present, or from a nested
//! resolution of the nameserver names (bounded by `max_depth`).

use crate::dns::transport::DnsTransport;
use crate::dns::wire::{MessageBuilder, MessageParser, ParsedResponse};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use sluice_dns_application::ports::ResolutionStrategy;
use sluice_dns_domain::config::RecursionConfig;
use sluice_dns_domain::{DnsQuestion, DnsRecord, DnsResponse, DomainError, RecordType, ResponseCode};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct IterativeResolver {
    transport: Arc<dyn DnsTransport>,
    root_servers: Vec<IpAddr>,
    port: u16,
    max_rounds: u32,
    max_depth: u32,
    exchange_timeout: Duration,
}

impl IterativeResolver {
    pub fn new(transport: Arc<dyn DnsTransport>, config: &RecursionConfig) -> Self {
        Self {
            transport,
            root_servers: config.root_servers.clone(),
            port: config.nameserver_port,
            max_rounds: config.max_rounds,
            max_depth: config.max_depth,
            exchange_timeout: Duration::from_millis(config.exchange_timeout_ms),
        }
    }

    pub fn root_servers(&self) -> &[IpAddr] {
        &self.root_servers
    }

    /// Resolve `question` starting at the root.
    ///
    /// `depth` counts how many nameserver lookups enclose this one; the
    /// top-level call passes 0.
    pub fn resolve_at_depth<'a>(
        &'a self,
        question: &'a DnsQuestion,
        depth: u32,
    ) -> BoxFuture<'a, Result<DnsResponse, DomainError>> {
        async move {
            if depth > self.max_depth {
                return Err(DomainError::RecursionDepthExceeded(question.name.to_string()));
            }

            let mut candidates = self.root_servers.clone();

            for round in 1..=self.max_rounds {
                let (server, reply) = self.query_candidates(question, &candidates).await?;

                debug!(
                    domain = %question.name,
                    record_type = %question.record_type,
                    round,
                    depth,
                    server = %server,
                    authoritative = reply.authoritative,
                    "Delegation round"
                );

                if reply.authoritative {
                    if reply.rcode == ResponseCode::NXDomain {
                        return Err(DomainError::UpstreamRcode {
                            server,
                            rcode: reply.rcode,
                        });
                    }
                    return Ok(DnsResponse::success(reply.answers));
                }

                if reply.authority.is_empty() {
                    return Err(DomainError::NoDelegation(question.name.to_string()));
                }

                let targets = Self::nameserver_targets(&reply.authority);
                if targets.is_empty() {
                    return Err(DomainError::NoDelegation(question.name.to_string()));
                }

                let glue = Self::glue_addresses(&reply.additional, &targets);
                candidates = if glue.is_empty() {
                    self.resolve_nameservers(&targets, depth).await?
                } else {
                    glue
                };
            }

            Err(DomainError::RoundsExhausted(question.name.to_string()))
        }
        .boxed()
    }

    /// Query each candidate in order; the first usable reply wins.
    async fn query_candidates(
        &self,
        question: &DnsQuestion,
        candidates: &[IpAddr],
    ) -> Result<(SocketAddr, ParsedResponse), DomainError> {
        for ip in candidates {
            let server = SocketAddr::new(*ip, self.port);
            match self.exchange(server, question).await {
                Ok(reply) => return Ok((server, reply)),
                Err(e) => {
                    warn!(
                        domain = %question.name,
                        server = %server,
                        protocol = self.transport.protocol_name(),
                        error = %e,
                        "Nameserver failed, trying next candidate"
                    );
                }
            }
        }

        Err(DomainError::AllServersUnreachable(question.name.to_string()))
    }

    async fn exchange(
        &self,
        server: SocketAddr,
        question: &DnsQuestion,
    ) -> Result<ParsedResponse, DomainError> {
        let id = fastrand::u16(..);
        let request = MessageBuilder::build_query(&question.name, &question.record_type, id)?;
        let bytes = self
            .transport
            .exchange(server, &request, self.exchange_timeout)
            .await?;
        let reply = MessageParser::parse_response(&bytes)?;

        if reply.id != id {
            return Err(DomainError::ProtocolError(format!(
                "Response id {} does not match query id {}",
                reply.id, id
            )));
        }

        match reply.rcode {
            ResponseCode::NoError | ResponseCode::NXDomain => Ok(reply),
            rcode => Err(DomainError::UpstreamRcode { server, rcode }),
        }
    }

    /// Addresses for the first nameserver name that resolves.
    async fn resolve_nameservers(
        &self,
        targets: &[String],
        depth: u32,
    ) -> Result<Vec<IpAddr>, DomainError> {
        for target in targets {
            let nested = DnsQuestion::new(target, RecordType::A);
            match self.resolve_at_depth(&nested, depth + 1).await {
                Ok(response) => {
                    let addresses = Self::a_addresses(response.records.iter());
                    if !addresses.is_empty() {
                        return Ok(addresses);
                    }
                }
                Err(e @ DomainError::RecursionDepthExceeded(_)) => return Err(e),
                Err(e) => {
                    warn!(nameserver = %target, depth, error = %e, "Nameserver name did not resolve");
                }
            }
        }

        Err(DomainError::AllServersUnreachable(targets.join(", ")))
    }

    fn nameserver_targets(authority: &[DnsRecord]) -> Vec<String> {
        authority
            .iter()
            .filter(|r| r.record_type == RecordType::NS)
            .map(|r| r.value.clone())
            .collect()
    }

    fn glue_addresses(additional: &[DnsRecord], targets: &[String]) -> Vec<IpAddr> {
        Self::a_addresses(additional.iter().filter(|r| {
            targets
                .iter()
                .any(|target| target.eq_ignore_ascii_case(&r.name))
        }))
    }

    fn a_addresses<'r>(records: impl Iterator<Item = &'r DnsRecord>) -> Vec<IpAddr> {
        records
            .filter(|r| r.record_type == RecordType::A)
            .filter_map(|r| r.value.parse::<IpAddr>().ok())
            .collect()
    }
}

#[async_trait]
impl ResolutionStrategy for IterativeResolver {
    async fn resolve(&self, question: &DnsQuestion) -> Result<DnsResponse, DomainError> {
        self.resolve_at_depth(question, 0).await
    }

    fn name(&self) -> &'static str {
        "recursive"
    }
}
