pub mod udp;

use async_trait::async_trait;
use sluice_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

pub use udp::UdpTransport;

/// Largest DNS message carried in one UDP datagram.
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;

/// One request/reply round trip with a nameserver.
///
/// The forwarder and the iterative resolver talk to servers only through
/// this trait, so tests can substitute scripted replies.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn exchange(
        &self,
        server: SocketAddr,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
