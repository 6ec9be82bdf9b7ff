use super::{DnsTransport, MAX_UDP_MESSAGE_SIZE};
use async_trait::async_trait;
use sluice_dns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// DNS over UDP, one fresh socket per exchange.
///
/// Reads a single datagram of at most 512 bytes from the server the socket
/// is connected to. The timeout covers the send and the receive together.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpTransport;

impl UdpTransport {
    pub fn new() -> Self {
        Self
    }

    async fn send_and_receive(
        server: SocketAddr,
        message_bytes: &[u8],
    ) -> Result<Vec<u8>, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;

        // Connected sockets only deliver datagrams from `server`.
        socket.connect(server).await.map_err(|e| {
            DomainError::IoError(format!("Failed to connect UDP socket to {}: {}", server, e))
        })?;

        let bytes_sent = socket.send(message_bytes).await.map_err(|e| {
            DomainError::IoError(format!("Failed to send UDP query to {}: {}", server, e))
        })?;

        debug!(server = %server, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];
        let bytes_received = socket.recv(&mut recv_buf).await.map_err(|e| {
            DomainError::IoError(format!(
                "Failed to receive UDP response from {}: {}",
                server, e
            ))
        })?;

        recv_buf.truncate(bytes_received);

        debug!(server = %server, bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn exchange(
        &self,
        server: SocketAddr,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        tokio::time::timeout(timeout, Self::send_and_receive(server, message_bytes))
            .await
            .map_err(|_| DomainError::QueryTimeout)?
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
