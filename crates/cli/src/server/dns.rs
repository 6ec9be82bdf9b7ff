use sluice_dns_infrastructure::dns::transport::MAX_UDP_MESSAGE_SIZE;
use sluice_dns_infrastructure::dns::ResolutionEngine;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Serves classic DNS over UDP until `shutdown` fires.
///
/// One task per datagram. Replies are cut to 512 bytes with TC set; queries
/// the engine cannot decode at all are dropped without a reply.
pub async fn start_udp_server(
    bind_addr: SocketAddr,
    engine: Arc<ResolutionEngine>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket = Arc::new(UdpSocket::bind(bind_addr).await?);
    info!(bind_address = %socket.local_addr()?, "UDP listener started");
    serve_udp(socket, engine, shutdown).await;
    Ok(())
}

async fn serve_udp(socket: Arc<UdpSocket>, engine: Arc<ResolutionEngine>, shutdown: CancellationToken) {
    let mut buf = [0u8; MAX_UDP_MESSAGE_SIZE];

    loop {
        let (len, peer) = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("UDP listener stopping");
                return;
            }
            received = socket.recv_from(&mut buf) => match received {
                Ok(received) => received,
                Err(e) => {
                    warn!(error = %e, "UDP receive failed");
                    continue;
                }
            }
        };

        let query = buf[..len].to_vec();
        let socket = socket.clone();
        let engine = engine.clone();

        tokio::spawn(async move {
            match engine.resolve_datagram(&query).await {
                Ok(reply) => {
                    if let Err(e) = socket.send_to(&reply, peer).await {
                        warn!(peer = %peer, error = %e, "UDP send failed");
                    }
                }
                Err(e) => debug!(peer = %peer, error = %e, "No reply for datagram"),
            }
        });
    }
}

/// Serves DNS over TCP until `shutdown` fires.
///
/// Messages carry a two-byte big-endian length prefix. A connection may
/// carry several queries and is closed once it sits idle for `idle_timeout`.
pub async fn start_tcp_server(
    bind_addr: SocketAddr,
    engine: Arc<ResolutionEngine>,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!(bind_address = %listener.local_addr()?, "TCP listener started");
    serve_tcp(listener, engine, idle_timeout, shutdown).await;
    Ok(())
}

async fn serve_tcp(
    listener: TcpListener,
    engine: Arc<ResolutionEngine>,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) {
    loop {
        let (stream, peer) = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("TCP listener stopping");
                return;
            }
            accepted = listener.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "TCP accept failed");
                    continue;
                }
            }
        };

        let engine = engine.clone();
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                result = handle_tcp_connection(stream, engine, idle_timeout) => {
                    if let Err(e) = result {
                        debug!(peer = %peer, error = %e, "TCP connection closed with error");
                    }
                }
            }
        });
    }
}

async fn handle_tcp_connection(
    mut stream: TcpStream,
    engine: Arc<ResolutionEngine>,
    idle_timeout: Duration,
) -> io::Result<()> {
    loop {
        let mut prefix = [0u8; 2];
        match tokio::time::timeout(idle_timeout, stream.read_exact(&mut prefix)).await {
            Err(_) => return Ok(()),
            Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Ok(Err(e)) => return Err(e),
            Ok(Ok(_)) => {}
        }

        let mut query = vec![0u8; u16::from_be_bytes(prefix) as usize];
        tokio::time::timeout(idle_timeout, stream.read_exact(&mut query))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "partial TCP message"))??;

        let reply = match engine.resolve(&query).await {
            Ok(reply) => reply,
            // Framing is lost once a message cannot be read at all.
            Err(e) => {
                debug!(error = %e, "Closing TCP connection after undecodable message");
                return Ok(());
            }
        };

        let len = u16::try_from(reply.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "reply exceeds 65535 bytes"))?;
        stream.write_all(&len.to_be_bytes()).await?;
        stream.write_all(&reply).await?;
    }
}
