#![allow(dead_code)]
use super::builders::ReplyBuilder;
use hickory_proto::op::ResponseCode;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock server answers each query.
#[derive(Clone, Debug)]
pub enum MockBehavior {
    /// One A record for the queried name.
    AnswerA { ip: &'static str, ttl: u32 },
    /// Empty answer with the given status.
    Rcode(ResponseCode),
    /// Valid answer under a different transaction id.
    WrongId,
    /// Answer that echoes no question.
    NoQuestion,
    /// Bytes that are not a DNS message.
    Garbage,
    /// Never reply.
    Silent,
}

/// Mock DNS server for tests
///
/// Listens on an ephemeral port on 127.0.0.1 and answers every datagram
/// according to its [`MockBehavior`].
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(reply) = Self::build_reply(&behavior, &buf[..len]) {
                                let _ = socket.send_to(&reply, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn build_reply(behavior: &MockBehavior, query: &[u8]) -> Option<Vec<u8>> {
        let name = super::builders::query_name(query);
        match behavior {
            MockBehavior::AnswerA { ip, ttl } => {
                Some(ReplyBuilder::for_query(query).answer_a(&name, ip, *ttl).build())
            }
            MockBehavior::Rcode(rcode) => Some(ReplyBuilder::for_query(query).rcode(*rcode).build()),
            MockBehavior::WrongId => {
                let id = u16::from_be_bytes([query[0], query[1]]).wrapping_add(1);
                Some(
                    ReplyBuilder::for_query(query)
                        .id(id)
                        .answer_a(&name, "192.0.2.1", 60)
                        .build(),
                )
            }
            MockBehavior::NoQuestion => {
                let mut reply = ReplyBuilder::for_query(query).build();
                // QDCOUNT = 0, the question bytes become trailing garbage the
                // decoder ignores
                reply[4] = 0;
                reply[5] = 0;
                reply.truncate(12);
                Some(reply)
            }
            MockBehavior::Garbage => Some(vec![0xde, 0xad, 0xbe]),
            MockBehavior::Silent => None,
        }
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
