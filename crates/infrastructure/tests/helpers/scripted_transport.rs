#![allow(dead_code)]
use async_trait::async_trait;
use sluice_dns_domain::DomainError;
use sluice_dns_infrastructure::dns::DnsTransport;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Handler = Arc<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

/// In-process transport answering per server address.
///
/// Servers without a script behave like unreachable hosts and fail with a
/// timeout. Every exchange is recorded as (server, question name).
#[derive(Default)]
pub struct ScriptedTransport {
    handlers: Mutex<HashMap<IpAddr, Handler>>,
    calls: Mutex<Vec<(IpAddr, String)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(self, server: &str, handler: F) -> Self
    where
        F: Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        self.handlers
            .lock()
            .unwrap()
            .insert(server.parse().unwrap(), Arc::new(handler));
        self
    }

    pub fn calls(&self) -> Vec<(IpAddr, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn servers_called(&self) -> Vec<IpAddr> {
        self.calls().into_iter().map(|(ip, _)| ip).collect()
    }
}

#[async_trait]
impl DnsTransport for ScriptedTransport {
    async fn exchange(
        &self,
        server: SocketAddr,
        message_bytes: &[u8],
        _timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let name = super::builders::query_name(message_bytes);
        self.calls.lock().unwrap().push((server.ip(), name));

        let handler = self.handlers.lock().unwrap().get(&server.ip()).cloned();
        match handler {
            Some(handler) => Ok(handler(message_bytes)),
            None => Err(DomainError::QueryTimeout),
        }
    }

    fn protocol_name(&self) -> &'static str {
        "scripted"
    }
}
