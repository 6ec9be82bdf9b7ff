use crate::dns::recursive::IterativeResolver;
use crate::dns::transport::DnsTransport;
use crate::dns::upstream::UpstreamForwarder;
use sluice_dns_application::ports::ResolutionStrategy;
use sluice_dns_domain::{Config, ConfigError, ResolutionMode};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Pick the resolution strategy named by `dns.mode`.
pub fn build_strategy(
    config: &Config,
    transport: Arc<dyn DnsTransport>,
) -> Result<Arc<dyn ResolutionStrategy>, ConfigError> {
    match config.dns.mode {
        ResolutionMode::Forward => {
            let forwarder = UpstreamForwarder::new(
                config.upstream_addr()?,
                transport,
                Duration::from_millis(config.dns.upstream_timeout_ms),
            );
            info!(upstream = %forwarder.upstream(), "Resolution mode: forward");
            Ok(Arc::new(forwarder))
        }
        ResolutionMode::Recursive => {
            let recursion = &config.dns.recursion;
            let resolver = IterativeResolver::new(transport, recursion);
            info!(
                root_servers = resolver.root_servers().len(),
                max_rounds = recursion.max_rounds,
                max_depth = recursion.max_depth,
                "Resolution mode: recursive"
            );
            Ok(Arc::new(resolver))
        }
    }
}
