use sluice_dns_application::use_cases::{HandleDnsQueryUseCase, SweepExpiredRecordsUseCase};
use sluice_dns_domain::Config;
use sluice_dns_infrastructure::dns::{
    build_strategy, DnsTransport, MemoryRecordStore, ResolutionEngine, UdpTransport,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Everything the listeners and background jobs share.
pub struct DnsServices {
    pub store: Arc<MemoryRecordStore>,
    pub engine: Arc<ResolutionEngine>,
    pub sweep: Arc<SweepExpiredRecordsUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(MemoryRecordStore::new(config.cache.initial_capacity));
        let transport: Arc<dyn DnsTransport> = Arc::new(UdpTransport);
        let strategy = build_strategy(config, transport)?;

        let handler = Arc::new(HandleDnsQueryUseCase::new(
            store.clone(),
            strategy,
            Duration::from_millis(config.dns.resolve_timeout_ms),
        ));
        let engine = Arc::new(ResolutionEngine::new(handler));
        let sweep = Arc::new(SweepExpiredRecordsUseCase::new(store.clone()));

        info!(
            strategy = engine.strategy_name(),
            initial_capacity = config.cache.initial_capacity,
            "DNS services initialized"
        );

        Ok(Self {
            store,
            engine,
            sweep,
        })
    }
}
