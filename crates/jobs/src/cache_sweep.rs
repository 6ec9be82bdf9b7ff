use sluice_dns_application::use_cases::SweepExpiredRecordsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Periodically removes expired records from the store.
pub struct CacheSweepJob {
    sweep: Arc<SweepExpiredRecordsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheSweepJob {
    pub fn new(sweep: Arc<SweepExpiredRecordsUseCase>) -> Self {
        Self {
            sweep,
            interval_secs: 30,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(interval_secs = self.interval_secs, "Starting cache sweep job");

        tokio::spawn(async move {
            let period = Duration::from_secs(self.interval_secs);
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheSweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let removed = self.sweep.execute();
                        debug!(removed, "Cache sweep completed");
                    }
                }
            }
        })
    }
}
