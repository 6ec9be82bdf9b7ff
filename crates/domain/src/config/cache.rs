use serde::{Deserialize, Serialize};

/// Record store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Seconds between two sweeps of expired records
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Pre-allocated key capacity
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval(),
            initial_capacity: default_initial_capacity(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    30
}

fn default_initial_capacity() -> usize {
    10_000
}
