use sluice_dns_infrastructure::dns::ResolutionEngine;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ResolutionEngine>,
}

impl AppState {
    pub fn new(engine: Arc<ResolutionEngine>) -> Self {
        Self { engine }
    }
}
