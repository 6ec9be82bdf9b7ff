use crate::ports::RecordStore;
use std::sync::Arc;
use tracing::debug;

/// Compacts the record store by dropping entries whose TTL ran out.
pub struct SweepExpiredRecordsUseCase {
    store: Arc<dyn RecordStore>,
}

impl SweepExpiredRecordsUseCase {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn execute(&self) -> usize {
        let removed = self.store.sweep();
        debug!(removed, remaining = self.store.len(), "Expired records swept");
        removed
    }
}
