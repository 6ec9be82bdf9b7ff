pub mod cache;
pub mod dns;

// Re-export use cases
pub use cache::SweepExpiredRecordsUseCase;
pub use dns::{HandleDnsQueryUseCase, Resolution};
