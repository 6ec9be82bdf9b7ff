pub mod cache;
pub mod engine;
pub mod recursive;
pub mod strategy;
pub mod transport;
pub mod upstream;
pub mod wire;

pub use cache::MemoryRecordStore;
pub use engine::ResolutionEngine;
pub use recursive::IterativeResolver;
pub use strategy::build_strategy;
pub use transport::{DnsTransport, UdpTransport};
pub use upstream::UpstreamForwarder;
