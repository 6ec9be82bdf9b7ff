//! Sluice DNS Domain Layer
pub mod config;
pub mod dns_question;
pub mod dns_record;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, ResolutionMode};
pub use dns_question::{fqdn, DnsQuestion};
pub use dns_record::{DnsRecord, DnsResponse, RecordType, ResponseCode};
pub use errors::DomainError;
