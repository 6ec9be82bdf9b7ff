//! Configuration module for Sluice DNS
//!
//! This module contains all configuration structures organized by domain:
//! - `root`: Main configuration and CLI overrides
//! - `server`: Listener ports and binding
//! - `dns`: Resolution strategy, upstream and recursion settings
//! - `cache`: Record store sizing and sweep interval
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod dns;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;

pub use cache::CacheConfig;
pub use dns::{DnsConfig, RecursionConfig, ResolutionMode, ROOT_SERVERS};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
