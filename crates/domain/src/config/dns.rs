use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// IPv4 addresses of the thirteen root nameservers (a.root-servers.net … m).
pub const ROOT_SERVERS: [Ipv4Addr; 13] = [
    Ipv4Addr::new(198, 41, 0, 4),
    Ipv4Addr::new(170, 247, 170, 2),
    Ipv4Addr::new(192, 33, 4, 12),
    Ipv4Addr::new(199, 7, 91, 13),
    Ipv4Addr::new(192, 203, 230, 10),
    Ipv4Addr::new(192, 5, 5, 241),
    Ipv4Addr::new(192, 112, 36, 4),
    Ipv4Addr::new(198, 97, 190, 53),
    Ipv4Addr::new(192, 36, 148, 17),
    Ipv4Addr::new(192, 58, 128, 30),
    Ipv4Addr::new(193, 0, 14, 129),
    Ipv4Addr::new(199, 7, 83, 42),
    Ipv4Addr::new(202, 12, 27, 33),
];

/// How cache misses are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Forward to a single upstream recursive resolver
    #[default]
    Forward,
    /// Walk the delegation chain from the root servers
    Recursive,
}

impl std::str::FromStr for ResolutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" => Ok(ResolutionMode::Forward),
            "recursive" => Ok(ResolutionMode::Recursive),
            _ => Err(format!("Invalid resolution mode: {}", s)),
        }
    }
}

/// DNS resolution configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    #[serde(default)]
    pub mode: ResolutionMode,

    /// Upstream resolver used in forward mode (e.g. "8.8.8.8:53")
    #[serde(default = "default_upstream")]
    pub upstream: String,

    /// Per round-trip timeout to the upstream, in milliseconds
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout_ms: u64,

    /// Overall deadline for one resolution, in milliseconds
    #[serde(default = "default_resolve_timeout")]
    pub resolve_timeout_ms: u64,

    #[serde(default)]
    pub recursion: RecursionConfig,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            mode: ResolutionMode::default(),
            upstream: default_upstream(),
            upstream_timeout_ms: default_upstream_timeout(),
            resolve_timeout_ms: default_resolve_timeout(),
            recursion: RecursionConfig::default(),
        }
    }
}

/// Iterative resolution settings (recursive mode only)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecursionConfig {
    #[serde(default = "default_root_servers")]
    pub root_servers: Vec<IpAddr>,

    /// Port nameservers are queried on
    #[serde(default = "default_nameserver_port")]
    pub nameserver_port: u16,

    /// Delegation rounds per resolution
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Nesting limit for resolving glue-less nameserver names
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Per exchange timeout, in milliseconds
    #[serde(default = "default_upstream_timeout")]
    pub exchange_timeout_ms: u64,
}

impl Default for RecursionConfig {
    fn default() -> Self {
        Self {
            root_servers: default_root_servers(),
            nameserver_port: default_nameserver_port(),
            max_rounds: default_max_rounds(),
            max_depth: default_max_depth(),
            exchange_timeout_ms: default_upstream_timeout(),
        }
    }
}

fn default_upstream() -> String {
    "8.8.8.8:53".to_string()
}

fn default_upstream_timeout() -> u64 {
    3000
}

fn default_resolve_timeout() -> u64 {
    5000
}

fn default_root_servers() -> Vec<IpAddr> {
    ROOT_SERVERS.iter().map(|ip| IpAddr::V4(*ip)).collect()
}

fn default_nameserver_port() -> u16 {
    53
}

fn default_max_rounds() -> u32 {
    3
}

fn default_max_depth() -> u32 {
    4
}
