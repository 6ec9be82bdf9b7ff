use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_dns_port")]
    pub udp_port: u16,

    #[serde(default = "default_dns_port")]
    pub tcp_port: u16,

    /// DNS-over-HTTPS listener (binary and JSON endpoints)
    #[serde(default = "default_doh_port")]
    pub doh_port: u16,

    /// Idle deadline for a TCP connection between two queries
    #[serde(default = "default_tcp_idle_timeout")]
    pub tcp_idle_timeout_secs: u64,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_doh_port() -> u16 {
    8053
}

fn default_tcp_idle_timeout() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            udp_port: default_dns_port(),
            tcp_port: default_dns_port(),
            doh_port: default_doh_port(),
            tcp_idle_timeout_secs: default_tcp_idle_timeout(),
        }
    }
}
