use sluice_dns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Summarize the effective configuration. Call once logging is installed.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        udp_port = config.server.udp_port,
        tcp_port = config.server.tcp_port,
        doh_port = config.server.doh_port,
        bind = %config.server.bind_address,
        mode = ?config.dns.mode,
        "Configuration loaded"
    );
}
