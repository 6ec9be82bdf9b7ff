use clap::Parser;
use sluice_dns_api::AppState;
use sluice_dns_application::ports::RecordStore;
use sluice_dns_domain::{CliOverrides, ResolutionMode};
use sluice_dns_jobs::{CacheSweepJob, JobRunner};
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "sluice-dns")]
#[command(version)]
#[command(about = "Sluice DNS - caching DNS resolver with forward and recursive modes")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// UDP listener port
    #[arg(long, env = "UDP_PORT")]
    udp_port: Option<u16>,

    /// TCP listener port
    #[arg(long, env = "TCP_PORT")]
    tcp_port: Option<u16>,

    /// DNS-over-HTTPS listener port
    #[arg(long, env = "DOH_PORT")]
    doh_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Resolution mode (forward, recursive)
    #[arg(short = 'm', long)]
    mode: Option<ResolutionMode>,

    /// Upstream resolver for forward mode (ip or ip:port)
    #[arg(short = 'u', long, env = "UPSTREAM_DNS")]
    upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        udp_port: cli.udp_port,
        tcp_port: cli.tcp_port,
        doh_port: cli.doh_port,
        bind_address: cli.bind.clone(),
        mode: cli.mode,
        upstream: cli.upstream.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);
    bootstrap::log_config(cli.config.as_deref(), &config);

    info!("Starting Sluice DNS v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DnsServices::new(&config)?;
    let shutdown = CancellationToken::new();

    let job_handles = JobRunner::new()
        .with_cache_sweep(
            CacheSweepJob::new(services.sweep.clone())
                .with_interval(config.cache.sweep_interval_secs)
                .with_cancellation(shutdown.clone()),
        )
        .start();

    let udp_addr = listen_addr(&config.server.bind_address, config.server.udp_port)?;
    let tcp_addr = listen_addr(&config.server.bind_address, config.server.tcp_port)?;
    let doh_addr = listen_addr(&config.server.bind_address, config.server.doh_port)?;

    let listeners = vec![
        tokio::spawn(run_listener(
            "udp",
            server::start_udp_server(udp_addr, services.engine.clone(), shutdown.clone()),
            shutdown.clone(),
        )),
        tokio::spawn(run_listener(
            "tcp",
            server::start_tcp_server(
                tcp_addr,
                services.engine.clone(),
                Duration::from_secs(config.server.tcp_idle_timeout_secs),
                shutdown.clone(),
            ),
            shutdown.clone(),
        )),
        tokio::spawn(run_listener(
            "doh",
            server::start_doh_server(
                doh_addr,
                AppState::new(services.engine.clone()),
                shutdown.clone(),
            ),
            shutdown.clone(),
        )),
    ];

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received");
        signal_token.cancel();
    });

    for handle in listeners.into_iter().chain(job_handles) {
        if let Err(e) = handle.await {
            error!(error = %e, "Task panicked");
        }
    }

    info!(
        records = services.store.len(),
        hit_rate = services.store.hit_rate(),
        "Server shutdown complete"
    );
    Ok(())
}

/// A listener that fails takes the whole process down with it.
async fn run_listener(
    name: &'static str,
    listener: impl Future<Output = anyhow::Result<()>>,
    shutdown: CancellationToken,
) {
    if let Err(e) = listener.await {
        error!(listener = name, error = %e, "Listener failed");
        shutdown.cancel();
    }
}

fn listen_addr(bind_address: &str, port: u16) -> anyhow::Result<SocketAddr> {
    format!("{}:{}", bind_address, port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid listen address {}:{}: {}", bind_address, port, e))
}
