use sluice_dns_api::{create_doh_routes, AppState};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn start_doh_server(
    bind_addr: SocketAddr,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        doh_url = format!("http://{}/dns-query", bind_addr),
        "Starting DoH server"
    );

    let app = create_doh_routes(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("DoH server started successfully");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}
