use crate::handlers;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};

/// Largest accepted DoH request body.
pub const MAX_DOH_BODY: usize = 4096;

/// Creates the DNS-over-HTTPS routes with state
pub fn create_doh_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/dns-query",
            get(handlers::dns_query_get).post(handlers::dns_query_post),
        )
        .route(
            "/dns-query/json",
            get(handlers::dns_json_get).post(handlers::dns_json_post),
        )
        .layer(DefaultBodyLimit::max(MAX_DOH_BODY))
        .with_state(state)
}
