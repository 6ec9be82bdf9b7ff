use super::{require_content_type, DNS_MESSAGE};
use crate::{dto::DohGetParams, errors::DohError, state::AppState};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderMap,
    },
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use sluice_dns_infrastructure::dns::wire::MessageParser;
use tracing::{debug, error};

pub async fn dns_query_get(
    State(state): State<AppState>,
    Query(params): Query<DohGetParams>,
) -> Result<Response, DohError> {
    let encoded = params
        .dns
        .filter(|value| !value.is_empty())
        .ok_or(DohError::MissingParameter("dns"))?;

    let query = URL_SAFE_NO_PAD
        .decode(encoded.trim_end_matches('='))
        .map_err(|_| DohError::InvalidBase64)?;

    answer(&state, &query).await
}

pub async fn dns_query_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, DohError> {
    require_content_type(&headers, DNS_MESSAGE)?;
    answer(&state, &body).await
}

async fn answer(state: &AppState, query: &[u8]) -> Result<Response, DohError> {
    // HTTP clients get a status code instead of a FORMERR message
    MessageParser::parse_query(query).map_err(|e| DohError::InvalidQuery(e.to_string()))?;

    let reply = state.engine.resolve(query).await.map_err(|e| {
        error!(error = %e, "DoH resolution failed");
        DohError::Internal(e.to_string())
    })?;

    debug!(bytes = reply.len(), "DoH reply");

    Ok((
        [(CONTENT_TYPE, DNS_MESSAGE), (CACHE_CONTROL, "no-store")],
        reply,
    )
        .into_response())
}
