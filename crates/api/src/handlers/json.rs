use super::{require_content_type, DNS_JSON};
use crate::{
    dto::{DnsJsonAnswer, DnsJsonResponse, JsonQuestion},
    errors::DohError,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use sluice_dns_domain::{DnsQuestion, RecordType};
use sluice_dns_infrastructure::dns::wire::MessageBuilder;
use std::str::FromStr;
use tracing::debug;

pub async fn dns_json_get(
    State(state): State<AppState>,
    Query(question): Query<JsonQuestion>,
) -> Result<Response, DohError> {
    resolve_json(&state, question).await
}

pub async fn dns_json_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, DohError> {
    require_content_type(&headers, DNS_JSON)?;
    let question: JsonQuestion = serde_json::from_slice(&body)
        .map_err(|e| DohError::InvalidQuery(format!("Bad request: {}", e)))?;
    resolve_json(&state, question).await
}

async fn resolve_json(state: &AppState, request: JsonQuestion) -> Result<Response, DohError> {
    let name = request
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or(DohError::MissingParameter("name"))?;
    let type_text = request
        .record_type
        .filter(|t| !t.trim().is_empty())
        .ok_or(DohError::MissingParameter("type"))?;

    let record_type = match RecordType::from_str(type_text.trim()) {
        Ok(RecordType::Unknown(_)) | Err(_) => return Err(DohError::UnsupportedType(type_text)),
        Ok(record_type) => record_type,
    };

    // Same name rules the wire path applies
    MessageBuilder::build_query(&name, &record_type, 0)
        .map_err(|e| DohError::InvalidQuery(e.to_string()))?;

    let question = DnsQuestion::new(&name, record_type);
    let resolution = state.engine.resolve_question(&question).await;

    let answers: Vec<DnsJsonAnswer> = resolution
        .response
        .records
        .iter()
        .filter(|record| MessageBuilder::to_wire_record(record).is_ok())
        .map(DnsJsonAnswer::from)
        .collect();

    debug!(
        domain = %question.name,
        record_type = %question.record_type,
        rcode = %resolution.response.rcode,
        answers = answers.len(),
        "DoH JSON reply"
    );

    let body = DnsJsonResponse {
        rcode: resolution.response.rcode.as_str().to_string(),
        answers,
    };

    Ok(([(CONTENT_TYPE, DNS_JSON)], Json(body)).into_response())
}
