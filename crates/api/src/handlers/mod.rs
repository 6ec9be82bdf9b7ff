pub mod doh;
pub mod health;
pub mod json;

pub use doh::{dns_query_get, dns_query_post};
pub use health::health_check;
pub use json::{dns_json_get, dns_json_post};

use crate::errors::DohError;
use axum::http::{header::CONTENT_TYPE, HeaderMap};

pub const DNS_MESSAGE: &str = "application/dns-message";
pub const DNS_JSON: &str = "application/dns-json";

/// Reject requests whose Content-Type essence is not `expected`.
pub(crate) fn require_content_type(headers: &HeaderMap, expected: &str) -> Result<(), DohError> {
    let matches = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(expected));

    if matches {
        Ok(())
    } else {
        Err(DohError::UnsupportedMediaType)
    }
}
