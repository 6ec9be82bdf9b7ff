use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Request-level failures of the DoH endpoints, answered as plain text.
#[derive(Debug)]
pub enum DohError {
    MissingParameter(&'static str),
    InvalidBase64,
    UnsupportedMediaType,
    InvalidQuery(String),
    UnsupportedType(String),
    Internal(String),
}

impl IntoResponse for DohError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            DohError::MissingParameter(name) => {
                (StatusCode::BAD_REQUEST, format!("Missing {} parameter", name))
            }
            DohError::InvalidBase64 => (StatusCode::BAD_REQUEST, "Invalid base64".to_string()),
            DohError::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported content-type".to_string(),
            ),
            DohError::InvalidQuery(reason) => (StatusCode::BAD_REQUEST, reason),
            DohError::UnsupportedType(t) => {
                (StatusCode::BAD_REQUEST, format!("Unsupported type: {}", t))
            }
            DohError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Resolver error".to_string(),
            ),
        };

        (status, message).into_response()
    }
}
