use crate::ResponseCode;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    FormatError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Invalid DNS response: {0}")]
    ProtocolError(String),

    #[error("No delegation for {0}")]
    NoDelegation(String),

    #[error("Cannot encode {record_type} value '{value}': {reason}")]
    ResourceConversion {
        record_type: String,
        value: String,
        reason: String,
    },

    #[error("All nameservers unreachable: {0}")]
    AllServersUnreachable(String),

    #[error("Resolution of {0} exhausted its rounds")]
    RoundsExhausted(String),

    #[error("Nameserver resolution for {0} exceeded the nesting limit")]
    RecursionDepthExceeded(String),

    #[error("Upstream {server} answered {rcode}")]
    UpstreamRcode {
        server: SocketAddr,
        rcode: ResponseCode,
    },

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// Status sent to the client when resolution fails with this error.
    pub fn response_code(&self) -> ResponseCode {
        match self {
            DomainError::FormatError(_) => ResponseCode::FormErr,
            DomainError::NoDelegation(_) => ResponseCode::NXDomain,
            DomainError::UpstreamRcode {
                rcode: ResponseCode::NXDomain,
                ..
            } => ResponseCode::NXDomain,
            _ => ResponseCode::ServFail,
        }
    }
}
