use super::DnsRecord;
use std::fmt;

/// DNS response status code (RFC 1035 §4.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Unknown(u16),
}

impl ResponseCode {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NXDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Unknown(other),
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Unknown(code) => *code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a resolution: ordered records plus status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResponse {
    pub records: Vec<DnsRecord>,
    pub rcode: ResponseCode,
}

impl DnsResponse {
    pub fn new(records: Vec<DnsRecord>, rcode: ResponseCode) -> Self {
        Self { records, rcode }
    }

    pub fn success(records: Vec<DnsRecord>) -> Self {
        Self::new(records, ResponseCode::NoError)
    }

    pub fn failure(rcode: ResponseCode) -> Self {
        Self::new(Vec::new(), rcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rcode_numbers() {
        assert_eq!(ResponseCode::ServFail.to_u16(), 2);
        assert_eq!(ResponseCode::NXDomain.to_u16(), 3);
        assert_eq!(ResponseCode::from_u16(3), ResponseCode::NXDomain);
        assert_eq!(ResponseCode::from_u16(9), ResponseCode::Unknown(9));
    }

    #[test]
    fn test_rcode_mnemonics() {
        assert_eq!(ResponseCode::NoError.to_string(), "NOERROR");
        assert_eq!(ResponseCode::ServFail.as_str(), "SERVFAIL");
    }

    #[test]
    fn test_failure_has_no_records() {
        let response = DnsResponse::failure(ResponseCode::ServFail);
        assert!(response.records.is_empty());
        assert_eq!(response.rcode, ResponseCode::ServFail);
    }
}
