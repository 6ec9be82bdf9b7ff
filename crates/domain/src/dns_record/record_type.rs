use std::fmt;
use std::str::FromStr;

/// DNS resource record type.
///
/// The named variants are the types the codec knows how to carry; any other
/// wire code survives as `Unknown` so questions for it can still be cached and
/// answered with whatever the strategy returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    PTR,
    MX,
    TXT,
    AAAA,
    Unknown(u16),
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::CNAME => "CNAME",
            RecordType::PTR => "PTR",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::AAAA => "AAAA",
            RecordType::Unknown(_) => "UNKNOWN",
        }
    }

    /// Convert from the wire format number.
    pub fn from_u16(value: u16) -> Self {
        match value {
            1 => RecordType::A,
            2 => RecordType::NS,
            5 => RecordType::CNAME,
            12 => RecordType::PTR,
            15 => RecordType::MX,
            16 => RecordType::TXT,
            28 => RecordType::AAAA,
            other => RecordType::Unknown(other),
        }
    }

    /// Convert to the wire format number.
    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::PTR => 12,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::Unknown(code) => *code,
        }
    }

    pub fn all() -> Vec<RecordType> {
        vec![
            RecordType::A,
            RecordType::NS,
            RecordType::CNAME,
            RecordType::PTR,
            RecordType::MX,
            RecordType::TXT,
            RecordType::AAAA,
        ]
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Unknown(code) => write!(f, "TYPE{}", code),
            known => write!(f, "{}", known.as_str()),
        }
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "A" => Ok(RecordType::A),
            "NS" => Ok(RecordType::NS),
            "CNAME" => Ok(RecordType::CNAME),
            "PTR" => Ok(RecordType::PTR),
            "MX" => Ok(RecordType::MX),
            "TXT" => Ok(RecordType::TXT),
            "AAAA" => Ok(RecordType::AAAA),
            _ => upper
                .strip_prefix("TYPE")
                .and_then(|code| code.parse::<u16>().ok())
                .map(RecordType::from_u16)
                .ok_or_else(|| format!("Invalid record type: {}", s)),
        }
    }
}

impl From<u16> for RecordType {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}

impl From<RecordType> for u16 {
    fn from(value: RecordType) -> Self {
        value.to_u16()
    }
}
