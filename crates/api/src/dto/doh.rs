use serde::{Deserialize, Serialize};
use sluice_dns_domain::DnsRecord;

#[derive(Deserialize, Debug, Default)]
pub struct DohGetParams {
    pub dns: Option<String>,
}

/// Question of a JSON request, from the query string or a POST body.
#[derive(Deserialize, Debug, Default)]
pub struct JsonQuestion {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DnsJsonResponse {
    pub rcode: String,
    pub answers: Vec<DnsJsonAnswer>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DnsJsonAnswer {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: u32,
    pub data: String,
}

impl From<&DnsRecord> for DnsJsonAnswer {
    fn from(record: &DnsRecord) -> Self {
        Self {
            name: record.name.clone(),
            record_type: record.record_type.to_string(),
            ttl: record.ttl,
            data: record.value.clone(),
        }
    }
}
