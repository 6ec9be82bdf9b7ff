//! Conversion between textual record values and hickory `RData`.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, PTR, TXT};
use hickory_proto::rr::{Name, RData, Record};
use sluice_dns_application::clock;
use sluice_dns_domain::{fqdn, DnsRecord, DomainError, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Longest single TXT character-string on the wire.
const MAX_TXT_CHUNK: usize = 255;

pub struct RDataConverter;

impl RDataConverter {
    /// Encode a record's textual value as wire RDATA.
    pub fn to_rdata(record: &DnsRecord) -> Result<RData, DomainError> {
        let value = record.value.trim();
        match record.record_type {
            RecordType::A => Ipv4Addr::from_str(value)
                .map(|ip| RData::A(A(ip)))
                .map_err(|e| Self::conversion_error(record, e)),
            RecordType::AAAA => Ipv6Addr::from_str(value)
                .map(|ip| RData::AAAA(AAAA(ip)))
                .map_err(|e| Self::conversion_error(record, e)),
            RecordType::CNAME => Self::parse_name(record, value).map(|n| RData::CNAME(CNAME(n))),
            RecordType::NS => Self::parse_name(record, value).map(|n| RData::NS(NS(n))),
            RecordType::PTR => Self::parse_name(record, value).map(|n| RData::PTR(PTR(n))),
            RecordType::MX => {
                let (preference, exchange) = value
                    .split_once(' ')
                    .ok_or_else(|| Self::conversion_error(record, "expected '<preference> <exchange>'"))?;
                let preference = preference
                    .parse::<u16>()
                    .map_err(|e| Self::conversion_error(record, e))?;
                let exchange = Self::parse_name(record, exchange.trim())?;
                Ok(RData::MX(MX::new(preference, exchange)))
            }
            RecordType::TXT => Ok(RData::TXT(TXT::new(Self::txt_chunks(&record.value)))),
            RecordType::Unknown(_) => Err(Self::conversion_error(record, "unsupported record type")),
        }
    }

    /// Decode a wire record into the textual model.
    ///
    /// Returns `None` for types without a textual encoding; those are
    /// skipped by callers rather than treated as errors.
    pub fn from_record(record: &Record) -> Option<DnsRecord> {
        if !RecordTypeMapper::is_supported(record.record_type()) {
            return None;
        }
        let record_type = RecordTypeMapper::from_hickory(record.record_type());
        let value = Self::rdata_value(record.data())?;
        Some(DnsRecord::stamped(
            record.name().to_utf8(),
            record_type,
            value,
            record.ttl(),
            clock::now(),
        ))
    }

    fn rdata_value(data: &RData) -> Option<String> {
        match data {
            RData::A(a) => Some(a.0.to_string()),
            RData::AAAA(aaaa) => Some(aaaa.0.to_string()),
            RData::CNAME(cname) => Some(cname.0.to_utf8()),
            RData::NS(ns) => Some(ns.0.to_utf8()),
            RData::PTR(ptr) => Some(ptr.0.to_utf8()),
            RData::MX(mx) => Some(format!("{} {}", mx.preference(), mx.exchange().to_utf8())),
            RData::TXT(txt) => Some(
                txt.txt_data()
                    .iter()
                    .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            _ => None,
        }
    }

    fn txt_chunks(value: &str) -> Vec<String> {
        if value.is_empty() {
            return vec![String::new()];
        }
        let mut chunks = Vec::new();
        let mut current = String::new();
        for ch in value.chars() {
            if current.len() + ch.len_utf8() > MAX_TXT_CHUNK {
                chunks.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }
        chunks.push(current);
        chunks
    }

    fn parse_name(record: &DnsRecord, value: &str) -> Result<Name, DomainError> {
        Name::from_str(&fqdn(value)).map_err(|e| Self::conversion_error(record, e))
    }

    fn conversion_error(record: &DnsRecord, reason: impl ToString) -> DomainError {
        DomainError::ResourceConversion {
            record_type: record.record_type.to_string(),
            value: record.value.clone(),
            reason: reason.to_string(),
        }
    }
}
