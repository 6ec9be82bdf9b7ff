//! DNS Message Builder
//!
//! Constructs DNS messages in wire format using `hickory-proto`: outgoing
//! queries for the forwarder and the iterative resolver, and the replies the
//! engine hands back to every transport.

use super::rdata::RDataConverter;
use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode as HickoryResponseCode};
use hickory_proto::rr::{DNSClass, Name, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use sluice_dns_domain::{fqdn, DnsQuestion, DnsRecord, DomainError, RecordType, ResponseCode};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

static DROPPED_RECORDS: AtomicU64 = AtomicU64::new(0);

/// Builds DNS messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query for `domain` with the caller's transaction id.
    ///
    /// The name is normalized to FQDN form and the RD flag is set.
    pub fn build_query(domain: &str, record_type: &RecordType, id: u16) -> Result<Vec<u8>, DomainError> {
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(Self::make_query(domain, record_type)?);

        Self::serialize_message(&message)
    }

    /// Build a reply to `question`.
    ///
    /// Records whose value cannot be encoded are left out of the answer
    /// section; the remaining ones are still sent.
    pub fn build_response(
        id: u16,
        question: &DnsQuestion,
        records: &[DnsRecord],
        rcode: ResponseCode,
    ) -> Result<Vec<u8>, DomainError> {
        let query = Self::make_query(&question.name, &question.record_type)?;
        Self::build_reply(id, &query, records, rcode, u16::MAX)
    }

    /// Build a reply echoing `query` as received, at most `max_size` bytes.
    ///
    /// Answers that do not fit are cut at a record boundary and the TC bit
    /// is set.
    pub fn build_reply(
        id: u16,
        query: &Query,
        records: &[DnsRecord],
        rcode: ResponseCode,
        max_size: u16,
    ) -> Result<Vec<u8>, DomainError> {
        let mut message = Self::response_header(id, rcode);
        message.add_query(query.clone());

        for record in records {
            match Self::to_wire_record(record) {
                Ok(wire) => {
                    message.add_answer(wire);
                }
                Err(e) => {
                    DROPPED_RECORDS.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        domain = %record.name,
                        record_type = %record.record_type,
                        value = %record.value,
                        error = %e,
                        "Dropping unencodable record from answer"
                    );
                }
            }
        }

        Self::serialize_limited(&message, max_size)
    }

    /// Build a question-less reply carrying only `rcode` (used for FORMERR).
    pub fn build_error(id: u16, rcode: ResponseCode) -> Result<Vec<u8>, DomainError> {
        Self::serialize_message(&Self::response_header(id, rcode))
    }

    /// Records left out of replies since startup because their value could
    /// not be encoded.
    pub fn dropped_records() -> u64 {
        DROPPED_RECORDS.load(Ordering::Relaxed)
    }

    /// Convert one domain record into a hickory `Record`.
    pub fn to_wire_record(record: &DnsRecord) -> Result<Record, DomainError> {
        let rdata = RDataConverter::to_rdata(record)?;
        let name = Name::from_str(&fqdn(&record.name)).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid owner '{}': {}", record.name, e))
        })?;
        Ok(Record::from_rdata(name, record.ttl, rdata))
    }

    fn response_header(id: u16, rcode: ResponseCode) -> Message {
        let mut message = Message::new(id, MessageType::Response, OpCode::Query);
        message.set_recursion_desired(true);
        message.set_recursion_available(true);
        message.set_response_code(<HickoryResponseCode as From<u16>>::from(rcode.to_u16()));
        message
    }

    fn make_query(domain: &str, record_type: &RecordType) -> Result<Query, DomainError> {
        let name = Name::from_str(&fqdn(domain)).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);
        Ok(query)
    }

    /// Serialize a Message to wire format bytes
    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        Self::serialize_limited(message, u16::MAX)
    }

    /// Serialize, stopping at the last whole record that fits in `max_size`.
    /// hickory sets TC in the emitted header when records were left out.
    fn serialize_limited(message: &Message, max_size: u16) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        encoder.set_max_size(max_size);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::FormatError(format!("Failed to serialize DNS message: {}", e))
        })?;

        // A record rolled back for size may leave bytes past the write offset.
        let written = encoder.offset();
        buf.truncate(written);
        Ok(buf)
    }
}
