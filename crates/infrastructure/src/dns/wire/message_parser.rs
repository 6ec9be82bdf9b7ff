use super::rdata::RDataConverter;
use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, Query};
use hickory_proto::rr::Record;
use sluice_dns_domain::{DnsQuestion, DnsRecord, DomainError, ResponseCode};
use tracing::debug;

/// Header flags and sections of a decoded reply.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub id: u16,
    pub authoritative: bool,
    pub truncated: bool,
    pub rcode: ResponseCode,
    pub question_count: usize,
    pub answers: Vec<DnsRecord>,
    pub authority: Vec<DnsRecord>,
    pub additional: Vec<DnsRecord>,
}

/// An incoming query: its id, the question as the store sees it, and the
/// question exactly as it arrived on the wire.
#[derive(Debug, Clone)]
pub struct DecodedQuery {
    pub id: u16,
    pub question: DnsQuestion,
    pub query: Query,
}

pub struct MessageParser;

impl MessageParser {
    /// Decode an incoming query into its transaction id and first question.
    pub fn parse_query(bytes: &[u8]) -> Result<(u16, DnsQuestion), DomainError> {
        Self::decode_query(bytes).map(|decoded| (decoded.id, decoded.question))
    }

    /// Like [`MessageParser::parse_query`], keeping the wire question so the
    /// reply can echo it untouched.
    pub fn decode_query(bytes: &[u8]) -> Result<DecodedQuery, DomainError> {
        let message = Message::from_vec(bytes)
            .map_err(|e| DomainError::FormatError(format!("Failed to parse DNS query: {}", e)))?;

        if message.message_type() != MessageType::Query {
            return Err(DomainError::FormatError(
                "Message is a response, not a query".to_string(),
            ));
        }

        let query = message
            .queries()
            .first()
            .cloned()
            .ok_or_else(|| DomainError::FormatError("Query carries no question".to_string()))?;

        let question = DnsQuestion::new(
            &query.name().to_utf8(),
            RecordTypeMapper::from_hickory(query.query_type()),
        );

        Ok(DecodedQuery {
            id: message.id(),
            question,
            query,
        })
    }

    /// Transaction id of a query too damaged to decode.
    ///
    /// `None` when fewer than two bytes arrived or the QR bit marks the
    /// datagram as a response, which must never be answered.
    pub fn parse_query_id(bytes: &[u8]) -> Option<u16> {
        if bytes.len() < 2 {
            return None;
        }
        if bytes.get(2).is_some_and(|flags| flags & 0x80 != 0) {
            return None;
        }
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Decode an upstream reply.
    ///
    /// Records of types without a textual encoding are skipped.
    pub fn parse_response(bytes: &[u8]) -> Result<ParsedResponse, DomainError> {
        let message = Message::from_vec(bytes).map_err(|e| {
            DomainError::ProtocolError(format!("Failed to parse DNS response: {}", e))
        })?;

        let parsed = ParsedResponse {
            id: message.id(),
            authoritative: message.authoritative(),
            truncated: message.truncated(),
            rcode: ResponseCode::from_u16(u16::from(message.response_code())),
            question_count: message.queries().len(),
            answers: Self::convert_section(message.answers()),
            authority: Self::convert_section(message.name_servers()),
            additional: Self::convert_section(message.additionals()),
        };

        debug!(
            id = parsed.id,
            rcode = %parsed.rcode,
            authoritative = parsed.authoritative,
            answers = parsed.answers.len(),
            authority = parsed.authority.len(),
            additional = parsed.additional.len(),
            "DNS response parsed"
        );

        Ok(parsed)
    }

    fn convert_section(records: &[Record]) -> Vec<DnsRecord> {
        records.iter().filter_map(RDataConverter::from_record).collect()
    }
}
