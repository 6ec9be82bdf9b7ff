#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, NS};
use hickory_proto::rr::{Name, RData, Record};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Question name of a wire query, as FQDN text.
pub fn query_name(query: &[u8]) -> String {
    let message = Message::from_vec(query).expect("query should decode");
    message.queries()[0].name().to_utf8()
}

/// Builds the reply a nameserver would send to a given query.
pub struct ReplyBuilder {
    message: Message,
}

impl ReplyBuilder {
    /// Reply with the query's id and question echoed, NOERROR.
    pub fn for_query(query: &[u8]) -> Self {
        let request = Message::from_vec(query).expect("query should decode");
        let mut message = Message::new(request.id(), MessageType::Response, OpCode::Query);
        message.set_recursion_desired(request.recursion_desired());
        for question in request.queries() {
            message.add_query(question.clone());
        }
        Self { message }
    }

    pub fn authoritative(mut self) -> Self {
        self.message.set_authoritative(true);
        self
    }

    pub fn rcode(mut self, rcode: ResponseCode) -> Self {
        self.message.set_response_code(rcode);
        self
    }

    pub fn id(mut self, id: u16) -> Self {
        let mut header = *self.message.header();
        header.set_id(id);
        self.message.set_header(header);
        self
    }

    pub fn answer_a(mut self, name: &str, ip: &str, ttl: u32) -> Self {
        self.message.add_answer(a_record(name, ip, ttl));
        self
    }

    pub fn answer(mut self, record: Record) -> Self {
        self.message.add_answer(record);
        self
    }

    /// Delegate `zone` to `nameserver` in the authority section.
    pub fn referral(mut self, zone: &str, nameserver: &str) -> Self {
        let record = Record::from_rdata(
            Name::from_str(zone).unwrap(),
            172800,
            RData::NS(NS(Name::from_str(nameserver).unwrap())),
        );
        self.message.add_name_server(record);
        self
    }

    /// Glue address for a nameserver in the additional section.
    pub fn glue(mut self, nameserver: &str, ip: &str) -> Self {
        self.message.add_additional(a_record(nameserver, ip, 172800));
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.message.to_vec().expect("reply should encode")
    }
}

pub fn a_record(name: &str, ip: &str, ttl: u32) -> Record {
    Record::from_rdata(
        Name::from_str(name).unwrap(),
        ttl,
        RData::A(A(Ipv4Addr::from_str(ip).unwrap())),
    )
}
