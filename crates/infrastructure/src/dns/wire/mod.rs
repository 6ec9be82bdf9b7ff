pub mod message_builder;
pub mod message_parser;
pub mod rdata;
pub mod record_type_map;

pub use message_builder::MessageBuilder;
pub use message_parser::{DecodedQuery, MessageParser, ParsedResponse};
pub use rdata::RDataConverter;
pub use record_type_map::RecordTypeMapper;
