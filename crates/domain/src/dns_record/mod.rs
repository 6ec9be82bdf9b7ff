pub mod record;
pub mod record_type;
pub mod response;

pub use record::DnsRecord;
pub use record_type::RecordType;
pub use response::{DnsResponse, ResponseCode};
