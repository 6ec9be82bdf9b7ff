pub mod builders;
pub mod dns_server_mock;
pub mod scripted_transport;

pub use builders::{query_name, ReplyBuilder};
pub use dns_server_mock::{MockBehavior, MockDnsServer};
pub use scripted_transport::ScriptedTransport;
