pub mod doh;

pub use doh::{DnsJsonAnswer, DnsJsonResponse, DohGetParams, JsonQuestion};
