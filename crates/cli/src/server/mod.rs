pub mod dns;
pub mod web;

pub use dns::{start_tcp_server, start_udp_server};
pub use web::start_doh_server;
