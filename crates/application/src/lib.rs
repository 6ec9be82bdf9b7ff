//! Sluice DNS Application Layer
pub mod clock;
pub mod ports;
pub mod use_cases;
