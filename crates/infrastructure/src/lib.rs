//! Sluice DNS Infrastructure Layer
//!
//! Wire codec, record store, UDP transport and the two resolution
//! strategies (upstream forwarding and iterative recursion), tied together
//! by the [`dns::ResolutionEngine`].

pub mod dns;
