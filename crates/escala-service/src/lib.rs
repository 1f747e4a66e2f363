//! Board services: storage backends, the stateful shift board, shift and
//! employee lookups, and credential checks.

pub mod auth;
pub mod board;
pub mod error;
pub mod store;
