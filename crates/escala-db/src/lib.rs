//! PostgreSQL persistence for the shift board.

pub mod db;
pub mod error;
pub mod model;
