//! Shared configuration, route constants and error types for the Escala workspace.

pub mod config;
pub mod constants;
pub mod error;
