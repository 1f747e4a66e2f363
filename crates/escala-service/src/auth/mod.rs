//! Credential handling.
//!
//! - `authenticate`: basic-auth credential check against the configured user
//! - `password`: password hashing and verification with Argon2

pub mod authenticate;
pub mod password;

pub use authenticate::verify_basic_credentials;
