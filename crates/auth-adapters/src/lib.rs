//! # auth-adapters
//!
//! Concrete implementations of the identity-related ports: argon2 password
//! hashing and the HMAC-SHA256 session-token codec.

pub mod password;
pub mod token;

pub use password::Argon2Hasher;
pub use token::HmacSessionCodec;
