//! Authentication module for Binance API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Timestamp generation for the signed-request freshness window
//! - HMAC-SHA256 signature generation for signed requests

mod clock;
mod credentials;
mod signature;

pub use clock::{FixedClock, SystemClock, TimestampProvider};
pub use credentials::{
    API_KEY_VAR, API_SECRET_VAR, Credentials, CredentialsProvider, EnvCredentials,
    StaticCredentials,
};
pub use signature::sign_query;
