//! HMAC-SHA256 signature generation for Binance signed endpoints.
//!
//! Signed endpoints (`TRADE`, `USER_DATA`) require a `signature` parameter
//! computed as:
//! ```text
//! hex(HMAC-SHA256(secret_key, query_string))
//! ```
//!
//! where `query_string` is the encoded query exactly as sent, including the
//! `timestamp` parameter and excluding `signature` itself.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::BinanceError;

type HmacSha256 = Hmac<Sha256>;

/// Sign an encoded query string.
///
/// # Example
///
/// ```rust
/// use binance_api_client::auth::{Credentials, sign_query};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "secret_key");
/// let signature = sign_query(&credentials, "symbol=BTCUSDT&timestamp=1700000000000")?;
/// assert_eq!(signature.len(), 64);
/// # Ok(())
/// # }
/// ```
pub fn sign_query(credentials: &Credentials, query: &str) -> Result<String, BinanceError> {
    let mut mac = HmacSha256::new_from_slice(credentials.secret_bytes())
        .map_err(|e| BinanceError::Auth(format!("Invalid HMAC key: {e}")))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
