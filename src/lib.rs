//! # Binance Client
//!
//! An async Rust client library for the Binance REST and WebSocket stream APIs.
//!
//! ## Features
//!
//! - Unsigned and HMAC-SHA256 signed REST requests
//! - One error type for transport, decode and exchange-reported failures
//! - WebSocket stream subscriptions with concurrent handler dispatch
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use binance_api_client::spot::rest::RestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::new();
//!     let time = client.get_server_time().await?;
//!     println!("Server time: {:?}", time);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod spot;

// Re-export commonly used types at crate root
pub use error::{BinanceError, ErrorKind, ExchangeError};
pub use spot::rest::{RestClient, RestClientBuilder};
pub use spot::ws::{StreamClient, StreamEnd, Subscription};

/// Result type alias using BinanceError
pub type Result<T> = std::result::Result<T, BinanceError>;
