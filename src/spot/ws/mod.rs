//! Binance WebSocket stream client.
//!
//! Each subscription owns one connection to the stream host. Messages are
//! delivered to the handler as raw bytes; decoding them is up to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use binance_api_client::spot::ws::{StreamClient, StreamEnd, streams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StreamClient::new();
//!     let subscription = client
//!         .subscribe(&streams::book_ticker("BTCUSDT"), |message| async move {
//!             let value: serde_json::Value = match serde_json::from_slice(&message) {
//!                 Ok(v) => v,
//!                 Err(_) => return,
//!             };
//!             println!("bid {} ask {}", value["b"], value["a"]);
//!         })
//!         .await?;
//!
//!     match subscription.wait().await? {
//!         StreamEnd::Closed { reason } => println!("closed by server: {reason:?}"),
//!         other => println!("stream ended: {other:?}"),
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod stream;
pub mod streams;

pub use client::{DEFAULT_MAX_IN_FLIGHT, StreamClient, StreamConfig, StreamConfigBuilder, endpoints};
pub use stream::{StreamEnd, Subscription};
