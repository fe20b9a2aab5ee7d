//! Binance Spot REST API client.
//!
//! [`RestClient`] is the request engine: [`RestClient::request`] for public
//! endpoints, [`RestClient::signed_request`] for endpoints that need an HMAC
//! signature. The endpoint methods in [`public`] and [`account`] are thin
//! wrappers over those two.
//!
//! # Trait-based API
//!
//! The [`MarketApi`] trait abstracts the public market operations, enabling
//! mock implementations for testing.
//!
//! ```rust,ignore
//! use binance_api_client::spot::rest::{MarketApi, RestClient};
//!
//! async fn use_client<C: MarketApi>(client: &C) -> Result<(), binance_api_client::BinanceError> {
//!     let time = client.get_server_time().await?;
//!     println!("Server time: {}", time.server_time);
//!     Ok(())
//! }
//! ```

pub mod account;
mod client;
mod endpoints;
mod observer;
pub mod public;
mod query;
mod traits;

pub use client::{RestClient, RestClientBuilder};
pub use endpoints::*;
pub use observer::{NoopObserver, RequestObserver, TracingObserver, redact_signature};
pub use query::{SIGNATURE_PARAM, TIMESTAMP_PARAM, build_query, build_signed_query, flatten_params};
pub use traits::MarketApi;

pub use reqwest::Method;
