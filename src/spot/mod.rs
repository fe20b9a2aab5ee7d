//! Binance Spot API clients.
//!
//! This module provides:
//! - [`rest`] - REST API client for unsigned and signed HTTP requests
//! - [`ws`] - WebSocket stream subscriptions

pub mod rest;
pub mod ws;

pub use rest::RestClient;
pub use ws::StreamClient;
