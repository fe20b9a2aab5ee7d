//! Error types for the Binance client library.

use serde::Deserialize;
use thiserror::Error;

/// The main error type for all Binance client operations.
#[derive(Error, Debug)]
pub enum BinanceError {
    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// Request parameters could not be turned into a query string
    #[error("Invalid request parameters: {0}")]
    InvalidParams(String),

    /// Binance returned a non-200 response
    #[error("Binance API error (HTTP {status}): {error}")]
    Exchange {
        /// HTTP status of the response
        status: u16,
        /// Code and message reported by the exchange
        error: ExchangeError,
        /// Set when the error body itself could not be decoded
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A 200 response body did not match the expected shape
    #[error("{message}: {source}")]
    Decode {
        /// Stable message for callers matching on text
        message: String,
        /// The underlying decode failure
        #[source]
        source: serde_json::Error,
    },

    /// WebSocket protocol error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The stream host could not be reached or refused the handshake
    #[error("Failed to connect to {url}: {source}")]
    Connect {
        /// Full stream URL that was dialed
        url: String,
        /// The underlying dial or handshake failure
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    /// WebSocket connection closed unexpectedly
    #[error("WebSocket connection closed: {reason}")]
    ConnectionClosed {
        /// Reason for the closure
        reason: String,
    },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for signed endpoints")]
    MissingCredentials,
}

/// Message used for 200 responses whose body is not the expected JSON.
pub const INVALID_JSON: &str = "Invalid JSON";

/// Coarse classification of a [`BinanceError`].
///
/// Stable across releases, so callers can match on it instead of on variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Base URL or endpoint could not form a valid URL.
    Url,
    /// Request parameters were not a flat map of scalars.
    Params,
    /// Network, TLS or timeout failure.
    Transport,
    /// The exchange reported an error.
    Exchange,
    /// The response body could not be decoded.
    Decode,
    /// Credentials missing or unusable.
    Credentials,
    /// WebSocket stream failure.
    Stream,
}

impl BinanceError {
    pub(crate) fn exchange(status: u16, error: ExchangeError) -> Self {
        Self::Exchange {
            status,
            error,
            source: None,
        }
    }

    pub(crate) fn undecodable_exchange(status: u16, source: serde_json::Error) -> Self {
        Self::Exchange {
            status,
            error: ExchangeError::new(0, source.to_string()),
            source: Some(source),
        }
    }

    pub(crate) fn invalid_json(source: serde_json::Error) -> Self {
        Self::Decode {
            message: INVALID_JSON.to_string(),
            source,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Url(_) => ErrorKind::Url,
            Self::InvalidParams(_) => ErrorKind::Params,
            Self::Http(_) | Self::HttpMiddleware(_) => ErrorKind::Transport,
            Self::Exchange { .. } => ErrorKind::Exchange,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Auth(_) | Self::MissingCredentials => ErrorKind::Credentials,
            Self::WebSocket(_)
            | Self::Connect { .. }
            | Self::ConnectionClosed { .. } => ErrorKind::Stream,
        }
    }

    /// The exchange error code, or `0` for errors not reported by the exchange.
    pub fn code(&self) -> i64 {
        match self {
            Self::Exchange { error, .. } => error.code,
            _ => 0,
        }
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Exchange { error, .. } => error.msg.clone(),
            Self::Decode { message, .. } => message.clone(),
            Self::InvalidParams(msg) | Self::Auth(msg) => msg.clone(),
            Self::ConnectionClosed { reason } => reason.clone(),
            other => other.to_string(),
        }
    }

    /// The exchange error, if this error was reported by Binance.
    pub fn exchange_error(&self) -> Option<&ExchangeError> {
        match self {
            Self::Exchange { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Binance API error code and message.
///
/// These are errors returned by the Binance API itself in the response body,
/// shaped as `{"code": -1121, "msg": "Invalid symbol."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExchangeError {
    /// The numeric error code (usually negative)
    pub code: i64,
    /// Human-readable error message
    pub msg: String,
}

impl std::fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.msg, self.code)
    }
}

impl ExchangeError {
    /// Create a new exchange error from code and message.
    pub fn new(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }

    /// Check if this is a request weight / order rate error.
    pub fn is_rate_limit(&self) -> bool {
        matches!(
            self.code,
            error_codes::TOO_MANY_REQUESTS | error_codes::TOO_MANY_ORDERS
        )
    }

    /// Check if the request timestamp fell outside the receive window.
    pub fn is_timestamp_rejected(&self) -> bool {
        self.code == error_codes::INVALID_TIMESTAMP
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == error_codes::INVALID_SIGNATURE
    }

    /// Check if this is an invalid or unauthorized API key error.
    pub fn is_invalid_key(&self) -> bool {
        matches!(
            self.code,
            error_codes::BAD_API_KEY_FORMAT | error_codes::REJECTED_MBX_KEY
        )
    }

    /// Check if this is an unknown symbol error.
    pub fn is_invalid_symbol(&self) -> bool {
        self.code == error_codes::INVALID_SYMBOL
    }
}

/// Known Binance error codes for pattern matching.
pub mod error_codes {
    // General server or network errors
    pub const UNKNOWN: i64 = -1000;
    pub const DISCONNECTED: i64 = -1001;
    pub const UNAUTHORIZED: i64 = -1002;
    pub const TOO_MANY_REQUESTS: i64 = -1003;
    pub const TOO_MANY_ORDERS: i64 = -1015;
    pub const INVALID_TIMESTAMP: i64 = -1021;
    pub const INVALID_SIGNATURE: i64 = -1022;

    // Request errors
    pub const ILLEGAL_CHARS: i64 = -1100;
    pub const MANDATORY_PARAM_EMPTY_OR_MALFORMED: i64 = -1102;
    pub const INVALID_SYMBOL: i64 = -1121;

    // Key errors
    pub const BAD_API_KEY_FORMAT: i64 = -2014;
    pub const REJECTED_MBX_KEY: i64 = -2015;
}
