//! Request observation hooks.
//!
//! The client reports every request and response to a [`RequestObserver`]
//! instead of writing to a global log. The default [`TracingObserver`] emits
//! `tracing` events; [`NoopObserver`] discards everything.

use reqwest::{Method, StatusCode};
use url::Url;

use crate::spot::rest::query::SIGNATURE_PARAM;

/// Receives a callback for each request the REST client performs.
///
/// Implementations must be cheap; they run inline on the request path.
pub trait RequestObserver: Send + Sync {
    /// Called right before the request is sent.
    fn on_request(&self, method: &Method, url: &Url) {
        let _ = (method, url);
    }

    /// Called once the response body has been read.
    fn on_response(&self, method: &Method, url: &Url, status: StatusCode, body_len: usize) {
        let _ = (method, url, status, body_len);
    }
}

/// Observer logging requests at `debug` level through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, method: &Method, url: &Url) {
        tracing::debug!(%method, url = %redact_signature(url), "sending request");
    }

    fn on_response(&self, method: &Method, url: &Url, status: StatusCode, body_len: usize) {
        tracing::debug!(
            %method,
            path = url.path(),
            status = status.as_u16(),
            body_len,
            "received response"
        );
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {}

/// Render a URL with the `signature` value masked.
pub fn redact_signature(url: &Url) -> String {
    let Some(query) = url.query() else {
        return url.to_string();
    };

    let redacted: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if key == SIGNATURE_PARAM => format!("{key}=[REDACTED]"),
            _ => pair.to_string(),
        })
        .collect();

    let mut url = url.clone();
    url.set_query(Some(&redacted.join("&")));
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_signature() {
        let url = Url::parse("https://api.binance.com/api/v3/account?timestamp=1&signature=abcdef")
            .unwrap();
        assert_eq!(
            redact_signature(&url),
            "https://api.binance.com/api/v3/account?timestamp=1&signature=[REDACTED]"
        );
    }

    #[test]
    fn test_redact_without_query() {
        let url = Url::parse("https://api.binance.com/api/v3/ping").unwrap();
        assert_eq!(redact_signature(&url), "https://api.binance.com/api/v3/ping");
    }
}
