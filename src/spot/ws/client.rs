//! WebSocket stream client implementation.

use std::future::Future;

use tokio_tungstenite::connect_async;

use crate::error::BinanceError;
use crate::spot::ws::stream::{self, Subscription};

/// WebSocket endpoint URLs.
pub mod endpoints {
    /// Raw stream endpoint; the stream name is appended to it.
    pub const WS_STREAM: &str = "wss://stream.binance.com:9443/ws/";
}

/// Default bound on concurrently running handler invocations.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 256;

/// Configuration for stream subscriptions.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Base URL the stream endpoint is appended to.
    pub base_url: String,
    /// Maximum handler invocations running at once (None = unbounded).
    ///
    /// When the bound is reached the read loop stops reading until a handler
    /// finishes, so a slow handler applies backpressure to the socket instead
    /// of piling up tasks.
    pub max_in_flight: Option<usize>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_url: endpoints::WS_STREAM.to_string(),
            max_in_flight: Some(DEFAULT_MAX_IN_FLIGHT),
        }
    }
}

impl StreamConfig {
    /// Create a new configuration builder.
    pub fn builder() -> StreamConfigBuilder {
        StreamConfigBuilder::new()
    }
}

/// Builder for [`StreamConfig`].
#[derive(Debug, Clone, Default)]
pub struct StreamConfigBuilder {
    config: StreamConfig,
}

impl StreamConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: StreamConfig::default(),
        }
    }

    /// Set the base URL (useful for testing against a local server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Bound concurrent handler invocations. Zero is treated as one.
    pub fn max_in_flight(mut self, limit: usize) -> Self {
        self.config.max_in_flight = Some(limit.max(1));
        self
    }

    /// Spawn every handler invocation immediately, without a bound.
    pub fn unbounded(mut self) -> Self {
        self.config.max_in_flight = None;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> StreamConfig {
        self.config
    }
}

/// Binance WebSocket stream client.
///
/// Each [`StreamClient::subscribe`] call opens its own connection and runs
/// its own read loop.
#[derive(Debug, Clone, Default)]
pub struct StreamClient {
    config: StreamConfig,
}

impl StreamClient {
    /// Create a new stream client with default settings.
    pub fn new() -> Self {
        Self::with_config(StreamConfig::default())
    }

    /// Create a new stream client with custom configuration.
    pub fn with_config(config: StreamConfig) -> Self {
        Self { config }
    }

    /// Create a client with a custom base URL (useful for testing).
    pub fn with_base_url(url: impl Into<String>) -> Self {
        Self::with_config(StreamConfig::builder().base_url(url).build())
    }

    /// Get the configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Full URL for a stream endpoint.
    pub fn stream_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Subscribe to a stream and hand every message to `handler`.
    ///
    /// Returns once the connection is established; the read loop then runs
    /// on a background task until the connection fails or the returned
    /// [`Subscription`] is closed.
    ///
    /// Each message is dispatched on its own task. Handlers may therefore run
    /// concurrently with each other and complete in any order relative to
    /// arrival; they must not assume delivery order.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use binance_api_client::spot::ws::{StreamClient, streams};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = StreamClient::new();
    ///     let subscription = client
    ///         .subscribe(&streams::trade("btcusdt"), |message| async move {
    ///             println!("{}", String::from_utf8_lossy(&message));
    ///         })
    ///         .await?;
    ///
    ///     tokio::time::sleep(std::time::Duration::from_secs(10)).await;
    ///     subscription.close();
    ///     subscription.wait().await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn subscribe<H, Fut>(
        &self,
        endpoint: &str,
        handler: H,
    ) -> Result<Subscription, BinanceError>
    where
        H: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let url = self.stream_url(endpoint);

        let (ws_stream, _) = match connect_async(url.as_str()).await {
            Ok(connected) => connected,
            Err(source) => return Err(BinanceError::Connect { url, source }),
        };

        tracing::info!(%url, "stream connected");

        Ok(stream::spawn(
            ws_stream,
            endpoint.to_string(),
            url,
            handler,
            self.config.max_in_flight,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_url() {
        let client = StreamClient::new();
        assert_eq!(
            client.stream_url("btcusdt@trade"),
            "wss://stream.binance.com:9443/ws/btcusdt@trade"
        );
    }

    #[test]
    fn test_config_builder() {
        let config = StreamConfig::builder()
            .base_url("ws://127.0.0.1:9000/ws/")
            .max_in_flight(0)
            .build();
        assert_eq!(config.base_url, "ws://127.0.0.1:9000/ws/");
        assert_eq!(config.max_in_flight, Some(1));

        let config = StreamConfig::builder().unbounded().build();
        assert_eq!(config.max_in_flight, None);
    }

    #[test]
    fn test_default_is_bounded() {
        assert_eq!(
            StreamConfig::default().max_in_flight,
            Some(DEFAULT_MAX_IN_FLIGHT)
        );
    }
}
