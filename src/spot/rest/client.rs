//! Binance Spot REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::{CredentialsProvider, SystemClock, TimestampProvider};
use crate::error::{BinanceError, ExchangeError};
use crate::spot::rest::endpoints::{API_KEY_HEADER, BINANCE_BASE_URL, USER_AGENT_HEADER};
use crate::spot::rest::observer::{RequestObserver, TracingObserver};
use crate::spot::rest::query::{build_query, build_signed_query};

/// The Binance Spot REST API client.
///
/// Every call goes through one of two methods: [`RestClient::request`] for
/// public endpoints and [`RestClient::signed_request`] for endpoints that
/// need an HMAC signature. Both decode a 200 body into the caller's type and
/// turn anything else into a [`BinanceError`]. Nothing is retried.
///
/// The client is cheap to clone and safe to share between tasks; its
/// configuration is fixed at [`RestClientBuilder::build`].
///
/// # Example
///
/// ```rust,no_run
/// use binance_api_client::spot::rest::RestClient;
///
/// #[derive(Debug, serde::Deserialize)]
/// struct Price {
///     symbol: String,
///     price: String,
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RestClient::new();
///
///     #[derive(serde::Serialize)]
///     struct Params<'a> {
///         symbol: &'a str,
///     }
///
///     let price: Price = client
///         .request(reqwest::Method::GET, "/api/v3/ticker/price", &Params { symbol: "BTCUSDT" })
///         .await?;
///     println!("{price:?}");
///     Ok(())
/// }
/// ```
///
/// For signed endpoints, provide credentials:
///
/// ```rust,no_run
/// use binance_api_client::spot::rest::RestClient;
/// use binance_api_client::auth::StaticCredentials;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "secret_key"));
///     let client = RestClient::builder()
///         .credentials(credentials)
///         .build();
///
///     let account: serde_json::Value = client
///         .signed_request(reqwest::Method::GET, "/api/v3/account", &())
///         .await?;
///     println!("{account}");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    user_agent: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    clock: Arc<dyn TimestampProvider>,
    observer: Arc<dyn RequestObserver>,
}

impl RestClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`RestClient::builder()`] to configure credentials for signed endpoints.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::new()
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Whether credentials are configured.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Make an unsigned request.
    ///
    /// For `GET`, `params` is flattened into the query string. For other
    /// methods the parameters are not sent.
    pub async fn request<T, P>(
        &self,
        method: Method,
        endpoint: &str,
        params: &P,
    ) -> Result<T, BinanceError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let mut url = self.endpoint_url(endpoint)?;

        if method == Method::GET {
            let query = build_query(params)?;
            if !query.is_empty() {
                url.set_query(Some(&query));
            }
        }

        self.execute(method, url).await
    }

    /// Make a signed request.
    ///
    /// `params` is flattened into the query string for every method, followed
    /// by the current `timestamp` and the trailing `signature`.
    pub async fn signed_request<T, P>(
        &self,
        method: Method,
        endpoint: &str,
        params: &P,
    ) -> Result<T, BinanceError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let mut url = self.endpoint_url(endpoint)?;

        let credentials = self
            .credentials
            .as_ref()
            .ok_or(BinanceError::MissingCredentials)?;

        let query = build_signed_query(
            params,
            credentials.get_credentials(),
            self.clock.timestamp_ms(),
        )?;
        url.set_query(Some(&query));

        self.execute(method, url).await
    }

    /// Resolve an endpoint path against the base URL.
    fn endpoint_url(&self, endpoint: &str) -> Result<Url, BinanceError> {
        let mut url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(BinanceError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let path = format!("{}{}", url.path().trim_end_matches('/'), endpoint);
        url.set_path(&path);
        url.set_query(None);
        Ok(url)
    }

    async fn execute<T>(&self, method: Method, url: Url) -> Result<T, BinanceError>
    where
        T: DeserializeOwned,
    {
        let api_key = self
            .credentials
            .as_ref()
            .map(|c| c.get_credentials().api_key.as_str())
            .unwrap_or_default();

        self.observer.on_request(&method, &url);

        let response = self
            .http_client
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .header(USER_AGENT_HEADER, &self.user_agent)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        // Reading the full body releases the connection on every path below.
        let body = response.bytes().await?;

        self.observer.on_response(&method, &url, status, body.len());

        parse_response(status, &body)
    }
}

/// Turn a status and body into the caller's type or a [`BinanceError`].
pub(crate) fn parse_response<T>(status: StatusCode, body: &[u8]) -> Result<T, BinanceError>
where
    T: DeserializeOwned,
{
    if status != StatusCode::OK {
        return Err(match serde_json::from_slice::<ExchangeError>(body) {
            Ok(error) => BinanceError::exchange(status.as_u16(), error),
            Err(e) => BinanceError::undecodable_exchange(status.as_u16(), e),
        });
    }

    serde_json::from_slice(body).map_err(BinanceError::invalid_json)
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`RestClient`].
pub struct RestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    http_client: Option<reqwest::Client>,
    middleware_client: Option<ClientWithMiddleware>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    clock: Option<Arc<dyn TimestampProvider>>,
    observer: Option<Arc<dyn RequestObserver>>,
}

impl RestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: BINANCE_BASE_URL.to_string(),
            credentials: None,
            http_client: None,
            middleware_client: None,
            user_agent: None,
            timeout: None,
            clock: None,
            observer: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    ///
    /// The URL is validated per request; an invalid URL makes every call
    /// fail with [`BinanceError::Url`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for signed requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Use an existing `reqwest` client as transport.
    ///
    /// It is wrapped with tracing middleware at build time.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Use a fully assembled middleware client as transport, as-is.
    pub fn middleware_client(mut self, client: ClientWithMiddleware) -> Self {
        self.middleware_client = Some(client);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a total request timeout for the default transport.
    ///
    /// Ignored when a transport is supplied explicitly.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom timestamp provider for signed requests.
    pub fn timestamp_provider(mut self, clock: Arc<dyn TimestampProvider>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the observer that receives request and response events.
    pub fn observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the client.
    pub fn build(self) -> RestClient {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("binance-api-client/{}", env!("CARGO_PKG_VERSION")));

        let http_client = match (self.middleware_client, self.http_client) {
            (Some(client), _) => client,
            (None, Some(client)) => ClientBuilder::new(client)
                .with(TracingMiddleware::default())
                .build(),
            (None, None) => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                let client = builder.build().unwrap_or_else(|_| reqwest::Client::new());
                ClientBuilder::new(client)
                    .with(TracingMiddleware::default())
                    .build()
            }
        };

        RestClient {
            http_client,
            base_url: self.base_url,
            user_agent,
            credentials: self.credentials,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            observer: self.observer.unwrap_or_else(|| Arc::new(TracingObserver)),
        }
    }
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, INVALID_JSON};

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Out {
        account: i64,
        address: String,
    }

    #[test]
    fn test_parse_ok() {
        let out: Out =
            parse_response(StatusCode::OK, br#"{"account": 1, "address": "test_address"}"#).unwrap();
        assert_eq!(
            out,
            Out {
                account: 1,
                address: "test_address".into()
            }
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_response::<Out>(StatusCode::OK, br#"{"code": 200, "key":}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.code(), 0);
        assert_eq!(err.message(), INVALID_JSON);
    }

    #[test]
    fn test_parse_wrong_shape_is_decode_error() {
        let err = parse_response::<Out>(StatusCode::OK, br#"{"account": "one"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_parse_exchange_error() {
        let err = parse_response::<Out>(StatusCode::NOT_FOUND, br#"{"code": 404, "msg": "url not found"}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Exchange);
        assert_eq!(err.code(), 404);
        assert_eq!(err.message(), "url not found");
    }

    #[test]
    fn test_parse_non_200_success_status_is_error() {
        // Only 200 counts as success.
        let err = parse_response::<Out>(StatusCode::CREATED, br#"{"code": -1, "msg": "created"}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Exchange);
        assert_eq!(err.code(), -1);
    }

    #[test]
    fn test_parse_undecodable_error_body() {
        let err = parse_response::<Out>(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Exchange);
        assert_eq!(err.code(), 0);
        assert!(!err.message().is_empty());
    }

    #[test]
    fn test_endpoint_url_joins_paths() {
        let client = RestClient::builder().base_url("http://x").build();
        let url = client.endpoint_url("/api/v1/ticker/price").unwrap();
        assert_eq!(url.as_str(), "http://x/api/v1/ticker/price");

        let client = RestClient::builder().base_url("http://x/proxy/").build();
        let url = client.endpoint_url("/api/v3/time").unwrap();
        assert_eq!(url.as_str(), "http://x/proxy/api/v3/time");
    }

    #[test]
    fn test_endpoint_url_rejects_relative_base() {
        let client = RestClient::builder().base_url("not a url").build();
        let err = client.endpoint_url("/api/v3/time").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Url);
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = RestClient::builder()
            .credentials(Arc::new(crate::auth::StaticCredentials::new("key", "hidden")))
            .build();
        let debug = format!("{client:?}");
        assert!(debug.contains("has_credentials: true"));
        assert!(!debug.contains("hidden"));
    }
}
