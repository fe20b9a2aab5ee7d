//! Public market data endpoints (no signature required).

mod types;

pub use types::*;

use reqwest::Method;

use crate::error::BinanceError;
use crate::spot::rest::RestClient;
use crate::spot::rest::endpoints::public;

impl RestClient {
    /// Test connectivity to the REST API.
    pub async fn ping(&self) -> Result<(), BinanceError> {
        let _: Empty = self.request(Method::GET, public::PING, &()).await?;
        Ok(())
    }

    /// Get the server time.
    ///
    /// Useful for checking local clock drift against the signed-request
    /// receive window.
    pub async fn get_server_time(&self) -> Result<ServerTime, BinanceError> {
        self.request(Method::GET, public::TIME, &()).await
    }

    /// Get the latest price for one symbol.
    pub async fn get_ticker_price(&self, symbol: &str) -> Result<Price, BinanceError> {
        self.request(Method::GET, public::TICKER_PRICE, &TickerPriceRequest::new(symbol))
            .await
    }

    /// Get the latest price for every symbol, keyed by symbol.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use binance_api_client::spot::rest::RestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = RestClient::new();
    ///     let prices = client.get_all_prices().await?;
    ///     if let Some(btc) = prices.get("BTCUSDT") {
    ///         println!("BTCUSDT: {}", btc.price);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_all_prices(&self) -> Result<Prices, BinanceError> {
        let prices: Vec<Price> = self.request(Method::GET, public::ALL_PRICES, &()).await?;
        Ok(index_by_symbol(prices))
    }
}
