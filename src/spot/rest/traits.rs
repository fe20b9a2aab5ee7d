//! Trait definition for the Binance market data API.
//!
//! [`MarketApi`] abstracts the public market calls so strategies can be
//! written against a mock in tests, or against a decorator that caches
//! prices.
//!
//! # Example
//!
//! ```rust,ignore
//! use binance_api_client::spot::rest::{MarketApi, RestClient};
//!
//! async fn print_btc<C: MarketApi>(client: &C) -> Result<(), binance_api_client::BinanceError> {
//!     let price = client.get_ticker_price("BTCUSDT").await?;
//!     println!("BTCUSDT: {}", price.price);
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::error::BinanceError;
use crate::spot::rest::RestClient;
use crate::spot::rest::public::{Price, Prices, ServerTime};

/// Public market data operations.
pub trait MarketApi: Send + Sync {
    /// Test connectivity.
    fn ping(&self) -> impl Future<Output = Result<(), BinanceError>> + Send;

    /// Get the server time.
    fn get_server_time(&self) -> impl Future<Output = Result<ServerTime, BinanceError>> + Send;

    /// Get the latest price for one symbol.
    fn get_ticker_price(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Price, BinanceError>> + Send;

    /// Get the latest price for every symbol, keyed by symbol.
    fn get_all_prices(&self) -> impl Future<Output = Result<Prices, BinanceError>> + Send;
}

impl MarketApi for RestClient {
    async fn ping(&self) -> Result<(), BinanceError> {
        RestClient::ping(self).await
    }

    async fn get_server_time(&self) -> Result<ServerTime, BinanceError> {
        RestClient::get_server_time(self).await
    }

    async fn get_ticker_price(&self, symbol: &str) -> Result<Price, BinanceError> {
        RestClient::get_ticker_price(self, symbol).await
    }

    async fn get_all_prices(&self) -> Result<Prices, BinanceError> {
        RestClient::get_all_prices(self).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal::Decimal;

    use super::*;
    use crate::error::ExchangeError;

    struct FixedMarket {
        prices: Prices,
    }

    impl MarketApi for FixedMarket {
        async fn ping(&self) -> Result<(), BinanceError> {
            Ok(())
        }

        async fn get_server_time(&self) -> Result<ServerTime, BinanceError> {
            Ok(ServerTime {
                server_time: 1_700_000_000_000,
            })
        }

        async fn get_ticker_price(&self, symbol: &str) -> Result<Price, BinanceError> {
            self.prices.get(symbol).cloned().ok_or_else(|| {
                BinanceError::exchange(400, ExchangeError::new(-1121, "Invalid symbol."))
            })
        }

        async fn get_all_prices(&self) -> Result<Prices, BinanceError> {
            Ok(self.prices.clone())
        }
    }

    async fn spread<C: MarketApi>(client: &C, a: &str, b: &str) -> Result<Decimal, BinanceError> {
        let a = client.get_ticker_price(a).await?;
        let b = client.get_ticker_price(b).await?;
        Ok(a.price - b.price)
    }

    #[tokio::test]
    async fn test_generic_over_mock() {
        let mut prices = HashMap::new();
        for (symbol, price) in [("BTCUSDT", "100.5"), ("ETHUSDT", "10.25")] {
            prices.insert(
                symbol.to_string(),
                Price {
                    symbol: symbol.to_string(),
                    price: price.parse().unwrap(),
                },
            );
        }
        let market = FixedMarket { prices };

        let diff = spread(&market, "BTCUSDT", "ETHUSDT").await.unwrap();
        assert_eq!(diff, "90.25".parse::<Decimal>().unwrap());

        let err = spread(&market, "BTCUSDT", "NOPE").await.unwrap_err();
        assert_eq!(err.code(), -1121);
    }
}
