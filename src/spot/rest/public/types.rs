//! Types for public market data endpoints.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest price for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Trading pair symbol, e.g. `BTCUSDT`.
    pub symbol: String,
    /// Last traded price.
    pub price: Decimal,
}

/// Latest prices keyed by symbol.
pub type Prices = HashMap<String, Price>;

/// Server time response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    /// Server time in Unix milliseconds.
    pub server_time: i64,
}

/// Empty response body (`{}`) returned by endpoints like ping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Empty {}

/// Request parameters for the ticker price endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TickerPriceRequest {
    /// Symbol to price.
    pub symbol: String,
}

impl TickerPriceRequest {
    /// Create a request for one symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

/// Index a list of prices by symbol.
pub fn index_by_symbol(prices: Vec<Price>) -> Prices {
    prices
        .into_iter()
        .map(|price| (price.symbol.clone(), price))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_deserialize() {
        let price: Price =
            serde_json::from_str(r#"{"symbol":"LTCBTC","price":"4.00000200"}"#).unwrap();
        assert_eq!(price.symbol, "LTCBTC");
        assert_eq!(price.price, "4.000002".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_index_by_symbol() {
        let prices: Vec<Price> = serde_json::from_str(
            r#"[{"symbol":"LTCBTC","price":"4.00000200"},{"symbol":"ETHBTC","price":"0.07946600"}]"#,
        )
        .unwrap();
        let indexed = index_by_symbol(prices);
        assert_eq!(indexed.len(), 2);
        assert_eq!(indexed["ETHBTC"].symbol, "ETHBTC");
    }

    #[test]
    fn test_server_time_deserialize() {
        let time: ServerTime = serde_json::from_str(r#"{"serverTime":1499827319559}"#).unwrap();
        assert_eq!(time.server_time, 1499827319559);
    }
}
