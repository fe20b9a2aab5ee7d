//! Stream endpoint names.
//!
//! Binance stream names are lowercase symbols joined to a stream type with
//! `@`, e.g. `btcusdt@trade`. These helpers lowercase the symbol for you.

/// Raw trades for a symbol.
pub fn trade(symbol: &str) -> String {
    format!("{}@trade", symbol.to_lowercase())
}

/// Aggregate trades for a symbol.
pub fn agg_trade(symbol: &str) -> String {
    format!("{}@aggTrade", symbol.to_lowercase())
}

/// Candlesticks for a symbol at an interval such as `1m` or `1h`.
pub fn kline(symbol: &str, interval: &str) -> String {
    format!("{}@kline_{}", symbol.to_lowercase(), interval)
}

/// Rolling 24h ticker for a symbol.
pub fn ticker(symbol: &str) -> String {
    format!("{}@ticker", symbol.to_lowercase())
}

/// Rolling 24h mini ticker for a symbol.
pub fn mini_ticker(symbol: &str) -> String {
    format!("{}@miniTicker", symbol.to_lowercase())
}

/// Best bid/ask updates for a symbol.
pub fn book_ticker(symbol: &str) -> String {
    format!("{}@bookTicker", symbol.to_lowercase())
}

/// Diff depth updates for a symbol.
pub fn depth(symbol: &str) -> String {
    format!("{}@depth", symbol.to_lowercase())
}

/// Top `levels` (5, 10 or 20) of the book for a symbol.
pub fn partial_depth(symbol: &str, levels: u16) -> String {
    format!("{}@depth{}", symbol.to_lowercase(), levels)
}

/// Mini tickers for every symbol.
pub const ALL_MINI_TICKERS: &str = "!miniTicker@arr";

/// Tickers for every symbol.
pub const ALL_TICKERS: &str = "!ticker@arr";
