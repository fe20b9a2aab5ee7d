//! Binance REST API endpoint constants.

/// Base URL for the Binance REST API.
pub const BINANCE_BASE_URL: &str = "https://api.binance.com";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Header carrying the client's user agent string.
pub const USER_AGENT_HEADER: &str = "UserAgent";

/// Public endpoints (no signature required).
pub mod public {
    /// Test connectivity.
    pub const PING: &str = "/api/v3/ping";
    /// Get server time.
    pub const TIME: &str = "/api/v3/time";
    /// Latest price for a symbol.
    pub const TICKER_PRICE: &str = "/api/v3/ticker/price";
    /// Latest price for all symbols.
    pub const ALL_PRICES: &str = "/api/v1/ticker/allPrices";
}

/// Signed endpoints (`USER_DATA` security).
pub mod signed {
    /// Get current account information.
    pub const ACCOUNT: &str = "/api/v3/account";
}
