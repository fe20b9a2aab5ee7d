//! Types for signed account endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request parameters for account information.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    /// How long (ms) after `timestamp` the request stays valid. Max 60000.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
    /// Only return non-zero balances.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omit_zero_balances: Option<bool>,
}

/// Account information.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Maker commission in basis points.
    #[serde(default)]
    pub maker_commission: i64,
    /// Taker commission in basis points.
    #[serde(default)]
    pub taker_commission: i64,
    /// Whether the account can trade.
    pub can_trade: bool,
    /// Whether the account can withdraw.
    pub can_withdraw: bool,
    /// Whether the account can deposit.
    pub can_deposit: bool,
    /// Last update time in Unix milliseconds.
    #[serde(default)]
    pub update_time: i64,
    /// Account type, e.g. `SPOT`.
    #[serde(default)]
    pub account_type: Option<String>,
    /// Per-asset balances.
    pub balances: Vec<Balance>,
}

/// Balance of a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Balance {
    /// Asset code, e.g. `BTC`.
    pub asset: String,
    /// Available amount.
    pub free: Decimal,
    /// Amount locked in open orders.
    pub locked: Decimal,
}

impl AccountInfo {
    /// Look up the balance of one asset.
    pub fn balance(&self, asset: &str) -> Option<&Balance> {
        self.balances.iter().find(|b| b.asset == asset)
    }
}
