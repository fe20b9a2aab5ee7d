//! Signed account endpoints.

mod types;

pub use types::*;

use reqwest::Method;

use crate::error::BinanceError;
use crate::spot::rest::RestClient;
use crate::spot::rest::endpoints::signed;

impl RestClient {
    /// Get current account information, including balances.
    ///
    /// Requires credentials.
    pub async fn get_account(
        &self,
        request: Option<&AccountRequest>,
    ) -> Result<AccountInfo, BinanceError> {
        match request {
            Some(req) => self.signed_request(Method::GET, signed::ACCOUNT, req).await,
            None => self.signed_request(Method::GET, signed::ACCOUNT, &()).await,
        }
    }
}
