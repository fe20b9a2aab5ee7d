//! Example: Working with BinanceError and ExchangeError.
//!
//! Run with: cargo run --example error_handling

use binance_api_client::error::{ErrorKind, error_codes};
use binance_api_client::spot::rest::RestClient;
use binance_api_client::{BinanceError, ExchangeError};

#[tokio::main]
async fn main() {
    let exchange_error = ExchangeError::new(error_codes::TOO_MANY_REQUESTS, "Too many requests.");
    println!("Exchange error: {}", exchange_error);
    println!("Is rate limit: {}", exchange_error.is_rate_limit());

    // Signed endpoints need credentials; without them the call fails before
    // anything is sent.
    let client = RestClient::new();
    match client.get_account(None).await {
        Ok(_) => println!("Unexpected success"),
        Err(BinanceError::MissingCredentials) => println!("No credentials configured"),
        Err(e) => println!("Other error: {}", e),
    }

    // Exchange-reported failures carry the Binance code and message.
    match client.get_ticker_price("NOT_A_SYMBOL").await {
        Ok(price) => println!("Price: {}", price.price),
        Err(e) if e.kind() == ErrorKind::Exchange => {
            println!("Binance said {} (code {})", e.message(), e.code());
            if e.code() == error_codes::INVALID_SYMBOL {
                println!("Matched known invalid symbol error");
            }
        }
        Err(e) => println!("Request failed ({:?}): {}", e.kind(), e),
    }
}
