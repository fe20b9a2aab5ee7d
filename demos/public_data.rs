//! Example: Fetching public market data from Binance.
//!
//! This example demonstrates how to use the Binance REST API to fetch
//! publicly available market data without authentication.
//!
//! Run with: cargo run --example public_data

use binance_api_client::spot::rest::{Method, RestClient};

#[derive(Debug, serde::Serialize)]
struct DepthRequest<'a> {
    symbol: &'a str,
    limit: u32,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Depth {
    last_update_id: u64,
    bids: Vec<(String, String)>,
    asks: Vec<(String, String)>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Create a client for public endpoints (no credentials needed)
    let client = RestClient::new();

    println!("=== Connectivity ===");
    client.ping().await?;
    println!("Ping OK");

    println!("\n=== Server Time ===");
    let time = client.get_server_time().await?;
    println!("Server time (ms): {}", time.server_time);

    println!("\n=== Ticker Price (BTCUSDT) ===");
    let price = client.get_ticker_price("BTCUSDT").await?;
    println!("{}: {}", price.symbol, price.price);

    println!("\n=== All Prices ===");
    let prices = client.get_all_prices().await?;
    println!("{} symbols", prices.len());
    for symbol in ["ETHBTC", "BNBBTC", "LTCBTC"] {
        if let Some(p) = prices.get(symbol) {
            println!("{}: {}", symbol, p.price);
        }
    }

    // Endpoints without a wrapper go through the request engine directly.
    println!("\n=== Order Book (BTCUSDT, top 5) ===");
    let depth: Depth = client
        .request(
            Method::GET,
            "/api/v3/depth",
            &DepthRequest {
                symbol: "BTCUSDT",
                limit: 5,
            },
        )
        .await?;
    println!("Last update id: {}", depth.last_update_id);
    for (price, qty) in depth.asks.iter().rev() {
        println!("  ask {} x {}", price, qty);
    }
    for (price, qty) in &depth.bids {
        println!("  bid {} x {}", price, qty);
    }

    Ok(())
}
