//! Example: Streaming book ticker data via WebSocket.
//!
//! This example demonstrates how to subscribe to a Binance stream and
//! decode messages inside the handler.
//!
//! Run with: cargo run --example ws_ticker

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use binance_api_client::spot::ws::{StreamClient, StreamEnd, streams};

#[derive(Debug, serde::Deserialize)]
struct BookTicker {
    #[serde(rename = "s")]
    symbol: String,
    #[serde(rename = "b")]
    bid: String,
    #[serde(rename = "a")]
    ask: String,
}

const MAX_MESSAGES: usize = 50;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    tracing_subscriber::fmt::init();

    println!("Connecting to Binance stream...");

    let count = Arc::new(AtomicUsize::new(0));
    let done = Arc::new(tokio::sync::Notify::new());

    let client = StreamClient::new();
    let subscription = {
        let count = Arc::clone(&count);
        let done = Arc::clone(&done);
        client
            .subscribe(&streams::book_ticker("BTCUSDT"), move |message| {
                let count = Arc::clone(&count);
                let done = Arc::clone(&done);
                async move {
                    match serde_json::from_slice::<BookTicker>(&message) {
                        Ok(t) => println!("[Ticker] {} | Bid: {} | Ask: {}", t.symbol, t.bid, t.ask),
                        Err(e) => println!("[Undecodable] {}", e),
                    }
                    if count.fetch_add(1, Ordering::SeqCst) + 1 == MAX_MESSAGES {
                        done.notify_one();
                    }
                }
            })
            .await?
    };

    println!("Subscribed to {}. Press Ctrl+C to exit.\n", subscription.url());

    tokio::select! {
        _ = done.notified() => println!("\nReceived {} messages, closing...", MAX_MESSAGES),
        _ = tokio::signal::ctrl_c() => println!("\nInterrupted, closing..."),
    }

    subscription.close();
    match subscription.wait().await? {
        StreamEnd::Cancelled => println!("Connection closed."),
        StreamEnd::Closed { reason } => println!("Server closed the stream: {:?}", reason),
        StreamEnd::Ended => println!("Connection ended."),
    }

    Ok(())
}
