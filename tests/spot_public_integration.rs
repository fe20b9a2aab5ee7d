use std::sync::Arc;

use rust_decimal::Decimal;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use binance_api_client::auth::{FixedClock, StaticCredentials};
use binance_api_client::error::ErrorKind;
use binance_api_client::spot::rest::account::AccountRequest;
use binance_api_client::spot::rest::{MarketApi, RestClient};

fn build_public_client(server: &MockServer) -> RestClient {
    RestClient::builder().base_url(server.uri()).build()
}

fn build_signed_client(server: &MockServer) -> RestClient {
    RestClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(StaticCredentials::new("test_key", "test_secret")))
        .timestamp_provider(Arc::new(FixedClock(1_700_000_000_000)))
        .build()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_ping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    build_public_client(&server).ping().await.unwrap();
}

#[tokio::test]
async fn test_get_server_time() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/time"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"serverTime": 1_499_827_319_559_i64})),
        )
        .mount(&server)
        .await;

    let time = build_public_client(&server).get_server_time().await.unwrap();
    assert_eq!(time.server_time, 1_499_827_319_559);
}

#[tokio::test]
async fn test_get_ticker_price() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/ticker/price"))
        .and(query_param("symbol", "LTCBTC"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"symbol": "LTCBTC", "price": "4.00000200"})),
        )
        .mount(&server)
        .await;

    let price = build_public_client(&server)
        .get_ticker_price("LTCBTC")
        .await
        .unwrap();
    assert_eq!(price.symbol, "LTCBTC");
    assert_eq!(price.price, dec("4.000002"));
}

#[tokio::test]
async fn test_get_ticker_price_invalid_symbol() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/ticker/price"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"code": -1121, "msg": "Invalid symbol."})),
        )
        .mount(&server)
        .await;

    let err = build_public_client(&server)
        .get_ticker_price("NOPE")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Exchange);
    assert!(err.exchange_error().unwrap().is_invalid_symbol());
}

#[tokio::test]
async fn test_get_all_prices_indexed_by_symbol() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/ticker/allPrices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"symbol": "LTCBTC", "price": "4.00000200"},
            {"symbol": "ETHBTC", "price": "0.07946600"}
        ])))
        .mount(&server)
        .await;

    let prices = build_public_client(&server).get_all_prices().await.unwrap();
    assert_eq!(prices.len(), 2);
    assert_eq!(prices["ETHBTC"].price, dec("0.079466"));
    assert_eq!(prices["LTCBTC"].price, dec("4.000002"));
}

#[tokio::test]
async fn test_get_account_signed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/account"))
        .and(header("X-MBX-APIKEY", "test_key"))
        .and(query_param("omitZeroBalances", "true"))
        .and(query_param("recvWindow", "5000"))
        .and(query_param("timestamp", "1700000000000"))
        .and(query_param(
            "signature",
            "b2ca1f4052cd507b0795dfc440118e0c9a5a800237fafe7f1669a5d5ac0a3c0d",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "makerCommission": 15,
            "takerCommission": 15,
            "canTrade": true,
            "canWithdraw": true,
            "canDeposit": true,
            "updateTime": 123456789,
            "accountType": "SPOT",
            "balances": [
                {"asset": "BTC", "free": "0.50000000", "locked": "0.10000000"}
            ]
        })))
        .mount(&server)
        .await;

    let request = AccountRequest {
        recv_window: Some(5000),
        omit_zero_balances: Some(true),
    };
    let account = build_signed_client(&server)
        .get_account(Some(&request))
        .await
        .unwrap();

    assert!(account.can_trade);
    let btc = account.balance("BTC").unwrap();
    assert_eq!(btc.free, dec("0.5"));
    assert_eq!(btc.locked, dec("0.1"));
}

#[tokio::test]
async fn test_get_account_rejected_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/account"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "code": -2015,
            "msg": "Invalid API-key, IP, or permissions for action."
        })))
        .mount(&server)
        .await;

    let err = build_signed_client(&server)
        .get_account(None)
        .await
        .unwrap_err();

    assert_eq!(err.code(), -2015);
    assert!(err.exchange_error().unwrap().is_invalid_key());
}

#[tokio::test]
async fn test_get_account_without_credentials() {
    let server = MockServer::start().await;
    let err = build_public_client(&server)
        .get_account(None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Credentials);
}

async fn latest_price(api: &impl MarketApi, symbol: &str) -> Option<Decimal> {
    api.get_all_prices()
        .await
        .ok()
        .and_then(|prices| prices.get(symbol).map(|p| p.price))
}

#[tokio::test]
async fn test_market_api_through_trait() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/ticker/allPrices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"symbol": "BNBBTC", "price": "0.00150000"}
        ])))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    assert_eq!(latest_price(&client, "BNBBTC").await, Some(dec("0.0015")));
    assert_eq!(latest_price(&client, "XRPBTC").await, None);
}
