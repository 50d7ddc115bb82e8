use std::time::Duration;

use muhasib::client::BirdeyeClient;
use muhasib::client::MarketDataClient;
use muhasib::client::make_market_data_client;
use muhasib::config::MarketDataConfig;
use muhasib::error::MarketDataError;
use muhasib::model::PricePoint;
use pretty_assertions::assert_eq;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

const TOKEN: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

fn client(server: &MockServer) -> BirdeyeClient {
    BirdeyeClient::new(&server.uri(), "test-key", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn price_history_sends_auth_headers_and_reads_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defi/history_price"))
        .and(header("X-API-KEY", "test-key"))
        .and(header("x-chain", "solana"))
        .and(query_param("address", TOKEN))
        .and(query_param("address_type", "token"))
        .and(query_param("type", "1m"))
        .and(query_param("time_from", "100"))
        .and(query_param("time_to", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"items": [
                {"unixTime": 120, "value": 1.25, "address": TOKEN},
                {"unixTime": 180, "value": 1.5}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let points = client(&server).price_history(TOKEN, 100, 200).await;

    assert_eq!(points, vec![
        PricePoint { unix_time: 120, value: 1.25 },
        PricePoint { unix_time: 180, value: 1.5 },
    ]);
}

#[tokio::test]
async fn rate_limit_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(path("/defi/history_price")).respond_with(ResponseTemplate::new(429)).mount(&server).await;
    let client = client(&server);

    let err = client.try_price_history(TOKEN, 0, 1).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<MarketDataError>(), Some(MarketDataError::RateLimited(_))));

    assert!(client.price_history(TOKEN, 0, 1).await.is_empty());
}

#[tokio::test]
async fn unauthorized_metadata_falls_back_to_placeholder() {
    let server = MockServer::start().await;
    Mock::given(path("/defi/token_overview")).respond_with(ResponseTemplate::new(401)).mount(&server).await;
    let client = client(&server);

    let err = client.try_token_metadata(TOKEN).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<MarketDataError>(), Some(MarketDataError::Unauthorized)));

    let metadata = client.token_metadata(TOKEN).await;
    assert!(metadata.is_unknown());
    assert_eq!(metadata.name, "Unknown Token");
    assert_eq!(metadata.address, TOKEN);
}

#[tokio::test]
async fn token_overview_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defi/token_overview"))
        .and(query_param("address", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"address": TOKEN, "symbol": "USDC", "name": "USD Coin", "decimals": 6, "price": 1.0, "holder": 1234}
        })))
        .mount(&server)
        .await;

    let metadata = client(&server).token_metadata(TOKEN).await;

    assert_eq!(metadata.symbol, "USDC");
    assert_eq!(metadata.decimals, Some(6));
    assert_eq!(metadata.holder, Some(1234));
    assert!(!metadata.is_unknown());
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(path("/defi/token_overview"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server).try_token_metadata(TOKEN).await.unwrap_err();

    match err.downcast_ref::<MarketDataError>() {
        Some(MarketDataError::UnexpectedStatus { status, body }) => {
            assert_eq!(*status, 500);
            assert_eq!(body, "boom");
        },
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn configured_key_selects_birdeye() {
    let server = MockServer::start().await;
    Mock::given(path("/defi/history_price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {"items": []}})))
        .expect(1)
        .mount(&server)
        .await;
    let config = MarketDataConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.uri(),
        timeout_ms: 5_000,
    };

    let market = make_market_data_client(&config);

    assert!(market.is_enabled());
    assert!(market.price_history(TOKEN, 0, 1).await.is_empty());
}
