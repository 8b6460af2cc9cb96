//! Drives the client against a real server bound to a local port.

use std::sync::Arc;

use async_trait::async_trait;
use currency_meta::MetadataTable;
use rates_client::{ClientError, RatesClient};
use rates_hex::{CacheConfig, RateService, SnapshotCache, inbound::HttpServer};
use rates_types::{ConversionData, ManualClock, RateSnapshot, RateSource, RatesError};

struct FixedSource;

#[async_trait]
impl RateSource for FixedSource {
    async fn fetch(&self) -> Result<RateSnapshot, RatesError> {
        let rates = [("USD", 1.0), ("EUR", 0.9), ("GBP", 0.8)]
            .into_iter()
            .map(|(code, value)| (code.to_string(), value));
        Ok(RateSnapshot::new("USD", rates, 1_000, Some(900), Some(5_000)).unwrap())
    }
}

/// Helper to start the API and return a client pointed at it.
async fn start() -> RatesClient {
    let cache = SnapshotCache::with_config(
        FixedSource,
        Arc::new(ManualClock::new(1_000)),
        CacheConfig::default(),
    );
    let service = RateService::new(cache, Arc::new(MetadataTable::builtin().unwrap()));
    let router = HttpServer::new(service).router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    RatesClient::new(format!("http://{}/", addr))
}

#[tokio::test]
async fn test_health() {
    let client = start().await;
    assert!(client.health().await.unwrap());
}

#[tokio::test]
async fn test_list_currencies() {
    let client = start().await;

    let listing = client.list_currencies().await.unwrap();

    assert_eq!(listing.time_next_update_unix, Some(5_000));
    let codes: Vec<_> = listing.data.iter().map(|i| i.currency.as_str()).collect();
    assert_eq!(codes, vec!["EUR", "GBP", "USD"]);
}

#[tokio::test]
async fn test_rates_simple() {
    let client = start().await;

    let response = client.rates("gbp", &["usd", "eur"]).await.unwrap();

    assert_eq!(response.base, "GBP");
    match response.data {
        ConversionData::Simple(map) => {
            assert_eq!(map.len(), 2);
            assert_eq!(map["USD"], 1.25);
            assert_eq!(map["EUR"], 1.125);
        }
        other => panic!("expected map, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rates_detailed() {
    let client = start().await;

    let response = client.rates_detailed("USD", &[]).await.unwrap();

    match response.data {
        ConversionData::Detailed(items) => {
            assert_eq!(items.len(), 3);
            assert_eq!(items[1].currency, "GBP");
            assert_eq!(items[1].symbol.as_deref(), Some("£"));
        }
        other => panic!("expected items, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unsupported_base_is_api_error() {
    let client = start().await;

    let err = client.rates("ZZZ", &[]).await.unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Base currency ZZZ not supported");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}
