//! # Rates Client SDK
//!
//! A typed Rust client for the Exchange Rates API.

use rates_types::{ConversionResponse, CurrencyListing};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exchange Rates API client.
pub struct RatesClient {
    base_url: String,
    http: Client,
}

impl RatesClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists supported currencies with metadata.
    pub async fn list_currencies(&self) -> Result<CurrencyListing, ClientError> {
        self.get("/api/currencies", &[]).await
    }

    /// Rates relative to `base` as a `{CODE: value}` map.
    ///
    /// An empty `codes` slice returns every currency.
    pub async fn rates(
        &self,
        base: &str,
        codes: &[&str],
    ) -> Result<ConversionResponse, ClientError> {
        self.convert(base, codes, false).await
    }

    /// Rates relative to `base` with currency metadata on every item.
    pub async fn rates_detailed(
        &self,
        base: &str,
        codes: &[&str],
    ) -> Result<ConversionResponse, ClientError> {
        self.convert(base, codes, true).await
    }

    async fn convert(
        &self,
        base: &str,
        codes: &[&str],
        detailed: bool,
    ) -> Result<ConversionResponse, ClientError> {
        let mut query = Vec::new();
        if !codes.is_empty() {
            query.push(("currencies", codes.join(",")));
        }
        if detailed {
            query.push(("additionalFields", "true".to_string()));
        }
        self.get(&format!("/api/currency/{}", base), &query).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
