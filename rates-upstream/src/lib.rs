//! # Rates Upstream
//!
//! Outbound adapter for the exchange rates service.
//! This crate provides the HTTP client that implements the `RateSource` port
//! against the single configured rate provider.

pub mod http;
pub mod payload;

use std::time::Duration;

pub use http::{DEFAULT_TIMEOUT, HttpRateSource, UpstreamConfig};
pub use payload::{ProviderResponse, parse_snapshot};

/// Build a rate source for the given provider URL.
///
/// # Examples
///
/// ```ignore
/// let source = build_source("https://v6.exchangerate-api.com/v6/KEY/latest/USD", DEFAULT_TIMEOUT)?;
/// ```
pub fn build_source(url: &str, timeout: Duration) -> anyhow::Result<HttpRateSource> {
    let source = HttpRateSource::new(UpstreamConfig {
        url: Some(url.to_string()),
        timeout,
    })?;
    Ok(source)
}
