//! HTTP rate source adapter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use rates_types::{Clock, RateSnapshot, RateSource, RatesError, SystemClock};

use crate::payload::parse_snapshot;

/// Upstream timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Upstream connection settings.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Provider URL. Fetches fail with `RatesError::Config` while unset.
    pub url: Option<String>,
    /// Bound on the whole request, connect through body.
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP Rate Source
// ─────────────────────────────────────────────────────────────────────────────

/// Fetches the latest rate table from the configured provider.
pub struct HttpRateSource {
    client: reqwest::Client,
    url: Option<String>,
    timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl HttpRateSource {
    /// Creates a new source using the system clock.
    pub fn new(config: UpstreamConfig) -> Result<Self, RatesError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RatesError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.filter(|url| !url.trim().is_empty()),
            timeout: config.timeout,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replaces the clock used to stamp `fetched_at_unix`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn transport_error(&self, err: reqwest::Error) -> RatesError {
        if err.is_timeout() {
            RatesError::UpstreamUnavailable(format!("request timed out after {:?}", self.timeout))
        } else {
            // Provider URLs carry the API key; keep them out of messages.
            RatesError::UpstreamUnavailable(err.without_url().to_string())
        }
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<RateSnapshot, RatesError> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| RatesError::Config("RATES_SOURCE_URL is required".into()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Rate provider returned an error status");
            return Err(RatesError::UpstreamUnavailable(format!(
                "provider returned HTTP {}",
                status
            )));
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let snapshot = parse_snapshot(&body, self.clock.now_unix())?;

        info!(
            base = snapshot.base_code(),
            currencies = snapshot.rates().len(),
            next_update = ?snapshot.next_update_unix(),
            "Fetched latest rates"
        );
        Ok(snapshot)
    }
}
