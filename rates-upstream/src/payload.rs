//! Provider payload decoding.
//!
//! The provider speaks the exchangerate-api "latest" format:
//! `{ result, base_code, time_last_update_unix, time_next_update_unix, rates }`.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::warn;

use rates_types::{RateSnapshot, RatesError, is_currency_code, normalize_code};

/// Raw provider response. Every field is optional so that error payloads,
/// which omit the rate table, still decode far enough to be reported.
#[derive(Debug, Deserialize)]
pub struct ProviderResponse {
    pub result: Option<String>,
    #[serde(rename = "error-type")]
    pub error_type: Option<String>,
    pub base_code: Option<String>,
    pub time_last_update_unix: Option<i64>,
    pub time_next_update_unix: Option<i64>,
    pub rates: Option<BTreeMap<String, f64>>,
}

impl ProviderResponse {
    /// Converts the payload into a validated snapshot.
    pub fn into_snapshot(self, fetched_at_unix: i64) -> Result<RateSnapshot, RatesError> {
        if self.result.as_deref() == Some("error") {
            return Err(RatesError::UpstreamUnavailable(format!(
                "provider reported error: {}",
                self.error_type.as_deref().unwrap_or("unknown")
            )));
        }

        let rates = self
            .rates
            .ok_or_else(|| RatesError::UpstreamMalformed("missing `rates` field".into()))?;
        let base_code = self
            .base_code
            .ok_or_else(|| RatesError::UpstreamMalformed("missing `base_code` field".into()))?;

        // A zero timestamp means "not reported".
        let last_update = self.time_last_update_unix.filter(|t| *t > 0);
        let next_update = self.time_next_update_unix.filter(|t| *t > 0);

        let snapshot = RateSnapshot::new(
            &base_code,
            usable_rates(rates),
            fetched_at_unix,
            last_update,
            next_update,
        )?;
        Ok(snapshot)
    }
}

/// Drops entries that cannot be quoted, so one bad code does not cost the
/// whole table. Keys come back normalized; the first spelling of a code wins.
fn usable_rates(rates: BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let mut usable = BTreeMap::new();
    for (raw_code, value) in rates {
        let code = normalize_code(&raw_code);
        if !is_currency_code(&code) {
            warn!(code = %raw_code, "Skipping rate with invalid currency code");
            continue;
        }
        if !value.is_finite() || value <= 0.0 {
            warn!(%code, value, "Skipping non-positive rate");
            continue;
        }
        if usable.contains_key(&code) {
            warn!(%code, "Skipping duplicate rate");
            continue;
        }
        usable.insert(code, value);
    }
    usable
}

/// Decodes a raw response body into a snapshot.
pub fn parse_snapshot(body: &[u8], fetched_at_unix: i64) -> Result<RateSnapshot, RatesError> {
    let response: ProviderResponse = serde_json::from_slice(body)
        .map_err(|e| RatesError::UpstreamMalformed(e.to_string()))?;
    response.into_snapshot(fetched_at_unix)
}
