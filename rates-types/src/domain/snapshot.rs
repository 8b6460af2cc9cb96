//! Immutable rate table fetched from the upstream provider.

use std::collections::BTreeMap;

use crate::error::DomainError;

/// Normalizes a client- or provider-supplied currency code (trimmed, uppercase).
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Returns true for a normalized three-letter ISO 4217 style code.
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// One fetched rate table with its validity metadata.
///
/// Rates are expressed as units of each currency per one unit of `base_code`.
/// A snapshot is never mutated after construction; the cache shares it behind
/// an `Arc` between all readers.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    base_code: String,
    rates: BTreeMap<String, f64>,
    fetched_at_unix: i64,
    last_update_unix: Option<i64>,
    next_update_unix: Option<i64>,
}

impl RateSnapshot {
    /// Builds a validated snapshot.
    ///
    /// Codes are normalized to uppercase. The base currency is added with a
    /// rate of 1.0 when the provider omitted it.
    pub fn new(
        base_code: &str,
        rates: impl IntoIterator<Item = (String, f64)>,
        fetched_at_unix: i64,
        last_update_unix: Option<i64>,
        next_update_unix: Option<i64>,
    ) -> Result<Self, DomainError> {
        let base_code = normalize_code(base_code);
        if !is_currency_code(&base_code) {
            return Err(DomainError::InvalidCode(base_code));
        }

        let mut normalized = BTreeMap::new();
        for (code, value) in rates {
            let code = normalize_code(&code);
            if !is_currency_code(&code) {
                return Err(DomainError::InvalidCode(code));
            }
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::InvalidRate { code, value });
            }
            if normalized.insert(code.clone(), value).is_some() {
                return Err(DomainError::DuplicateCode(code));
            }
        }

        if normalized.is_empty() {
            return Err(DomainError::EmptyRates);
        }
        normalized.entry(base_code.clone()).or_insert(1.0);

        Ok(Self {
            base_code,
            rates: normalized,
            fetched_at_unix,
            last_update_unix,
            next_update_unix,
        })
    }

    pub fn base_code(&self) -> &str {
        &self.base_code
    }

    /// All rates, ordered by currency code.
    pub fn rates(&self) -> &BTreeMap<String, f64> {
        &self.rates
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    pub fn fetched_at_unix(&self) -> i64 {
        self.fetched_at_unix
    }

    /// When the provider last refreshed its table, if reported.
    pub fn last_update_unix(&self) -> Option<i64> {
        self.last_update_unix
    }

    /// When the provider plans its next refresh, if reported.
    pub fn next_update_unix(&self) -> Option<i64> {
        self.next_update_unix
    }
}
