//! Static Currency Metadata
//!
//! Display metadata (country, symbol, flag) for currency codes, loaded once at
//! startup from a JSON document and validated up front. Lookups never fail: a
//! code without an entry resolves to an empty [`CurrencyMeta`].
//!
//! # Document format
//! ```json
//! {
//!   "USD": { "countryName": "United States", "countryCode": "US", "symbol": "$", "flag": "🇺🇸" },
//!   "XAU": { "country": "Gold" }
//! }
//! ```
//! `country` is accepted as a fallback for both `countryName` and `countryCode`.
//! Empty strings are treated as missing.
//!
//! # Example
//! ```
//! use currency_meta::MetadataTable;
//!
//! let table = MetadataTable::builtin().unwrap();
//! assert_eq!(table.lookup("usd").symbol.as_deref(), Some("$"));
//! assert!(table.lookup("ZZZ").symbol.is_none());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Metadata document bundled with the crate.
const BUILTIN_METADATA: &str = include_str!("../data/currencies.json");

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised while loading a metadata document.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Failed to read metadata file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid metadata JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid currency code in metadata: {0:?}")]
    InvalidCode(String),

    #[error("Duplicate currency code in metadata: {0}")]
    DuplicateCode(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Currency Metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Display metadata for one currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyMeta {
    pub code: String,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub symbol: Option<String>,
    pub flag: Option<String>,
}

impl CurrencyMeta {
    /// Metadata for a code nothing is known about.
    pub fn empty(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            country_name: None,
            country_code: None,
            symbol: None,
            flag: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.country_name.is_none()
            && self.country_code.is_none()
            && self.symbol.is_none()
            && self.flag.is_none()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeta {
    country_name: Option<String>,
    country_code: Option<String>,
    country: Option<String>,
    symbol: Option<String>,
    flag: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RawMeta {
    fn into_meta(self, code: String) -> CurrencyMeta {
        let country = non_empty(self.country);
        CurrencyMeta {
            code,
            country_name: non_empty(self.country_name).or_else(|| country.clone()),
            country_code: non_empty(self.country_code).or(country),
            symbol: non_empty(self.symbol),
            flag: non_empty(self.flag),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metadata Table
// ─────────────────────────────────────────────────────────────────────────────

/// Read-only `code → CurrencyMeta` mapping.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    entries: HashMap<String, CurrencyMeta>,
}

impl MetadataTable {
    /// Loads the document bundled with this crate.
    pub fn builtin() -> Result<Self, MetadataError> {
        Self::from_json_str(BUILTIN_METADATA)
    }

    /// Loads a metadata document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), entries = table.len(), "Loaded currency metadata");
        Ok(table)
    }

    /// Parses and validates a metadata document.
    pub fn from_json_str(raw: &str) -> Result<Self, MetadataError> {
        let document: BTreeMap<String, RawMeta> = serde_json::from_str(raw)?;

        let mut entries = HashMap::with_capacity(document.len());
        for (key, raw_meta) in document {
            let code = key.trim().to_ascii_uppercase();
            if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
                return Err(MetadataError::InvalidCode(key));
            }
            if entries.contains_key(&code) {
                return Err(MetadataError::DuplicateCode(code));
            }
            entries.insert(code.clone(), raw_meta.into_meta(code));
        }

        Ok(Self { entries })
    }

    /// Returns the stored entry, if any. `code` is matched case-insensitively.
    pub fn get(&self, code: &str) -> Option<&CurrencyMeta> {
        self.entries.get(&code.trim().to_ascii_uppercase())
    }

    /// Returns the entry for `code`, or empty metadata when none is known.
    pub fn lookup(&self, code: &str) -> CurrencyMeta {
        self.get(code)
            .cloned()
            .unwrap_or_else(|| CurrencyMeta::empty(code.trim().to_ascii_uppercase()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
