//! Exchange Rates Application Service
//!
//! Orchestrates the snapshot cache and the metadata join.
//! Contains NO infrastructure logic - pure business orchestration.

use std::sync::Arc;

use currency_meta::MetadataTable;
use rates_types::{CurrencyListing, RateSource, RateTable, RatesError};

use crate::cache::SnapshotCache;
use crate::views;

/// Application service for rate lookups.
///
/// Generic over `S: RateSource` - the provider adapter is injected at compile
/// time, so tests can drive it with an in-memory stub.
pub struct RateService<S: RateSource> {
    cache: SnapshotCache<S>,
    metadata: Arc<MetadataTable>,
}

impl<S: RateSource> RateService<S> {
    /// Creates a new rate service over the given cache and metadata.
    pub fn new(cache: SnapshotCache<S>, metadata: Arc<MetadataTable>) -> Self {
        Self { cache, metadata }
    }

    /// Returns a reference to the underlying cache.
    pub fn cache(&self) -> &SnapshotCache<S> {
        &self.cache
    }

    /// Lists every currency the provider quotes, with metadata.
    pub async fn list_currencies(&self) -> Result<CurrencyListing, RatesError> {
        let snapshot = self.cache.get_snapshot().await?;
        Ok(views::list_currencies(&snapshot, &self.metadata))
    }

    /// Rates of the current snapshot relative to `base`.
    pub async fn rates_relative_to(
        &self,
        base: &str,
        wanted: Option<&[String]>,
    ) -> Result<RateTable, RatesError> {
        let snapshot = self.cache.get_snapshot().await?;
        views::convert(&snapshot, &self.metadata, base, wanted)
    }
}
