//! Rate source port.
//!
//! This trait defines the interface for the upstream rate provider.
//! Implementations can be HTTP clients, fixtures, etc.

use crate::domain::RateSnapshot;
use crate::error::RatesError;

/// Port trait for the single upstream exchange rate provider.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Performs one upstream call and returns a freshly built snapshot.
    ///
    /// Fails with `Config` when no provider is configured,
    /// `UpstreamUnavailable` on transport failure or timeout, and
    /// `UpstreamMalformed` when the payload cannot be understood.
    async fn fetch(&self) -> Result<RateSnapshot, RatesError>;
}
