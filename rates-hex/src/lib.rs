//! # Rates Hex
//!
//! Application service layer and HTTP adapter for the exchange rates service.
//!
//! ## Architecture
//!
//! - `cache` - Single-flight snapshot cache with adaptive TTL (`ttl`)
//! - `views` - Pure joins of a snapshot against currency metadata
//! - `service` - Application service (orchestrates cache and views)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `S: RateSource`, allowing different
//! provider adapters to be injected.

pub mod cache;
pub mod inbound;
pub mod openapi;
pub mod service;
pub mod ttl;
pub mod views;

#[cfg(test)]
mod service_tests;

pub use cache::{CacheConfig, CacheEntry, SnapshotCache};
pub use service::RateService;
pub use ttl::TtlPolicy;
