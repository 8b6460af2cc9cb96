//! # Rates Types
//!
//! Domain types and port traits for the exchange rates service.
//! Only data structures, validation rules, and trait definitions live here;
//! the single IO-capable dependency is `currency-meta`, whose `CurrencyMeta`
//! feeds the listing and conversion DTOs. Nothing in this crate reads files
//! or talks to the network.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (RateSnapshot, Clock)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Clock, ManualClock, RateSnapshot, SystemClock, is_currency_code, normalize_code};
pub use dto::*;
pub use error::{AppError, RatesError};
pub use ports::RateSource;
