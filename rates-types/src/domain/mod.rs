//! Domain models for the exchange rates service.

pub mod clock;
pub mod snapshot;

pub use clock::{Clock, ManualClock, SystemClock};
pub use snapshot::{RateSnapshot, is_currency_code, normalize_code};
