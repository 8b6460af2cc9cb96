//! Adaptive cache lifetime.
//!
//! The provider announces when it will next refresh its table; the cache keeps
//! a snapshot until shortly after that instant instead of polling on a fixed
//! schedule.

use std::time::Duration;

use rates_types::RateSnapshot;

/// Lower bound on any computed TTL, in seconds.
pub const MIN_TTL_SECS: i64 = 60;
/// Slack added past the provider's announced refresh, in seconds.
pub const REFRESH_BUFFER_SECS: i64 = 5 * 60;
/// Assumed refresh horizon when the provider does not announce one.
pub const DEFAULT_HORIZON_SECS: i64 = 60 * 60;

/// Cache lifetime policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub min_ttl_secs: i64,
    pub buffer_secs: i64,
    pub default_horizon_secs: i64,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            min_ttl_secs: MIN_TTL_SECS,
            buffer_secs: REFRESH_BUFFER_SECS,
            default_horizon_secs: DEFAULT_HORIZON_SECS,
        }
    }
}

impl TtlPolicy {
    /// Computes how long `snapshot` may be served, given the current time.
    ///
    /// `max(min_ttl, next_update - now + buffer)`; a `next_update` that is not
    /// in the future yields exactly `min_ttl`.
    pub fn compute_ttl(&self, snapshot: &RateSnapshot, now_unix: i64) -> Duration {
        let next_update = snapshot
            .next_update_unix()
            .unwrap_or(now_unix.saturating_add(self.default_horizon_secs));

        let secs = if next_update <= now_unix {
            self.min_ttl_secs
        } else {
            (next_update - now_unix)
                .saturating_add(self.buffer_secs)
                .max(self.min_ttl_secs)
        };

        Duration::from_secs(secs.max(0) as u64)
    }
}
