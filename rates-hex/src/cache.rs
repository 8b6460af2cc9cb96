//! Single-flight snapshot cache.
//!
//! Holds the one cache slot of the service. A lookup that finds no fresh
//! entry either starts the upstream fetch or joins the one already running,
//! so at most one upstream request is outstanding per process.
//!
//! The fetch itself runs on its own task: a caller that gives up waiting
//! does not cancel it, and its result still lands in the cache.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{Instrument, debug, info, warn};

use rates_types::{Clock, RateSnapshot, RateSource, RatesError};

use crate::ttl::TtlPolicy;

/// Name of the cache slot, as it appears in logs.
pub const CACHE_KEY: &str = "exchange_rates";

type FetchOutcome = Result<Arc<RateSnapshot>, RatesError>;
type Pending = watch::Receiver<Option<FetchOutcome>>;

// ─────────────────────────────────────────────────────────────────────────────
// Cache Entry
// ─────────────────────────────────────────────────────────────────────────────

/// A cached snapshot with its absolute expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    snapshot: Arc<RateSnapshot>,
    stored_at_unix: i64,
    expires_at_unix: i64,
}

impl CacheEntry {
    fn new(snapshot: Arc<RateSnapshot>, now_unix: i64, ttl: Duration) -> Self {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            snapshot,
            stored_at_unix: now_unix,
            expires_at_unix: now_unix.saturating_add(ttl_secs),
        }
    }

    pub fn snapshot(&self) -> &Arc<RateSnapshot> {
        &self.snapshot
    }

    pub fn stored_at_unix(&self) -> i64 {
        self.stored_at_unix
    }

    pub fn expires_at_unix(&self) -> i64 {
        self.expires_at_unix
    }

    pub fn is_fresh(&self, now_unix: i64) -> bool {
        now_unix < self.expires_at_unix
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Cache behaviour settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheConfig {
    pub ttl: TtlPolicy,
    /// Serve the previous snapshot when a refresh fails instead of the error.
    /// Off by default.
    pub serve_stale_on_error: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Slot State
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Slot {
    entry: Option<CacheEntry>,
    pending: Option<(u64, Pending)>,
    generation: u64,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Ownership of the running fetch.
///
/// Dropping it clears the in-flight marker before the sender goes away, so a
/// fetch that panics or is torn down never leaves the slot marked busy.
struct InFlight {
    slot: Arc<Mutex<Slot>>,
    tx: watch::Sender<Option<FetchOutcome>>,
    generation: u64,
}

impl InFlight {
    fn release(&self, slot: &mut Slot) {
        if slot
            .pending
            .as_ref()
            .is_some_and(|(generation, _)| *generation == self.generation)
        {
            slot.pending = None;
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut slot = lock(&self.slot);
        self.release(&mut slot);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot Cache
// ─────────────────────────────────────────────────────────────────────────────

/// Cache-aside coordinator for the latest rate snapshot.
pub struct SnapshotCache<S: RateSource> {
    source: Arc<S>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
    slot: Arc<Mutex<Slot>>,
}

impl<S: RateSource> SnapshotCache<S> {
    pub fn with_config(source: S, clock: Arc<dyn Clock>, config: CacheConfig) -> Self {
        Self {
            source: Arc::new(source),
            clock,
            config,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Returns a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current entry, fresh or not.
    pub fn entry(&self) -> Option<CacheEntry> {
        lock(&self.slot).entry.clone()
    }

    /// Whether an upstream fetch is currently outstanding.
    pub fn is_fetching(&self) -> bool {
        lock(&self.slot).pending.is_some()
    }

    /// Evicts the cached entry. An outstanding fetch is left running.
    pub fn clear(&self) {
        lock(&self.slot).entry = None;
    }

    /// Returns the current snapshot, fetching it if absent or expired.
    pub async fn get_snapshot(&self) -> Result<Arc<RateSnapshot>, RatesError> {
        let mut pending = {
            let mut slot = lock(&self.slot);
            let now = self.clock.now_unix();

            if let Some(entry) = slot.entry.as_ref().filter(|e| e.is_fresh(now)) {
                debug!(key = CACHE_KEY, expires_at = entry.expires_at_unix, "Cache hit");
                return Ok(Arc::clone(&entry.snapshot));
            }

            match slot.pending.as_ref() {
                Some((_, pending)) => {
                    debug!(key = CACHE_KEY, "Joining in-flight fetch");
                    pending.clone()
                }
                None => {
                    debug!(key = CACHE_KEY, "Cache miss");
                    self.spawn_fetch(&mut slot)
                }
            }
        };

        let published = match pending.wait_for(Option::is_some).await {
            Ok(value) => (*value).clone(),
            Err(_) => None,
        };
        let outcome = published
            .unwrap_or_else(|| Err(RatesError::UpstreamUnavailable("rate fetch aborted".into())));

        match outcome {
            Ok(snapshot) => Ok(snapshot),
            Err(err) if self.config.serve_stale_on_error => match self.entry() {
                Some(stale) => {
                    warn!(
                        key = CACHE_KEY,
                        error = %err,
                        stored_at = stale.stored_at_unix,
                        "Serving stale rates after failed refresh"
                    );
                    Ok(stale.snapshot)
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    /// Marks the slot busy and starts the upstream fetch on its own task.
    fn spawn_fetch(&self, slot: &mut Slot) -> Pending {
        let (tx, rx) = watch::channel(None);
        slot.generation = slot.generation.wrapping_add(1);
        slot.pending = Some((slot.generation, rx.clone()));

        let in_flight = InFlight {
            slot: Arc::clone(&self.slot),
            tx,
            generation: slot.generation,
        };
        let source = Arc::clone(&self.source);
        let clock = Arc::clone(&self.clock);
        let policy = self.config.ttl;

        let fetch = async move {
            let outcome = source.fetch().await.map(Arc::new);

            {
                let mut slot = lock(&in_flight.slot);
                match &outcome {
                    Ok(snapshot) => {
                        let now = clock.now_unix();
                        let ttl = policy.compute_ttl(snapshot, now);
                        slot.entry = Some(CacheEntry::new(Arc::clone(snapshot), now, ttl));
                        info!(
                            key = CACHE_KEY,
                            ttl_secs = ttl.as_secs(),
                            currencies = snapshot.rates().len(),
                            "Cached latest rates"
                        );
                    }
                    Err(err) => warn!(key = CACHE_KEY, error = %err, "Failed to fetch rates"),
                }
                in_flight.release(&mut slot);
            }

            // Entry is visible to new callers before waiters are woken.
            let _ = in_flight.tx.send(Some(outcome));
        };

        tokio::spawn(fetch.instrument(tracing::info_span!("rates_fetch", key = CACHE_KEY)));
        rx
    }
}
