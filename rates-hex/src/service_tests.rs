//! RateService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use currency_meta::MetadataTable;
    use rates_types::{ManualClock, RateSnapshot, RateSource, RatesError};

    use crate::RateService;
    use crate::cache::{CacheConfig, SnapshotCache};

    /// Builds a USD-based snapshot fetched at t=1000.
    pub fn sample_snapshot(next_update: Option<i64>) -> RateSnapshot {
        let rates = [("USD", 1.0), ("EUR", 0.9), ("JPY", 150.0), ("XAU", 0.0005)]
            .into_iter()
            .map(|(code, value)| (code.to_string(), value));
        RateSnapshot::new("USD", rates, 1_000, Some(900), next_update).unwrap()
    }

    /// Scriptable in-memory rate source.
    ///
    /// Returns queued outcomes in order, then clones of the base snapshot.
    pub struct StubSource {
        snapshot: RateSnapshot,
        script: Mutex<VecDeque<Result<RateSnapshot, RatesError>>>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl StubSource {
        pub fn new(snapshot: RateSnapshot) -> Self {
            Self {
                snapshot,
                script: Mutex::new(VecDeque::new()),
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn then(self, outcome: Result<RateSnapshot, RatesError>) -> Self {
            self.script.lock().unwrap().push_back(outcome);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateSource for StubSource {
        async fn fetch(&self) -> Result<RateSnapshot, RatesError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let scripted = self.script.lock().unwrap().pop_front();
            scripted.unwrap_or_else(|| Ok(self.snapshot.clone()))
        }
    }

    fn service(source: StubSource) -> RateService<StubSource> {
        let clock = Arc::new(ManualClock::new(1_000));
        let cache = SnapshotCache::with_config(source, clock, CacheConfig::default());
        let metadata = MetadataTable::builtin().unwrap();
        RateService::new(cache, Arc::new(metadata))
    }

    #[tokio::test]
    async fn test_list_currencies_success() {
        let service = service(StubSource::new(sample_snapshot(Some(5_000))));

        let listing = service.list_currencies().await.unwrap();

        assert_eq!(listing.time_last_update_unix, Some(900));
        assert_eq!(listing.time_next_update_unix, Some(5_000));
        let codes: Vec<_> = listing.data.iter().map(|i| i.currency.as_str()).collect();
        assert_eq!(codes, vec!["EUR", "JPY", "USD", "XAU"]);

        let usd = &listing.data[2];
        assert_eq!(usd.symbol.as_deref(), Some("$"));
    }

    #[tokio::test]
    async fn test_rates_relative_to_base() {
        let service = service(StubSource::new(sample_snapshot(Some(5_000))));

        let table = service.rates_relative_to("eur", None).await.unwrap();

        assert_eq!(table.base, "EUR");
        let usd = table.data.iter().find(|i| i.currency == "USD").unwrap();
        assert_eq!(usd.value, 1.111);
        let xau = table.data.iter().find(|i| i.currency == "XAU").unwrap();
        assert_eq!(xau.value, 0.001);
    }

    #[tokio::test]
    async fn test_rates_with_allow_list() {
        let service = service(StubSource::new(sample_snapshot(Some(5_000))));
        let wanted = vec!["JPY".to_string(), "ZZZ".to_string()];

        let table = service
            .rates_relative_to("USD", Some(&wanted))
            .await
            .unwrap();

        assert_eq!(table.data.len(), 1);
        assert_eq!(table.data[0].currency, "JPY");
        assert_eq!(table.data[0].value, 150.0);
    }

    #[tokio::test]
    async fn test_unsupported_base_fails() {
        let service = service(StubSource::new(sample_snapshot(Some(5_000))));

        let result = service.rates_relative_to("ZZZ", None).await;

        assert_eq!(result, Err(RatesError::UnsupportedBase("ZZZ".into())));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let source = StubSource::new(sample_snapshot(Some(5_000)))
            .then(Err(RatesError::UpstreamUnavailable("down".into())));
        let service = service(source);

        let result = service.list_currencies().await;

        assert!(matches!(result, Err(RatesError::UpstreamUnavailable(_))));
    }

    #[tokio::test]
    async fn test_views_share_one_snapshot() {
        let service = service(StubSource::new(sample_snapshot(Some(5_000))));

        service.list_currencies().await.unwrap();
        service.rates_relative_to("USD", None).await.unwrap();
        service.rates_relative_to("JPY", None).await.unwrap();

        assert_eq!(service.cache().source().calls(), 1);
    }
}
