//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use rates_upstream::DEFAULT_TIMEOUT;

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub source_url: String,
    pub fetch_timeout: Duration,
    pub metadata_path: Option<PathBuf>,
    pub serve_stale: bool,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = var("PORT").unwrap_or_else(|| "3000".to_string()).parse()?;

        let source_url = var("RATES_SOURCE_URL")
            .ok_or_else(|| anyhow::anyhow!("RATES_SOURCE_URL environment variable is required"))?;

        let fetch_timeout = match var("RATES_FETCH_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse()?),
            None => DEFAULT_TIMEOUT,
        };

        let serve_stale = match var("RATES_SERVE_STALE") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| anyhow::anyhow!("RATES_SERVE_STALE must be true or false"))?,
            None => false,
        };

        Ok(Self {
            port,
            source_url,
            fetch_timeout,
            metadata_path: var("CURRENCY_METADATA_PATH").map(PathBuf::from),
            serve_stale,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("RATES_SOURCE_URL", "https://rates.example/latest/USD")]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert!(config.metadata_path.is_none());
        assert!(!config.serve_stale);
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_source_url_required() {
        let err = load(&[("PORT", "8080")]).unwrap_err();
        assert!(err.to_string().contains("RATES_SOURCE_URL"));

        assert!(load(&[("RATES_SOURCE_URL", "  ")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("RATES_SOURCE_URL", "https://rates.example/latest/USD"),
            ("PORT", "8080"),
            ("RATES_FETCH_TIMEOUT_SECS", "3"),
            ("CURRENCY_METADATA_PATH", "/etc/rates/currencies.json"),
            ("RATES_SERVE_STALE", "TRUE"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(
            config.metadata_path,
            Some(PathBuf::from("/etc/rates/currencies.json"))
        );
        assert!(config.serve_stale);
        assert_eq!(
            config.otlp_endpoint.as_deref(),
            Some("http://localhost:4317")
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let url = ("RATES_SOURCE_URL", "https://rates.example/latest/USD");
        assert!(load(&[url, ("PORT", "http")]).is_err());
        assert!(load(&[url, ("RATES_FETCH_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load(&[url, ("RATES_SERVE_STALE", "maybe")]).is_err());
    }
}
