//! # Exchange Rates Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Load currency metadata
//! - Initialize the provider adapter and snapshot cache
//! - Create the rate service
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use currency_meta::MetadataTable;
use rates_hex::{CacheConfig, RateService, SnapshotCache, TtlPolicy, inbound::HttpServer};
use rates_types::SystemClock;
use rates_upstream::build_source;

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("exchange-rates-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize OpenTelemetry tracing when a collector is configured
    let otel = config
        .otlp_endpoint
        .as_deref()
        .map(init_tracer)
        .transpose()?;
    let (telemetry, otel_provider) = match otel {
        Some((tracer, provider)) => (
            Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Some(provider),
        ),
        None => (None, None),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rates_app=debug,rates_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting exchange rates server on port {}", config.port);

    // Currency metadata: external file when configured, bundled table otherwise
    let metadata = match &config.metadata_path {
        Some(path) => MetadataTable::from_path(path)?,
        None => MetadataTable::builtin()?,
    };
    tracing::info!(currencies = metadata.len(), "Currency metadata loaded");

    // Build the provider adapter and the cache in front of it
    let source = build_source(&config.source_url, config.fetch_timeout)?;
    let cache_config = CacheConfig {
        ttl: TtlPolicy::default(),
        serve_stale_on_error: config.serve_stale,
    };
    let cache = SnapshotCache::with_config(source, Arc::new(SystemClock), cache_config);

    // Create the rate service
    let service = RateService::new(cache, Arc::new(metadata));

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
