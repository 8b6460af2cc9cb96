//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use rates_types::dto::{
    ConversionData, ConversionItem, ConversionResponse, ConvertQuery, CurrencyListing,
    CurrencyListingItem,
};
use utoipa::OpenApi;

// Path stubs; the real handlers are generic over the rate source.

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List supported currencies with metadata
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "Every currency the provider quotes", body = CurrencyListing),
        (status = 500, description = "Rates could not be loaded", body = inline(serde_json::Value), example = json!({"error": "failed"}))
    )
)]
async fn list_currencies() {}

/// Rates relative to a base currency
#[utoipa::path(
    get,
    path = "/api/currency/{base}",
    tag = "currencies",
    params(
        ("base" = String, Path, description = "Three-letter base currency code (case-insensitive)", example = "EUR"),
        ConvertQuery
    ),
    responses(
        (status = 200, description = "Rates relative to the base", body = ConversionResponse),
        (status = 400, description = "Invalid or unsupported base", body = inline(serde_json::Value), example = json!({"error": "Base currency ZZZ not supported"})),
        (status = 502, description = "Rate provider unavailable", body = inline(serde_json::Value), example = json!({"error": "upstream rates unavailable"}))
    )
)]
async fn convert() {}

/// OpenAPI documentation for the Exchange Rates API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exchange Rates API",
        version = "1.0.0",
        description = "Latest exchange rates re-based onto any supported currency, joined with display metadata.\n\nRates come from a single upstream provider and are cached until shortly after the provider's announced refresh.",
        license(name = "MIT"),
    ),
    paths(health, list_currencies, convert),
    components(
        schemas(
            CurrencyListing,
            CurrencyListingItem,
            ConversionResponse,
            ConversionData,
            ConversionItem,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currencies", description = "Currency listing and rate conversion"),
    )
)]
pub struct ApiDoc;
