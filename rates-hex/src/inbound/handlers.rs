//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use rates_types::{AppError, ConversionResponse, ConvertQuery, RateSource, is_currency_code};

use crate::RateService;

/// Cache policy of the currency listing; metadata changes rarely.
pub const LISTING_CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=86400";
/// Cache policy of conversion responses.
pub const CONVERSION_CACHE_CONTROL: &str = "public, max-age=60, s-maxage=3600";

/// Application state shared across handlers.
pub struct AppState<S: RateSource> {
    pub service: RateService<S>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

fn with_cache_control(policy: &'static str, body: impl IntoResponse) -> Response {
    (
        [(header::CACHE_CONTROL, HeaderValue::from_static(policy))],
        body,
    )
        .into_response()
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// List every supported currency with its metadata.
#[tracing::instrument(skip(state))]
pub async fn list_currencies<S: RateSource>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Response, ApiError> {
    let listing = state.service.list_currencies().await.map_err(|err| {
        tracing::error!(error = %err, "Currency listing failed");
        AppError::Internal("failed".into())
    })?;

    Ok(with_cache_control(LISTING_CACHE_CONTROL, Json(listing)))
}

/// Rates relative to the `base` path segment.
#[tracing::instrument(skip(state, query), fields(base = %base))]
pub async fn convert<S: RateSource>(
    State(state): State<Arc<AppState<S>>>,
    Path(base): Path<String>,
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let base = base.trim().to_ascii_uppercase();
    if !is_currency_code(&base) {
        return Err(AppError::BadRequest(format!("Invalid base currency code: {}", base)).into());
    }
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let wanted = query.wanted_codes();
    let table = state
        .service
        .rates_relative_to(&base, wanted.as_deref())
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "Conversion failed");
            AppError::from(err)
        })?;

    let body = ConversionResponse::from_table(table, query.include_fields());
    Ok(with_cache_control(CONVERSION_CACHE_CONTROL, Json(body)))
}
