//! Error types for the exchange rates service.

/// Domain-level errors (invalid rate tables).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: {0:?}")]
    InvalidCode(String),

    #[error("Duplicate currency code: {0}")]
    DuplicateCode(String),

    #[error("Invalid rate for {code}: {value}")]
    InvalidRate { code: String, value: f64 },

    #[error("Rate table is empty")]
    EmptyRates,
}

/// Errors produced while obtaining or shaping rates.
///
/// `Clone` because a single fetch outcome is handed to every caller that
/// joined the in-flight request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Malformed upstream response: {0}")]
    UpstreamMalformed(String),

    #[error("Base currency {0} not supported")]
    UnsupportedBase(String),
}

impl From<DomainError> for RatesError {
    fn from(err: DomainError) -> Self {
        RatesError::UpstreamMalformed(err.to_string())
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RatesError> for AppError {
    fn from(err: RatesError) -> Self {
        match err {
            RatesError::UnsupportedBase(_) => AppError::BadRequest(err.to_string()),
            RatesError::UpstreamUnavailable(_) | RatesError::UpstreamMalformed(_) => {
                AppError::BadGateway("upstream rates unavailable".into())
            }
            RatesError::Config(_) => AppError::Internal("failed".into()),
        }
    }
}
