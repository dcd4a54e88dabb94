//! Crate-level error types.
//!
//! [`OandaError`] unifies every failure the client can surface (configuration,
//! request construction, transport, body read, JSON decode) behind a single
//! enum so callers can match on the variant they care about while still using
//! the `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OandaError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum OandaError {
    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The method, URL, headers, or body could not form a valid HTTP request.
    #[error("request construction error: {0}")]
    RequestConstruction(String),

    /// The HTTP call could not be completed.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be fully drained.
    #[error("body read error: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// A response body was not valid JSON for the requested record.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Decimal text could not be converted to a [`rust_decimal::Decimal`].
    #[error("decimal error: {0}")]
    Decimal(#[from] rust_decimal::Error),
}
