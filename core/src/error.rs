//! Error types for the character API client.
//!
//! # Design
//! HTTP statuses are not errors here: a 404 or a 500 is a normal response
//! that the store interprets. Errors cover what happens before a request can
//! be built (a bad base URL), failures to get any response at all, and config
//! loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing a `PersonsClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The base URL parsed but cannot carry a query string (e.g. `mailto:`).
    #[error("base URL cannot be used for HTTP requests: {0}")]
    UnsupportedBaseUrl(String),
}

/// The request never produced an HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
