//! Client core for the character-listing API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values as plain
//! data, and keeps the last fetched page of characters in a `PersonStore`.
//! The network round-trip sits behind the `Transport` trait; `UreqTransport`
//! is the default blocking implementation.
//!
//! # Design
//! - `PersonsClient` holds only the base URL and its transport.
//! - HTTP statuses are never errors: every response is normalized into an
//!   `ApiReply`, and a request that produced no response at all becomes
//!   `ApiResult::TransportFailure`.
//! - `PersonStore` is an explicit container owned by the caller, mutated only
//!   through its own operations.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use client::PersonsClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ConfigError, TransportError};
pub use http::{HttpRequest, HttpResponse};
pub use store::PersonStore;
pub use transport::{Transport, UreqTransport};
pub use types::{ApiReply, ApiResponse, ApiResult, FetchParams, FetchStatus, PaginationInfo, Person};
