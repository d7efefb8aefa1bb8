//! Domain types for the character API.
//!
//! # Design
//! `PaginationInfo` is typed because the store flattens it into its own
//! fields. `Person` is kept as the raw JSON object the API sent, so any
//! record shape passes through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pagination metadata for one page of results, produced by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationInfo {
    pub count: u64,
    pub pages: u64,
    pub next: Option<String>,
    pub prev: Option<String>,
}

impl Default for PaginationInfo {
    fn default() -> Self {
        Self {
            count: 0,
            pages: 1,
            next: None,
            prev: None,
        }
    }
}

/// A character record, stored exactly as the API sent it.
///
/// Nothing is required of the object: accessors return `None` when a field
/// is missing or has an unexpected type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Person(Map<String, Value>);

impl Person {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::from(id));
        fields.insert("name".to_string(), Value::String(name.into()));
        Self(fields)
    }

    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(Value::as_u64)
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// The `status` field as sent by the API (`Alive`, `Dead`, `unknown`).
    pub fn status(&self) -> Option<&str> {
        self.get_str("status")
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Person {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Body of a successful listing response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse {
    pub info: PaginationInfo,
    pub results: Vec<Person>,
}

/// Query parameters for a listing request. Absent fields are left out of the
/// query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchParams {
    pub name: Option<String>,
    pub page: Option<u32>,
    pub status: Option<String>,
}

impl FetchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A response normalized into one shape regardless of status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    /// Decoded body; only ever present for status 200.
    pub data: Option<ApiResponse>,
    /// The API's `{"error": "..."}` message for non-200 responses.
    pub error: Option<String>,
}

/// Outcome of one request through `PersonsClient::fetch`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    Response(ApiReply),
    /// No HTTP response was received.
    TransportFailure(String),
}

impl ApiResult {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiResult::Response(reply) => Some(reply.status),
            ApiResult::TransportFailure(_) => None,
        }
    }
}

/// What `PersonStore::fetch_persons` hands back to its caller: the status
/// only, never the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Http(u16),
    TransportFailure,
}

impl FetchStatus {
    pub fn code(&self) -> Option<u16> {
        match self {
            FetchStatus::Http(code) => Some(*code),
            FetchStatus::TransportFailure => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchStatus::Http(200))
    }
}
