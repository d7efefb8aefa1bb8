//! Session-scoped state: the last fetched page of characters.
//!
//! # Design
//! `PersonStore` is owned by the application root and lent out by `&mut` to
//! whoever fetches. Pagination fields and the person list are always written
//! together from the same response. There is no loading or error state: the
//! store either holds results or sits at its defaults.

use serde::Serialize;
use tracing::debug;

use crate::client::PersonsClient;
use crate::transport::Transport;
use crate::types::{ApiResult, FetchParams, FetchStatus, PaginationInfo, Person};

/// The last fetched page of characters and its pagination metadata.
///
/// Starts as one empty page (`count` 0, `pages` 1, no links). Only its own
/// operations mutate it; `fetch_persons` is the one that talks to the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonStore {
    count: u64,
    pages: u64,
    next: Option<String>,
    prev: Option<String>,
    persons: Vec<Person>,
}

impl Default for PersonStore {
    fn default() -> Self {
        let info = PaginationInfo::default();
        Self {
            count: info.count,
            pages: info.pages,
            next: info.next,
            prev: info.prev,
            persons: Vec::new(),
        }
    }
}

impl PersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn pages(&self) -> u64 {
        self.pages
    }

    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn prev(&self) -> Option<&str> {
        self.prev.as_deref()
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Snapshot of the pagination fields.
    pub fn info(&self) -> PaginationInfo {
        PaginationInfo {
            count: self.count,
            pages: self.pages,
            next: self.next.clone(),
            prev: self.prev.clone(),
        }
    }

    /// Reset pagination to a single empty page and clear the person list.
    pub fn set_default_info(&mut self) {
        *self = Self::default();
    }

    pub fn set_info(&mut self, info: PaginationInfo) {
        self.count = info.count;
        self.pages = info.pages;
        self.next = info.next;
        self.prev = info.prev;
    }

    pub fn set_persons(&mut self, persons: Vec<Person>) {
        self.persons = persons;
    }

    /// Fetch one page through `client` and apply the outcome.
    ///
    /// Returns only the status. A 200 carrying data replaces the state, a 404
    /// resets it, and everything else leaves it untouched.
    pub fn fetch_persons<T: Transport>(
        &mut self,
        client: &PersonsClient<T>,
        params: &FetchParams,
    ) -> FetchStatus {
        let result = client.fetch(params);
        self.apply(result)
    }

    /// The state transition behind `fetch_persons`, for hosts that run the
    /// request themselves.
    pub fn apply(&mut self, result: ApiResult) -> FetchStatus {
        let reply = match result {
            ApiResult::Response(reply) => reply,
            ApiResult::TransportFailure(reason) => {
                debug!(%reason, "no response; store unchanged");
                return FetchStatus::TransportFailure;
            }
        };
        debug!(status = reply.status, "fetched persons");

        match (reply.status, reply.data) {
            (200, Some(data)) => {
                self.set_info(data.info);
                self.set_persons(data.results);
            }
            (404, _) => self.set_default_info(),
            _ => {}
        }
        FetchStatus::Http(reply.status)
    }
}
