//! Request builder, response parser and sender for the character API.
//!
//! # Design
//! `PersonsClient` holds the base URL and a `Transport`. `build_fetch_persons`
//! and `parse_fetch_persons` are pure, so hosts that do their own I/O can use
//! them directly; `fetch` glues the two around `Transport::send`.

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{ApiReply, ApiResponse, ApiResult, FetchParams};

/// Body the API sends alongside 404 and other error statuses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the character listing endpoint.
///
/// Bound to one base URL. HTTP error statuses come back as `ApiReply` values,
/// and a request with no response at all becomes
/// `ApiResult::TransportFailure`; `fetch` never returns an `Err`.
#[derive(Debug, Clone)]
pub struct PersonsClient<T = UreqTransport> {
    base_url: Url,
    user_agent: Option<String>,
    transport: T,
}

impl PersonsClient<UreqTransport> {
    /// Client with the default ureq transport, bound to `config.base_url`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Self::new(&config.base_url, UreqTransport::new())?;
        Ok(match &config.user_agent {
            Some(agent) => client.with_user_agent(agent),
            None => client,
        })
    }
}

impl<T: Transport> PersonsClient<T> {
    pub fn new(base_url: &str, transport: T) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::UnsupportedBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            user_agent: None,
            transport,
        })
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn build_fetch_persons(&self, params: &FetchParams) -> HttpRequest {
        let mut url = self.base_url.clone();
        let page = params.page.map(|p| p.to_string());
        let pairs = [
            ("page", page.as_deref()),
            ("name", params.name.as_deref()),
            ("status", params.status.as_deref()),
        ];
        // query_pairs_mut leaves a bare `?` behind if nothing is appended.
        if pairs.iter().any(|(_, v)| v.is_some()) {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                if let Some(value) = value {
                    query.append_pair(key, value);
                }
            }
        }

        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if let Some(agent) = &self.user_agent {
            headers.push(("user-agent".to_string(), agent.clone()));
        }

        HttpRequest {
            url: url.into(),
            headers,
        }
    }

    /// Normalize any response into an `ApiReply`. Never fails.
    pub fn parse_fetch_persons(&self, response: HttpResponse) -> ApiReply {
        if response.status == 200 {
            let data = match serde_json::from_str::<ApiResponse>(&response.body) {
                Ok(data) => Some(data),
                Err(e) => {
                    warn!(error = %e, "listing response with status 200 has an undecodable body");
                    None
                }
            };
            return ApiReply {
                status: response.status,
                data,
                error: None,
            };
        }

        let error = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .map(|body| body.error);
        ApiReply {
            status: response.status,
            data: None,
            error,
        }
    }

    pub fn fetch(&self, params: &FetchParams) -> ApiResult {
        let request = self.build_fetch_persons(params);
        match self.transport.send(&request) {
            Ok(response) => ApiResult::Response(self.parse_fetch_persons(response)),
            Err(e) => {
                warn!(url = %request.url, error = %e, "character listing request failed");
                ApiResult::TransportFailure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    type Stub = fn(&HttpRequest) -> Result<HttpResponse, TransportError>;

    fn server_error_stub(_: &HttpRequest) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(500, ""))
    }

    fn client() -> PersonsClient<Stub> {
        PersonsClient::new("http://localhost:3000/api/character", server_error_stub as Stub).unwrap()
    }

    #[test]
    fn build_without_params_has_no_query() {
        let req = client().build_fetch_persons(&FetchParams::new());
        assert_eq!(req.url, "http://localhost:3000/api/character");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_orders_query_as_page_name_status() {
        let params = FetchParams::new().status("alive").name("rick").page(2);
        let req = client().build_fetch_persons(&params);
        assert_eq!(
            req.url,
            "http://localhost:3000/api/character?page=2&name=rick&status=alive"
        );
    }

    #[test]
    fn build_omits_absent_params_and_encodes_values() {
        let params = FetchParams::new().name("Rick Sanchez");
        let req = client().build_fetch_persons(&params);
        assert_eq!(req.url, "http://localhost:3000/api/character?name=Rick+Sanchez");
    }

    #[test]
    fn build_adds_user_agent_when_configured() {
        let req = client()
            .with_user_agent("persons/0.1")
            .build_fetch_persons(&FetchParams::new());
        assert!(req
            .headers
            .contains(&("user-agent".to_string(), "persons/0.1".to_string())));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client =
            PersonsClient::new("http://localhost:3000/api/character/", server_error_stub as Stub).unwrap();
        let req = client.build_fetch_persons(&FetchParams::new().page(1));
        assert_eq!(req.url, "http://localhost:3000/api/character?page=1");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = PersonsClient::new("not a url", server_error_stub as Stub).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));

        let err = PersonsClient::new("mailto:rick@citadel", server_error_stub as Stub).unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedBaseUrl(_)));
    }

    #[test]
    fn parse_success_decodes_body() {
        let body = r#"{"info":{"count":1,"pages":1,"next":null,"prev":null},"results":[{"id":1,"name":"Rick"}]}"#;
        let reply = client().parse_fetch_persons(HttpResponse::new(200, body));
        assert_eq!(reply.status, 200);
        let data = reply.data.unwrap();
        assert_eq!(data.info.count, 1);
        assert_eq!(data.results[0].name(), Some("Rick"));
        assert!(reply.error.is_none());
    }

    #[test]
    fn parse_success_with_bad_body_has_no_data() {
        let reply = client().parse_fetch_persons(HttpResponse::new(200, "not json"));
        assert_eq!(reply.status, 200);
        assert!(reply.data.is_none());
    }

    #[test]
    fn parse_not_found_captures_error_message() {
        let body = r#"{"error":"There is nothing here"}"#;
        let reply = client().parse_fetch_persons(HttpResponse::new(404, body));
        assert_eq!(reply.status, 404);
        assert!(reply.data.is_none());
        assert_eq!(reply.error.as_deref(), Some("There is nothing here"));
    }

    #[test]
    fn parse_server_error_with_plain_body() {
        let reply = client().parse_fetch_persons(HttpResponse::new(500, "internal error"));
        assert_eq!(reply.status, 500);
        assert!(reply.data.is_none());
        assert!(reply.error.is_none());
    }

    #[test]
    fn fetch_returns_http_errors_as_responses() {
        let result = client().fetch(&FetchParams::new());
        assert_eq!(result.status(), Some(500));
    }

    #[test]
    fn fetch_maps_transport_errors_to_failure() {
        let failing: Stub = |_| Err(TransportError::Request("connection refused".into()));
        let client = PersonsClient::new("http://localhost:3000/api/character", failing).unwrap();
        let result = client.fetch(&FetchParams::new());
        assert_eq!(
            result,
            ApiResult::TransportFailure("request failed: connection refused".to_string())
        );
    }
}
