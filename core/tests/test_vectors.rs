//! Drive the store with JSON test vectors stored in `test-vectors/`.
//!
//! Each case names the starting state, the fetch parameters, the URL the
//! client must build, a simulated response, and the status and state the
//! store must end up with. Keeping the cases in data lets other hosts of the
//! same API replay them.

use std::cell::RefCell;

use persons_core::{
    FetchParams, HttpRequest, HttpResponse, PaginationInfo, Person, PersonStore, PersonsClient,
    TransportError,
};
use serde_json::Value;

fn params_from(value: &Value) -> FetchParams {
    FetchParams {
        name: value["name"].as_str().map(str::to_string),
        page: value["page"].as_u64().map(|p| p as u32),
        status: value["status"].as_str().map(str::to_string),
    }
}

fn store_from(state: &Value) -> PersonStore {
    let mut store = PersonStore::new();
    let info: PaginationInfo = serde_json::from_value(state.clone()).unwrap();
    let persons: Vec<Person> = serde_json::from_value(state["persons"].clone()).unwrap();
    store.set_info(info);
    store.set_persons(persons);
    store
}

#[test]
fn fetch_persons_test_vectors() {
    let raw = include_str!("../../test-vectors/fetch_persons.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();
    let populated = &vectors["populated_state"];

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let status = sim["status"].as_u64().unwrap() as u16;
        let body = sim["body"].as_str().unwrap().to_string();

        let seen_url = RefCell::new(None);
        let transport = |req: &HttpRequest| -> Result<HttpResponse, TransportError> {
            *seen_url.borrow_mut() = Some(req.url.clone());
            Ok(HttpResponse::new(status, body.clone()))
        };
        let client = PersonsClient::new(base_url, transport).unwrap();

        let mut store = match case["initial"].as_str().unwrap() {
            "populated" => store_from(populated),
            _ => PersonStore::new(),
        };

        let result = store.fetch_persons(&client, &params_from(&case["params"]));

        assert_eq!(
            seen_url.borrow().as_deref(),
            case["expected_url"].as_str(),
            "{name}: request url"
        );
        assert_eq!(
            result.code(),
            Some(case["expected_status"].as_u64().unwrap() as u16),
            "{name}: status"
        );

        let expected_state = match &case["expected_state"] {
            Value::String(s) if s == "populated" => populated.clone(),
            state => state.clone(),
        };
        assert_eq!(
            serde_json::to_value(&store).unwrap(),
            expected_state,
            "{name}: store state"
        );
    }
}
