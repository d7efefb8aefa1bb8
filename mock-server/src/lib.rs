//! Local stand-in for the character listing API.
//!
//! Serves `GET /api/character` with `page`, `name` and `status` filters and
//! the same body shapes as the public API: `{info, results}` on success and
//! `{"error": "..."}` with a 404 when nothing matches.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use url::Url;

pub const PAGE_SIZE: usize = 20;
pub const DEFAULT_LINK_BASE: &str = "http://localhost:3000/api/character";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub gender: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub count: usize,
    pub pages: usize,
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Listing {
    pub info: Info,
    pub results: Vec<Character>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub name: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone)]
struct AppState {
    characters: Arc<Vec<Character>>,
    page_size: usize,
    link_base: Arc<Url>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn not_found(message: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

/// The built-in cast, ids starting at 1.
pub fn characters() -> Vec<Character> {
    const CAST: &[(&str, &str, &str, &str)] = &[
        ("Rick Sanchez", "Alive", "Human", "Male"),
        ("Morty Smith", "Alive", "Human", "Male"),
        ("Summer Smith", "Alive", "Human", "Female"),
        ("Beth Smith", "Alive", "Human", "Female"),
        ("Jerry Smith", "Alive", "Human", "Male"),
        ("Abadango Cluster Princess", "Alive", "Alien", "Female"),
        ("Abradolf Lincler", "unknown", "Human", "Male"),
        ("Adjudicator Rick", "Dead", "Human", "Male"),
        ("Agency Director", "Dead", "Human", "Male"),
        ("Alan Rails", "Dead", "Human", "Male"),
        ("Albert Einstein", "Dead", "Human", "Male"),
        ("Alexander", "Dead", "Human", "Male"),
        ("Alien Googah", "unknown", "Alien", "unknown"),
        ("Alien Morty", "unknown", "Alien", "Male"),
        ("Alien Rick", "unknown", "Alien", "Male"),
        ("Amish Cyborg", "Dead", "Alien", "Male"),
        ("Annie", "Alive", "Human", "Female"),
        ("Antenna Morty", "Alive", "Human", "Male"),
        ("Antenna Rick", "unknown", "Human", "Male"),
        ("Ants in my Eyes Johnson", "unknown", "Human", "Male"),
        ("Aqua Morty", "unknown", "Humanoid", "Male"),
        ("Aqua Rick", "unknown", "Humanoid", "Male"),
        ("Arcade Alien", "unknown", "Alien", "Male"),
        ("Armagheadon", "Alive", "Alien", "Male"),
        ("Armothy", "Dead", "unknown", "Male"),
    ];
    CAST.iter()
        .zip(1..)
        .map(|(&(name, status, species, gender), id)| Character {
            id,
            name: name.to_string(),
            status: status.to_string(),
            species: species.to_string(),
            gender: gender.to_string(),
        })
        .collect()
}

pub fn app() -> Router {
    let link_base = Url::parse(DEFAULT_LINK_BASE).expect("default link base is a valid URL");
    app_with(characters(), PAGE_SIZE, link_base)
}

/// Router over a custom dataset. `link_base` is the absolute URL that
/// `next`/`prev` links are built from.
pub fn app_with(characters: Vec<Character>, page_size: usize, link_base: Url) -> Router {
    let state = AppState {
        characters: Arc::new(characters),
        page_size: page_size.max(1),
        link_base: Arc::new(link_base),
    };
    Router::new()
        .route("/api/character", get(list_characters))
        .route("/api/character/{id}", get(get_character))
        .with_state(state)
}

/// Serve the built-in cast, with pagination links pointing at the listener.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    let link_base = Url::parse(&format!("http://{addr}/api/character"))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    axum::serve(listener, app_with(characters(), PAGE_SIZE, link_base)).await
}

async fn list_characters(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Listing>, ApiError> {
    let name = query.name.as_deref().map(str::to_lowercase);
    let matches: Vec<&Character> = state
        .characters
        .iter()
        .filter(|c| {
            name.as_deref()
                .map_or(true, |n| c.name.to_lowercase().contains(n))
        })
        .filter(|c| {
            query
                .status
                .as_deref()
                .map_or(true, |s| c.status.eq_ignore_ascii_case(s))
        })
        .collect();

    let count = matches.len();
    let pages = count.div_ceil(state.page_size);
    let page = query.page.unwrap_or(1);
    if count == 0 || page == 0 || page > pages {
        tracing::debug!(page, count, "nothing to list");
        return Err(not_found("There is nothing here"));
    }

    let results = matches
        .into_iter()
        .skip((page - 1) * state.page_size)
        .take(state.page_size)
        .cloned()
        .collect();

    let link = |n: usize| page_link(&state.link_base, n, &query);
    Ok(Json(Listing {
        info: Info {
            count,
            pages,
            next: (page < pages).then(|| link(page + 1)),
            prev: (page > 1).then(|| link(page - 1)),
        },
        results,
    }))
}

async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Character>, ApiError> {
    state
        .characters
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Character not found"))
}

fn page_link(base: &Url, page: usize, query: &ListQuery) -> String {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("page", &page.to_string());
        if let Some(name) = &query.name {
            pairs.append_pair("name", name);
        }
        if let Some(status) = &query.status {
            pairs.append_pair("status", status);
        }
    }
    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(name: Option<&str>, status: Option<&str>) -> ListQuery {
        ListQuery {
            page: None,
            name: name.map(str::to_string),
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn cast_ids_are_sequential() {
        let cast = characters();
        assert_eq!(cast[0].id, 1);
        assert_eq!(cast[0].name, "Rick Sanchez");
        assert!(cast.iter().zip(1..).all(|(c, id)| c.id == id));
    }

    #[test]
    fn character_serializes_to_json() {
        let json = serde_json::to_value(&characters()[1]).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["name"], "Morty Smith");
        assert_eq!(json["status"], "Alive");
    }

    #[test]
    fn page_link_carries_filters() {
        let base = Url::parse(DEFAULT_LINK_BASE).unwrap();
        let link = page_link(&base, 2, &query(Some("rick"), Some("alive")));
        assert_eq!(
            link,
            "http://localhost:3000/api/character?page=2&name=rick&status=alive"
        );
    }

    #[test]
    fn page_link_without_filters() {
        let base = Url::parse(DEFAULT_LINK_BASE).unwrap();
        assert_eq!(
            page_link(&base, 3, &query(None, None)),
            "http://localhost:3000/api/character?page=3"
        );
    }

    #[test]
    fn list_query_fields_are_optional() {
        let q: ListQuery = serde_json::from_str("{}").unwrap();
        assert!(q.page.is_none() && q.name.is_none() && q.status.is_none());
    }
}
