//! In-memory stand-in for the EpicSevenDB hero endpoints.
//!
//! Serves the same envelopes as the real API: `{"results": [...], "meta":
//! {...}}` on success and `{"error", "stack", "meta"}` for unknown routes.
//! An id with no matching hero answers 200 with an empty `results` list.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;

pub const API_VERSION: &str = "2.1.0";
pub const REQUEST_DATE: &str = "Sat Aug 22 00:54:50 UTC 2020";
pub const INVALID_REQUEST: &str =
    "Invalid request. Please read the API docs. Open an issue on Github if this keeps happening.";

const FIXTURES: &str = include_str!("../fixtures/heroes.json");

#[derive(Clone, Debug, Serialize)]
pub struct Meta {
    #[serde(rename = "requestDate")]
    pub request_date: &'static str,
    #[serde(rename = "apiVersion")]
    pub api_version: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct Results {
    pub results: Vec<Value>,
    pub meta: Meta,
}

#[derive(Clone, Debug, Serialize)]
pub struct ApiError {
    pub error: &'static str,
    pub stack: &'static str,
    pub meta: Meta,
}

/// Heroes keyed by their `_id`. Built once per router and only read.
pub type Db = Arc<BTreeMap<String, Value>>;

/// The bundled fixture heroes.
pub fn fixtures() -> Vec<Value> {
    serde_json::from_str(FIXTURES).unwrap_or_default()
}

pub fn app() -> Router {
    app_with(fixtures())
}

/// A router serving exactly `heroes`. Entries without a string `_id` are
/// skipped.
pub fn app_with(heroes: Vec<Value>) -> Router {
    Router::new()
        .route("/hero", get(list_heroes))
        .route("/hero/{id}", get(get_hero))
        .fallback(invalid_request)
        .with_state(index(heroes))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    tracing::info!(addr = ?listener.local_addr().ok(), "mock EpicSevenDB API listening");
    axum::serve(listener, app()).await
}

fn index(heroes: Vec<Value>) -> Db {
    Arc::new(
        heroes
            .into_iter()
            .filter_map(|hero| Some((hero.get("_id")?.as_str()?.to_string(), hero)))
            .collect(),
    )
}

fn meta() -> Meta {
    Meta {
        request_date: REQUEST_DATE,
        api_version: API_VERSION,
    }
}

async fn list_heroes(State(db): State<Db>) -> Json<Results> {
    Json(Results {
        results: db.values().cloned().collect(),
        meta: meta(),
    })
}

async fn get_hero(State(db): State<Db>, Path(id): Path<String>) -> Json<Results> {
    tracing::debug!(%id, found = db.contains_key(&id), "hero lookup");
    Json(Results {
        results: db.get(&id).cloned().into_iter().collect(),
        meta: meta(),
    })
}

async fn invalid_request() -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            error: INVALID_REQUEST,
            stack: "",
            meta: meta(),
        }),
    )
}
