//! In-process fake of the TMDb API for integration tests.

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    Json, Router,
};
use cine_roulette::Config;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// One request the fake received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub params: HashMap<String, String>,
}

/// Canned responses keyed by path (without the `/3` version prefix)
#[derive(Clone, Default)]
pub struct FakeTmdb {
    responses: Arc<Mutex<HashMap<String, (StatusCode, Value)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeTmdb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, body: Value) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), (StatusCode::OK, body));
        self
    }

    pub fn fail(&self, path: &str, status: StatusCode) -> &Self {
        self.responses.lock().unwrap().insert(
            path.to_string(),
            (status, json!({"status_code": 7, "status_message": "Invalid API key"})),
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Starts the fake on a random local port and returns its base URL
    pub async fn spawn(&self) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/3", addr)
    }
}

async fn handle(
    State(fake): State<FakeTmdb>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let path = uri
        .path()
        .strip_prefix("/3")
        .unwrap_or(uri.path())
        .to_string();

    fake.requests.lock().unwrap().push(RecordedRequest {
        path: path.clone(),
        params,
    });

    // Page-specific responses are registered as `path?page=N`
    let page_key = uri
        .query()
        .and_then(|q| q.split('&').find(|kv| kv.starts_with("page=")))
        .map(|page| format!("{}?{}", path, page));

    let responses = fake.responses.lock().unwrap();
    let hit = page_key
        .and_then(|key| responses.get(&key).cloned())
        .or_else(|| responses.get(&path).cloned());

    match hit {
        Some((status, body)) => (status, Json(body)),
        None => (StatusCode::NOT_FOUND, Json(json!({"status_code": 34}))),
    }
}

pub fn movie_json(id: u64, overview: &str, poster: Option<&str>) -> Value {
    json!({
        "id": id,
        "title": format!("Movie {}", id),
        "overview": overview,
        "poster_path": poster,
        "release_date": "2001-01-01",
        "vote_average": 7.5
    })
}

pub fn page(movies: Vec<Value>) -> Value {
    json!({"page": 1, "results": movies, "total_pages": 1, "total_results": 0})
}

pub fn providers(region: &str, names: &[&str]) -> Value {
    let flatrate: Vec<Value> = names
        .iter()
        .map(|name| json!({"logo_path": format!("/{}.jpg", name.to_lowercase()), "provider_name": name}))
        .collect();
    json!({"id": 1, "results": {region: {"flatrate": flatrate}}})
}

pub fn test_config(api_url: &str) -> Config {
    Config {
        tmdb_api_key: "test_key".to_string(),
        tmdb_api_url: api_url.to_string(),
        tmdb_language: "pt-BR".to_string(),
        tmdb_region: "BR".to_string(),
        tmdb_image_url: "https://image.tmdb.org/t/p/w500".to_string(),
        tmdb_logo_url: "https://image.tmdb.org/t/p/w92".to_string(),
    }
}
