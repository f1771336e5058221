//! Mock PostgREST server shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::extract::{Path as UrlPath, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: HashMap<String, String>,
    pub apikey: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub struct MockState {
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    pub rows: Arc<Vec<Value>>,
    /// Answer every read with this status and message
    pub read_error: Option<(u16, String)>,
}

impl MockState {
    pub fn with_rows(rows: Vec<Value>) -> Self {
        Self {
            rows: Arc::new(rows),
            ..Self::default()
        }
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn rpc(
    State(state): State<MockState>,
    UrlPath(function): UrlPath<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: "POST",
        path: format!("/rest/v1/rpc/{}", function),
        query: HashMap::new(),
        apikey: header(&headers, "apikey"),
        authorization: header(&headers, "authorization"),
        body: Some(body.clone()),
    });

    let sql = body["query"].as_str().unwrap_or_default();
    if function != "query" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": "PGRST202", "message": format!("Could not find the function public.{}", function) })),
        )
            .into_response();
    }
    if sql.contains("FAIL") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "code": "42601", "message": "syntax error at or near \"FAIL\"" })),
        )
            .into_response();
    }
    if sql.contains("PLAIN") {
        return (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn courses(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: "GET",
        path: "/rest/v1/courses".to_string(),
        query,
        apikey: header(&headers, "apikey"),
        authorization: header(&headers, "authorization"),
        body: None,
    });

    if let Some((status, message)) = &state.read_error {
        let status = StatusCode::from_u16(*status).unwrap();
        return (status, Json(json!({ "message": message }))).into_response();
    }
    Json(Value::Array(state.rows.as_ref().clone())).into_response()
}

/// Start the mock on an ephemeral port and return its base URL
pub async fn spawn_mock(state: MockState) -> String {
    let app = Router::new()
        .route("/rest/v1/rpc/{function}", post(rpc))
        .route("/rest/v1/courses", get(courses))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Lay out the four SQL files under `dir`; `None` leaves a file out
pub fn write_sql_files(dir: &Path, migrations: [Option<&str>; 3], verify: Option<&str>) {
    let paths = [
        "migrations/add_reddit_fields_to_courses.sql",
        "migrations/update_product_management_reddit.sql",
        "migrations/update_cybersecurity_reddit.sql",
    ];
    fs::create_dir_all(dir.join("migrations")).unwrap();
    for (path, content) in paths.iter().zip(migrations) {
        if let Some(sql) = content {
            fs::write(dir.join(path), sql).unwrap();
        }
    }
    if let Some(sql) = verify {
        fs::write(dir.join("verify_reddit_configuration.sql"), sql).unwrap();
    }
}

pub fn sample_rows() -> Vec<Value> {
    vec![
        json!({
            "name": "product-manager",
            "title": "Product Manager",
            "reddit_channel": "r/productmanagement",
            "reddit_url": "https://www.reddit.com/r/productmanagement"
        }),
        json!({
            "name": "cyber-security-analyst",
            "title": "Cybersecurity",
            "reddit_channel": null,
            "reddit_url": null
        }),
    ]
}
