// Shared test helpers: in-process mock of the Censys aggregate endpoint

#![allow(dead_code)]

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use std::path::Path;
use std::sync::{Arc, Mutex};
use threat_ops::config::AppConfig;
use threat_ops::models::Query;

pub const API_ID: &str = "test-id";
pub const API_SECRET: &str = "test-secret";
/// `Basic base64("test-id:test-secret")`
pub const EXPECTED_AUTH: &str = "Basic dGVzdC1pZDp0ZXN0LXNlY3JldA==";
pub const AGGREGATE_PATH: &str = "/api/v2/hosts/aggregate";

/// Canned answers keyed the same way the collector asks.
#[derive(Clone, Default)]
pub struct MockCensys {
    pub any_total: u64,
    pub continents: Vec<(&'static str, u64)>,
    pub services: Vec<(&'static str, u64)>,
    pub rdp: u64,
    pub smb: u64,
    pub telnet: u64,
    /// Grouping fields answered with HTTP 500.
    pub failing_fields: Vec<&'static str>,
}

impl MockCensys {
    pub fn populated() -> Self {
        Self {
            any_total: 245_000_000,
            continents: vec![
                ("Asia", 90_000_000),
                ("North America", 80_000_000),
                ("Europe", 60_000_000),
                ("South America", 10_000_000),
            ],
            services: vec![
                ("HTTP", 200_000_000),
                ("SSH", 25_000_000),
                ("FTP", 6_000_000),
                ("SMTP", 5_500_000),
                ("TELNET", 3_200_000),
            ],
            rdp: 4_100_000,
            smb: 1_250_000,
            telnet: 3_200_000,
            failing_fields: vec![],
        }
    }
}

#[derive(Clone)]
struct MockState {
    mock: Arc<MockCensys>,
    requests: Arc<Mutex<Vec<Query>>>,
}

pub struct MockServer {
    pub url: String,
    pub requests: Arc<Mutex<Vec<Query>>>,
}

impl MockServer {
    pub fn recorded(&self) -> Vec<Query> {
        self.requests.lock().unwrap().clone()
    }
}

fn bucket_json(buckets: &[(&str, u64)], limit: u32) -> serde_json::Value {
    buckets
        .iter()
        .take(limit as usize)
        .map(|(key, count)| serde_json::json!({ "key": key, "count": count }))
        .collect()
}

async fn aggregate_handler(
    State(state): State<MockState>,
    headers: HeaderMap,
    axum::Json(query): axum::Json<Query>,
) -> Response {
    state.requests.lock().unwrap().push(query.clone());

    let auth = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if auth != Some(EXPECTED_AUTH) {
        return (StatusCode::UNAUTHORIZED, "bad credentials").into_response();
    }
    let mock = &state.mock;
    if mock.failing_fields.iter().any(|f| *f == query.field) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "aggregation failed").into_response();
    }

    let (total, buckets) = match query.field.as_str() {
        "location.continent" => (
            mock.any_total,
            bucket_json(&mock.continents, query.num_buckets),
        ),
        "services.service_name" => (
            mock.any_total,
            bucket_json(&mock.services, query.num_buckets),
        ),
        _ => {
            let total = match query.query.as_str() {
                "services.service_name: *" => mock.any_total,
                "services.service_name: RDP" => mock.rdp,
                "services.service_name: SMB" => mock.smb,
                "services.service_name: TELNET" => mock.telnet,
                _ => 0,
            };
            (total, serde_json::json!([{ "key": "US", "count": total }]))
        }
    };

    axum::Json(serde_json::json!({
        "code": 200,
        "status": "OK",
        "result": {
            "query": query.query,
            "field": query.field,
            "total": total,
            "total_omitted": 0,
            "potential_deviation": 0,
            "buckets": buckets,
        }
    }))
    .into_response()
}

/// Serves `app` on an ephemeral local port; returns the aggregate URL.
pub async fn spawn_router(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}{}", addr, AGGREGATE_PATH)
}

pub async fn spawn_mock(mock: MockCensys) -> MockServer {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        mock: Arc::new(mock),
        requests: requests.clone(),
    };
    let app = Router::new()
        .route(AGGREGATE_PATH, post(aggregate_handler))
        .with_state(state);
    let url = spawn_router(app).await;
    MockServer { url, requests }
}

/// Config pointing at `url` with test credentials and a short timeout.
pub fn test_config(url: &str, output: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.censys.api_id = API_ID.into();
    config.censys.api_secret = API_SECRET.into();
    config.censys.aggregate_url = url.into();
    config.censys.timeout_secs = 5;
    config.output.path = output.to_string_lossy().into_owned();
    config
}
