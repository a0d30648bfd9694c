// Aggregate client tests against an in-process mock endpoint

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::StatusCode;
use axum::routing::post;
use common::{AGGREGATE_PATH, API_ID, API_SECRET, MockCensys, spawn_mock, spawn_router};
use threat_ops::censys_repo::{AggregateError, AggregateOutcome, CensysRepo};
use threat_ops::config::{CensysConfig, Credentials};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use threat_ops::models::{AggregateResult, Query};

fn credentials() -> Credentials {
    Credentials {
        api_id: API_ID.into(),
        api_secret: API_SECRET.into(),
    }
}

fn repo_for(url: &str) -> CensysRepo {
    let config = CensysConfig {
        aggregate_url: url.into(),
        timeout_secs: 5,
        ..Default::default()
    };
    CensysRepo::new(&config, credentials()).unwrap()
}

#[tokio::test]
async fn aggregate_decodes_total_and_buckets() {
    let server = spawn_mock(MockCensys::populated()).await;
    let repo = repo_for(&server.url);

    let out = repo
        .aggregate(&Query::new("services.service_name: *", "location.continent", 10))
        .await;
    assert!(!out.is_failed());
    assert_eq!(out.total(), 245_000_000);
    assert_eq!(out.buckets().len(), 4);
    assert_eq!(out.buckets()[0].key, "Asia");
    assert_eq!(out.result().count_for("Europe"), 60_000_000);
}

#[tokio::test]
async fn aggregate_sends_query_body_and_basic_auth() {
    let server = spawn_mock(MockCensys::populated()).await;
    let repo = repo_for(&server.url);

    let out = repo.total_hosts("services.service_name: RDP").await;
    assert_eq!(out.total(), 4_100_000);

    let recorded = server.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].query, "services.service_name: RDP");
    assert_eq!(recorded[0].field, "location.country_code");
    assert_eq!(recorded[0].num_buckets, 1);
}

#[tokio::test]
async fn non_success_status_yields_empty_result() {
    let mut mock = MockCensys::populated();
    mock.failing_fields = vec!["location.continent"];
    let server = spawn_mock(mock).await;
    let repo = repo_for(&server.url);

    let out = repo
        .aggregate(&Query::new("services.service_name: *", "location.continent", 10))
        .await;
    assert!(out.is_failed());
    assert_eq!(out.result(), &AggregateResult::default());
    match out {
        AggregateOutcome::Failed(AggregateError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "aggregation failed");
        }
        other => panic!("expected status failure, got {other:?}"),
    }
}

#[tokio::test]
async fn wrong_credentials_yield_empty_result() {
    let server = spawn_mock(MockCensys::populated()).await;
    let config = CensysConfig {
        aggregate_url: server.url.clone(),
        timeout_secs: 5,
        ..Default::default()
    };
    let repo = CensysRepo::new(
        &config,
        Credentials {
            api_id: "someone".into(),
            api_secret: "else".into(),
        },
    )
    .unwrap();

    let out = repo.total_hosts("services.service_name: *").await;
    assert!(matches!(
        out,
        AggregateOutcome::Failed(AggregateError::Status { status: 401, .. })
    ));
    assert_eq!(out.total(), 0);
}

#[tokio::test]
async fn malformed_body_yields_decode_failure() {
    let app = Router::new().route(AGGREGATE_PATH, post(|| async { "<html>not json</html>" }));
    let url = spawn_router(app).await;
    let repo = repo_for(&url);

    let out = repo.total_hosts("services.service_name: *").await;
    assert!(matches!(out, AggregateOutcome::Failed(AggregateError::Decode(_))));
    assert!(out.buckets().is_empty());
}

#[tokio::test]
async fn missing_result_object_reads_as_zero() {
    let app = Router::new().route(
        AGGREGATE_PATH,
        post(|| async { axum::Json(serde_json::json!({ "code": 200, "status": "OK" })) }),
    );
    let url = spawn_router(app).await;
    let repo = repo_for(&url);

    let out = repo.total_hosts("services.service_name: *").await;
    assert!(!out.is_failed());
    assert_eq!(out.total(), 0);
}

#[tokio::test]
async fn rate_limited_status_is_not_propagated() {
    let app = Router::new().route(
        AGGREGATE_PATH,
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let url = spawn_router(app).await;
    let repo = repo_for(&url);

    let out = repo.total_hosts("services.service_name: *").await;
    assert!(out.is_failed());
    assert_eq!(out.total(), 0);
}

#[tokio::test]
async fn unreachable_endpoint_yields_transport_failure() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let repo = repo_for(&format!("http://{}{}", addr, AGGREGATE_PATH));

    let out = repo.total_hosts("services.service_name: *").await;
    assert!(matches!(
        out,
        AggregateOutcome::Failed(AggregateError::Transport(_))
    ));
    assert_eq!(out.total(), 0);
}

#[tokio::test]
async fn hung_endpoint_times_out_once_without_retry() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        AGGREGATE_PATH,
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(10)).await;
                "{}"
            }
        }),
    );
    let url = spawn_router(app).await;
    let config = CensysConfig {
        aggregate_url: url,
        timeout_secs: 1,
        ..Default::default()
    };
    let repo = CensysRepo::new(&config, credentials()).unwrap();

    let started = Instant::now();
    let out = repo.total_hosts("services.service_name: *").await;
    let elapsed = started.elapsed();

    assert!(matches!(
        out,
        AggregateOutcome::Failed(AggregateError::Transport(ref e)) if e.is_timeout()
    ));
    assert!(elapsed >= Duration::from_millis(900), "returned too early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(5), "waited past the timeout: {elapsed:?}");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn status_is_kept_when_error_body_is_cut_off() {
    let app = Router::new().route(
        AGGREGATE_PATH,
        post(|| async {
            let chunks = futures_util::stream::unfold(0u8, |step| async move {
                match step {
                    0 => Some((Ok::<_, std::io::Error>("upstream unavail"), 1)),
                    1 => {
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        Some((Err(std::io::Error::other("connection reset")), 2))
                    }
                    _ => None,
                }
            });
            (StatusCode::SERVICE_UNAVAILABLE, Body::from_stream(chunks))
        }),
    );
    let url = spawn_router(app).await;
    let repo = repo_for(&url);

    let out = repo.total_hosts("services.service_name: *").await;
    assert!(matches!(
        out,
        AggregateOutcome::Failed(AggregateError::Status { status: 503, .. })
    ));
    assert_eq!(out.total(), 0);
}

#[test]
fn invalid_aggregate_url_is_rejected_at_construction() {
    let config = CensysConfig {
        aggregate_url: "not a url".into(),
        ..Default::default()
    };
    let err = CensysRepo::new(&config, credentials()).err().expect("invalid url");
    assert!(err.to_string().contains("censys.aggregate_url"));
}
