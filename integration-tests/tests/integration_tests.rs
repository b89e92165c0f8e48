// Integration tests for the executors dashboard
// These tests verify the full path: backend endpoint -> HTTP source -> view -> rendered page

use api::routes::create_router;
use api::state::AppState;
use api::templates::load_templates;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use common::client::HttpExecutorSource;
use common::config::Settings;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to build the dashboard against a mocked backend
fn dashboard_for(server: &MockServer) -> anyhow::Result<Router> {
    let mut settings = Settings::default();
    settings.backend.base_url = server.uri();
    settings.backend.timeout_seconds = 2;
    settings.validate().map_err(anyhow::Error::msg)?;

    let source = HttpExecutorSource::new(&settings.backend)?;
    let templates = load_templates(None)?;
    Ok(create_router(AppState::new(
        Arc::new(source),
        templates,
        settings,
    )))
}

async fn send(app: Router, uri: &str, htmx: bool) -> (StatusCode, String) {
    let mut request = Request::builder().uri(uri);
    if htmx {
        request = request.header("HX-Request", "true");
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&body).into_owned())
}

fn backend_rows() -> serde_json::Value {
    serde_json::json!([
        {"id": 2, "name": "beta", "hostname": "node-b", "status": "stopped",
         "resources": {"cpus": 2}, "stats": null},
        {"id": 1, "name": "alpha", "hostname": "node-a", "status": "running",
         "resources": {"cpus": 8}, "stats": {"n_completed": 3, "n_jobs": 10}},
        {"id": 3, "name": "gamma", "hostname": "node-c", "status": "lost",
         "resources": {}, "stats": {"n_completed": 0, "n_jobs": 0}},
        {"id": 4, "name": "delta", "hostname": "node-d", "status": "draining",
         "resources": {}, "stats": null}
    ])
}

#[tokio::test]
async fn test_end_to_end_table_fragment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/executors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(backend_rows()))
        .expect(1)
        .mount(&server)
        .await;

    let app = dashboard_for(&server).unwrap();
    let (status, body) = send(app, "/dashboard/executors", true).await;

    assert_eq!(status, StatusCode::OK);
    let order: Vec<usize> = ["alpha", "beta", "gamma", "delta"]
        .iter()
        .map(|name| body.find(name).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]), "unexpected row order");
    assert!(body.contains("executor-status-draining"));
    assert_eq!(body.matches("role=\"progressbar\"").count(), 1);

    server.verify().await;
}

#[tokio::test]
async fn test_end_to_end_json_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/executors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(backend_rows()))
        .mount(&server)
        .await;

    let app = dashboard_for(&server).unwrap();
    let (status, body) = send(app, "/api/executors?sort=name", false).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let names: Vec<&str> = json["data"]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha", "beta", "delta", "gamma"]);
    assert_eq!(json["data"]["rows"][0]["resources"], r#"{"cpus":8}"#);
}

#[tokio::test]
async fn test_end_to_end_backend_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/executors"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is locked"))
        .expect(1)
        .mount(&server)
        .await;

    let app = dashboard_for(&server).unwrap();
    let (status, body) = send(app, "/dashboard/executors", true).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Unable to load executors"));

    server.verify().await;
}

#[tokio::test]
async fn test_page_shell_does_not_hit_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/executors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(backend_rows()))
        .expect(0)
        .mount(&server)
        .await;

    let app = dashboard_for(&server).unwrap();
    let (status, body) = send(app, "/dashboard/executors?name=default", false).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Loading..."));
    assert!(body.contains("name=default"));

    server.verify().await;
}
