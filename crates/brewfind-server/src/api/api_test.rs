use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn app_for(upstream: &str, api_key: Option<&str>, static_dir: &Path) -> Router {
    let client = SerpApiClient::with_base_url(api_key, 5, upstream).expect("client");
    build_app(AppState::new(client), static_dir)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

async fn mount_payload(server: &MockServer, payload: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(server)
        .await;
}

// -------------------------------------------------------------------------
// ApiError
// -------------------------------------------------------------------------

#[test]
fn upstream_error_maps_to_bad_gateway() {
    let response = ApiError::upstream(serde_json::json!("Invalid API key")).into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn internal_error_maps_to_internal_server_error() {
    let response = ApiError::internal("boom").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn api_error_serializes_only_error_field() {
    let json = serde_json::to_value(ApiError::internal("boom")).expect("serialize");
    assert_eq!(json, serde_json::json!({ "error": "boom" }));
}

#[test]
fn map_places_error_keeps_upstream_value_verbatim() {
    let value = serde_json::json!({ "code": 429, "message": "quota" });
    let err = map_places_error("req-1", PlacesError::Upstream(value.clone()));
    assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    assert_eq!(err.error, value);
}

// -------------------------------------------------------------------------
// /api/coffee
// -------------------------------------------------------------------------

#[tokio::test]
async fn coffee_returns_count_and_results() {
    let server = MockServer::start().await;
    mount_payload(
        &server,
        serde_json::json!({
            "local_results": [
                {
                    "rating": 4.5,
                    "gps_coordinates": { "latitude": 10.776, "longitude": 106.700 }
                },
                {
                    "title": "Far away",
                    "rating": 4.8,
                    "gps_coordinates": { "latitude": 10.9, "longitude": 106.9 }
                }
            ]
        }),
    )
    .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_for(&server.uri(), Some("test-key"), dir.path());
    let (status, json) = get_json(app, "/api/coffee").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    let results = json["results"].as_array().expect("results array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "Unnamed");
    assert_eq!(results[0]["distance_km"], 0.0);
    assert_eq!(results[0]["rating"], 4.5);
    assert_eq!(results[0]["location"]["lat"], 10.776);
}

#[tokio::test]
async fn coffee_forwards_query_parameters_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "tra sua"))
        .and(query_param("ll", "@21.03,105.85,16z"))
        .and(query_param("hl", "en"))
        .and(query_param("gl", "us"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_for(&server.uri(), Some("test-key"), dir.path());
    let (status, json) = get_json(
        app,
        "/api/coffee?q=tra%20sua&lat=21.03&lng=105.85&zoom=16&hl=en&gl=us",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "count": 0, "results": [] }));
}

#[tokio::test]
async fn coffee_applies_filters_from_query() {
    let server = MockServer::start().await;
    mount_payload(
        &server,
        serde_json::json!({
            "local_results": [
                {
                    "title": "Open and good",
                    "rating": 4.6,
                    "open_state": "Open 24 hours",
                    "gps_coordinates": { "latitude": 10.7765, "longitude": 106.700 }
                },
                {
                    "title": "Closing soon",
                    "rating": 4.9,
                    "open_state": "Open ⋅ Closes 9 PM",
                    "gps_coordinates": { "latitude": 10.7762, "longitude": 106.700 }
                },
                {
                    "title": "Mediocre",
                    "rating": 3.0,
                    "open_state": "Open now",
                    "gps_coordinates": { "latitude": 10.7761, "longitude": 106.700 }
                }
            ]
        }),
    )
    .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_for(&server.uri(), Some("test-key"), dir.path());
    let (status, json) = get_json(app, "/api/coffee?min_rating=4&open_now=true").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["title"], "Open and good");
}

#[tokio::test]
async fn coffee_relays_upstream_error_as_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "error": "Invalid API key" })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_for(&server.uri(), None, dir.path());
    let (status, json) = get_json(app, "/api/coffee").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json, serde_json::json!({ "error": "Invalid API key" }));
}

#[tokio::test]
async fn coffee_reports_decode_failure_as_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_for(&server.uri(), Some("test-key"), dir.path());
    let (status, json) = get_json(app, "/api/coffee").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].is_string(), "error should be a string: {json}");
    assert!(json.get("results").is_none());
}

#[tokio::test]
async fn coffee_reports_null_payload_as_internal_error() {
    let server = MockServer::start().await;
    mount_payload(&server, serde_json::Value::Null).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_for(&server.uri(), Some("test-key"), dir.path());
    let (status, json) = get_json(app, "/api/coffee").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].is_string(), "error should be a string: {json}");
    assert!(json.get("count").is_none());
}

#[tokio::test]
async fn coffee_echoes_request_id() {
    let server = MockServer::start().await;
    mount_payload(&server, serde_json::json!({})).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_for(&server.uri(), Some("test-key"), dir.path());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/coffee")
                .header("x-request-id", "req-abc")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-abc")
    );
}

// -------------------------------------------------------------------------
// /api/health and static files
// -------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_missing_upstream_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_for("http://127.0.0.1:9", None, dir.path());
    let (status, json) = get_json(app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["upstream_key"], "missing");
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn health_reports_configured_upstream_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_for("http://127.0.0.1:9", Some("k"), dir.path());
    let (_, json) = get_json(app, "/api/health").await;
    assert_eq!(json["data"]["upstream_key"], "configured");
}

#[tokio::test]
async fn root_serves_front_end_index() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("index.html"), "<h1>brewfind</h1>").expect("write index");

    let app = app_for("http://127.0.0.1:9", Some("k"), dir.path());
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    assert_eq!(&body[..], b"<h1>brewfind</h1>");
}

#[tokio::test]
async fn unknown_static_path_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_for("http://127.0.0.1:9", Some("k"), dir.path());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/missing.js")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
