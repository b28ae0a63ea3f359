//! Router tests against in-memory storage

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use orrery_daemon::api::create_router;
use orrery_daemon::api::rest::state::AppState;
use orrery_daemon::config::ImageryConfig;
use orrery_daemon::{ImageryClient, InMemoryStorage};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_with_imagery(imagery: ImageryConfig) -> Router {
    let state = AppState::new(
        Arc::new(InMemoryStorage::new()),
        Arc::new(ImageryClient::new(imagery).unwrap()),
        "memory",
    );
    create_router(state, true)
}

fn app() -> Router {
    app_with_imagery(ImageryConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn planet(name: &str) -> Value {
    json!({
        "pseudo": "ada",
        "planetName": name,
        "type": "rocky",
        "size": 1.2,
        "distance": 20,
        "temperature": 0,
        "atmosphere": ["co2"],
        "hasWater": false
    })
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_create_list_delete() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/api/planets", Some(planet("Xa"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["success"], true);
    let id = created["id"].as_i64().unwrap();

    send(&app, Method::POST, "/api/planets", Some(planet("Yb"))).await;

    let (status, listed) = send(&app, Method::GET, "/api/planets", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    // newest first
    assert_eq!(listed[0]["name"], "Yb");
    assert_eq!(listed[1]["atmosphere"], json!(["co2"]));
    assert_eq!(listed[1]["hasWater"], false);
    // zero temperature is a real value, not a missing one
    assert_eq!(listed[1]["temperature"], 0.0);

    let (status, deleted) = send(&app, Method::DELETE, &format!("/api/planets/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"], true);

    let (_, listed) = send(&app, Method::GET, "/api/planets", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_field_is_rejected() {
    let app = app();
    let mut body = planet("Xa");
    body.as_object_mut().unwrap().remove("pseudo");

    let (status, error) = send(&app, Method::POST, "/api/planets", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "All required fields must be filled in");
    assert_eq!(error["code"], "VALIDATION_ERROR");

    let (_, listed) = send(&app, Method::GET, "/api/planets", None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_body_has_error_field() {
    let app = app();
    let (status, error) = send(
        &app,
        Method::POST,
        "/api/planets",
        Some(json!({"planetName": "Xa", "size": "big"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string());
}

#[tokio::test]
async fn test_delete_unknown_id_is_idempotent() {
    let (status, body) = send(&app(), Method::DELETE, "/api/planets/999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], false);
}

#[tokio::test]
async fn test_get_planet() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/api/planets", Some(planet("Xa"))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/api/planets/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Xa");

    let (status, _) = send(&app, Method::GET, "/api/planets/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/planets/mars", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_imagery_search_is_relayed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "saturn"))
        .and(query_param("media_type", "image"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"collection": {"items": [{"href": "x"}]}})),
        )
        .mount(&server)
        .await;

    let app = app_with_imagery(ImageryConfig {
        apod_url: format!("{}/apod", server.uri()),
        search_url: format!("{}/search", server.uri()),
        api_key: "k".into(),
        timeout_secs: 2,
    });

    let (status, body) = send(&app, Method::GET, "/api/nasa/planet/saturn", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["collection"]["items"][0]["href"], "x");
}

#[tokio::test]
async fn test_imagery_failure_is_generic_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apod"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let app = app_with_imagery(ImageryConfig {
        apod_url: format!("{}/apod", server.uri()),
        search_url: format!("{}/search", server.uri()),
        api_key: "k".into(),
        timeout_secs: 2,
    });

    let (status, body) = send(&app, Method::GET, "/api/nasa/apod?date=2024-01-01", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch NASA data");
}
