//! Table Endpoint Tests
//!
//! Drives the router in-process:
//! - create_table / write_query success bodies
//! - every failure collapses to 500 by default
//! - classified policy separates 400 / 409 / 500
//! - rows written over HTTP come back from a full scan

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tablegate::http_server::{ErrorStatusPolicy, HttpServer, HttpServerConfig};
use tablegate::store::StoreGateway;
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup(policy: ErrorStatusPolicy) -> (TempDir, Router, StoreGateway) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data.sql");

    let gateway = StoreGateway::new(path.clone());
    gateway.ensure_exists().unwrap();

    let config = HttpServerConfig {
        error_status: policy,
        ..HttpServerConfig::with_database(path)
    };
    let router = HttpServer::build_router(&config);

    (tmp, router, gateway)
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(router, uri, body.to_string()).await
}

async fn post_raw(router: &Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn create_test_table() -> Value {
    json!({
        "table_name": "test_table",
        "table_columns_names": ["id", "name"],
        "table_columns_types": ["INTEGER", "TEXT"]
    })
}

// =============================================================================
// Create Table
// =============================================================================

#[tokio::test]
async fn test_create_table() {
    let (_tmp, router, gateway) = setup(ErrorStatusPolicy::Collapsed);

    let (status, body) = post(&router, "/create_table", create_test_table()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Table created:)"}));

    // Visible to a catalog scan
    let catalog = gateway.fetch_all("sqlite_master").await.unwrap();
    let names: Vec<_> = catalog
        .iter()
        .filter(|row| row.get_text("type") == Some("table"))
        .filter_map(|row| row.get_text("name"))
        .collect();
    assert!(names.contains(&"test_table"));
}

#[tokio::test]
async fn test_create_existing_table_fails() {
    let (_tmp, router, _gateway) = setup(ErrorStatusPolicy::Collapsed);

    post(&router, "/create_table", create_test_table()).await;
    let (status, body) = post(&router, "/create_table", create_test_table()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Table already exists"}));
}

#[tokio::test]
async fn test_create_table_missing_field_fails() {
    let (_tmp, router, gateway) = setup(ErrorStatusPolicy::Collapsed);

    let (status, body) = post(
        &router,
        "/create_table",
        json!({
            "table_name": "test_table_invalid",
            "table_columns_names": ["id", "name"],
            "columns_types": ["INTEGER", "TEXT"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("table_columns_types"));
    assert!(!gateway.table_exists("test_table_invalid").await.unwrap());
}

#[tokio::test]
async fn test_create_table_bad_type_is_store_error() {
    let (_tmp, router, _gateway) = setup(ErrorStatusPolicy::Collapsed);

    let (status, body) = post(
        &router,
        "/create_table",
        json!({
            "table_name": "dup",
            "table_columns_names": ["id", "id"],
            "table_columns_types": ["INTEGER", "TEXT"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("duplicate column"));
}

#[tokio::test]
async fn test_non_json_body_fails() {
    let (_tmp, router, _gateway) = setup(ErrorStatusPolicy::Collapsed);

    let (status, body) = post_raw(&router, "/create_table", "not json".to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

// =============================================================================
// Write Query
// =============================================================================

#[tokio::test]
async fn test_write_query_round_trip() {
    let (_tmp, router, gateway) = setup(ErrorStatusPolicy::Collapsed);
    post(&router, "/create_table", create_test_table()).await;

    let (status, body) = post(
        &router,
        "/write_query",
        json!({
            "table_name": "test_table",
            "table_columns_names": ["id", "name"],
            "values": [1, "test_name"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Data inserted"}));

    let rows = gateway.fetch_all("test_table").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_integer("id"), Some(1));
    assert_eq!(rows[0].get_text("name"), Some("test_name"));
}

#[tokio::test]
async fn test_create_then_insert_scenario() {
    let (_tmp, router, gateway) = setup(ErrorStatusPolicy::Collapsed);

    let (status, body) = post(
        &router,
        "/create_table",
        json!({
            "table_name": "t",
            "table_columns_names": ["id", "name"],
            "table_columns_types": ["INTEGER", "TEXT"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Table created"));

    let (status, body) = post(
        &router,
        "/write_query",
        json!({
            "table_name": "t",
            "table_columns_names": ["id", "name"],
            "values": [1, "x"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Data inserted"));

    let rows = gateway.fetch_all("t").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].to_json(), json!({"id": 1, "name": "x"}));
}

#[tokio::test]
async fn test_write_query_bool_stored_as_integer() {
    let (_tmp, router, gateway) = setup(ErrorStatusPolicy::Collapsed);
    post(
        &router,
        "/create_table",
        json!({
            "table_name": "flags",
            "table_columns_names": ["id", "active", "ratio"],
            "table_columns_types": ["INTEGER", "INTEGER", "REAL"]
        }),
    )
    .await;

    let (status, _) = post(
        &router,
        "/write_query",
        json!({
            "table_name": "flags",
            "table_columns_names": ["id", "active", "ratio"],
            "values": [7, true, 0.5]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let rows = gateway.fetch_all("flags").await.unwrap();
    assert_eq!(rows[0].to_json(), json!({"id": 7, "active": 1, "ratio": 0.5}));
}

#[tokio::test]
async fn test_write_query_extra_value_fails() {
    let (_tmp, router, gateway) = setup(ErrorStatusPolicy::Collapsed);
    post(&router, "/create_table", create_test_table()).await;

    let (status, body) = post(
        &router,
        "/write_query",
        json!({
            "table_name": "test_table",
            "table_columns_names": ["id"],
            "values": [1, "extra_value"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(gateway.fetch_all("test_table").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_write_query_unknown_table_fails() {
    let (_tmp, router, _gateway) = setup(ErrorStatusPolicy::Collapsed);

    let (status, body) = post(
        &router,
        "/write_query",
        json!({
            "table_name": "missing",
            "table_columns_names": ["id"],
            "values": [1]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("no such table"));
}

// =============================================================================
// Classified Status Policy
// =============================================================================

#[tokio::test]
async fn test_classified_policy_status_codes() {
    let (_tmp, router, _gateway) = setup(ErrorStatusPolicy::Classified);

    let (status, _) = post(&router, "/create_table", create_test_table()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(&router, "/create_table", create_test_table()).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post(
        &router,
        "/write_query",
        json!({"table_name": "test_table", "table_columns_names": ["id"]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &router,
        "/write_query",
        json!({
            "table_name": "test_table",
            "table_columns_names": ["nope"],
            "values": [1]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
