//! Metadata endpoint tests.

use super::MockBackend;
use axum::http::{Method, StatusCode};
use db_query_client::api::{ConnectionOut, SyncPayload, UpdateConnectionPayload};
use db_query_client::ApiError;
use pretty_assertions::assert_eq;
use serde_json::json;

fn metadata_body() -> serde_json::Value {
    json!({
        "connection": {
            "id": 1,
            "name": "shop",
            "connectionUrl": "postgres://app@localhost/shop",
            "lastSynced": "2024-06-01T08:30:00.123456"
        },
        "tables": [
            {
                "schema": "public",
                "name": "orders",
                "is_view": false,
                "columns": [
                    {"name": "id", "data_type": "integer"},
                    {"name": "placed_at", "data_type": "timestamp without time zone"}
                ]
            },
            {
                "schema": "reporting",
                "name": "daily_totals",
                "is_view": true,
                "columns": []
            }
        ]
    })
}

#[tokio::test]
async fn test_fetch_connections_returns_body_unmodified() {
    let backend = MockBackend::new()
        .json(
            Method::GET,
            "/metadata",
            json!([{"id": 1, "connectionUrl": "postgres://x"}]),
        )
        .start()
        .await;

    let connections = backend.client().fetch_connections().await.unwrap();

    assert_eq!(
        connections,
        vec![ConnectionOut {
            id: 1,
            name: None,
            connection_url: "postgres://x".to_string(),
            last_synced: None,
        }]
    );
    assert_eq!(
        serde_json::to_value(&connections).unwrap(),
        json!([{"id": 1, "connectionUrl": "postgres://x"}])
    );

    let request = backend.single_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/metadata");
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_fetch_connections_empty() {
    let backend = MockBackend::new()
        .json(Method::GET, "/metadata", json!([]))
        .start()
        .await;

    let connections = backend.client().fetch_connections().await.unwrap();
    assert!(connections.is_empty());
}

#[tokio::test]
async fn test_sync_metadata_sends_payload_and_returns_body() {
    let backend = MockBackend::new()
        .json(Method::POST, "/metadata/sync", metadata_body())
        .start()
        .await;

    let payload = SyncPayload::new("postgres://app@localhost/shop")
        .with_name("shop")
        .with_refresh(true);
    let meta = backend.client().sync_metadata(&payload).await.unwrap();

    assert_eq!(serde_json::to_value(&meta).unwrap(), metadata_body());
    assert_eq!(meta.tables.len(), 2);
    assert!(meta.tables[1].is_view);
    assert_eq!(
        meta.connection.last_synced.as_deref(),
        Some("2024-06-01T08:30:00.123456")
    );

    let request = backend.single_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(
        request.body,
        Some(json!({
            "connectionUrl": "postgres://app@localhost/shop",
            "name": "shop",
            "refresh": true
        }))
    );
}

#[tokio::test]
async fn test_sync_metadata_backend_rejection() {
    let body = r#"{"detail":"could not connect to server: Connection refused"}"#;
    let backend = MockBackend::new()
        .route(Method::POST, "/metadata/sync", StatusCode::BAD_REQUEST, body)
        .start()
        .await;

    let err = backend
        .client()
        .sync_metadata(&SyncPayload::new("postgres://nowhere/db"))
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, body: got } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(got, body);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_metadata_uses_path_parameter() {
    let backend = MockBackend::new()
        .json(Method::GET, "/metadata/42", metadata_body())
        .start()
        .await;

    let meta = backend.client().get_metadata(42).await.unwrap();

    assert_eq!(meta.connection.name.as_deref(), Some("shop"));
    assert_eq!(backend.single_request().path, "/metadata/42");
}

#[tokio::test]
async fn test_get_metadata_unknown_id_propagates_404() {
    let backend = MockBackend::new()
        .route(
            Method::GET,
            "/metadata/999",
            StatusCode::NOT_FOUND,
            r#"{"detail":"Connection not found"}"#,
        )
        .start()
        .await;

    let err = backend.client().get_metadata(999).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(
        err.error_body().map(|b| b.detail_text()),
        Some("Connection not found".to_string())
    );
}

#[tokio::test]
async fn test_update_connection() {
    let backend = MockBackend::new()
        .json(
            Method::PUT,
            "/metadata/5",
            json!({"id": 5, "name": "renamed", "connectionUrl": "sqlite:///a.db", "lastSynced": null}),
        )
        .start()
        .await;

    let conn = backend
        .client()
        .update_connection(
            5,
            &UpdateConnectionPayload {
                name: Some("renamed".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(conn.id, 5);
    assert_eq!(conn.name.as_deref(), Some("renamed"));

    let request = backend.single_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.body, Some(json!({"name": "renamed"})));
}
