//! Natural-language query endpoint tests.

use super::MockBackend;
use axum::http::{Method, StatusCode};
use db_query_client::api::NlQueryPayload;
use pretty_assertions::assert_eq;
use serde_json::json;

fn nl_body() -> serde_json::Value {
    json!({
        "generatedSql": "SELECT name, total FROM customers ORDER BY total DESC LIMIT 5",
        "columns": ["name", "total"],
        "rows": [["Ada", 120.5], ["Grace", 99]],
        "limitAdded": false,
        "message": null
    })
}

#[tokio::test]
async fn test_nl_query_returns_body() {
    let backend = MockBackend::new()
        .json(Method::POST, "/nl-query", nl_body())
        .start()
        .await;

    let result = backend
        .client()
        .nl_query(&NlQueryPayload::new(2, "top 5 customers by total"))
        .await
        .unwrap();

    assert_eq!(
        result.generated_sql,
        "SELECT name, total FROM customers ORDER BY total DESC LIMIT 5"
    );
    assert_eq!(result.columns, vec!["name", "total"]);
    assert_eq!(result.rows[0], vec![json!("Ada"), json!(120.5)]);
    assert_eq!(result.message, None);

    let request = backend.single_request();
    assert_eq!(
        request.body,
        Some(json!({"connectionId": 2, "prompt": "top 5 customers by total"}))
    );
}

#[tokio::test]
async fn test_nl_query_forwards_api_key() {
    let backend = MockBackend::new()
        .json(Method::POST, "/nl-query", nl_body())
        .start()
        .await;

    backend
        .client()
        .nl_query(&NlQueryPayload::new(2, "anything").with_api_key("sk-live-xyz"))
        .await
        .unwrap();

    let body = backend.single_request().body.unwrap();
    assert_eq!(body["apiKey"], "sk-live-xyz");
}

#[tokio::test]
async fn test_nl_query_missing_connection() {
    let backend = MockBackend::new()
        .route(
            Method::POST,
            "/nl-query",
            StatusCode::NOT_FOUND,
            r#"{"detail":"Connection 77 not found"}"#,
        )
        .start()
        .await;

    let err = backend
        .client()
        .nl_query(&NlQueryPayload::new(77, "count rows"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(
        err.to_string(),
        r#"HTTP 404 Not Found: {"detail":"Connection 77 not found"}"#
    );
}
