//! Router-level tests for the request paths that fail before reaching the
//! database: input binding, validation, and the uniform error envelope.
//!
//! The pool is created lazily and never connects; any test here that reached
//! the storage layer would fail loudly.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use pretty_assertions::assert_eq;
use sqlx::postgres::PgPoolOptions;
use tedly::{app_router, AppState};
use tower::ServiceExt;

fn test_app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://postgres@localhost:5432/tedly_test")
        .expect("lazy pool");
    app_router(AppState { pool })
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn health_answers_without_a_database() {
    let response = test_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn version_reports_the_crate() {
    let response = test_app().oneshot(get("/version")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "tedly");
}

#[tokio::test]
async fn category_without_name_is_a_400_envelope() {
    let response = test_app()
        .oneshot(post_json("/categories", r#"{"entity": "test-entity"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["path"], "/categories");
    assert!(body["message"].is_array());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn category_with_empty_name_is_rejected() {
    let response = test_app()
        .oneshot(post_json("/categories", r#"{"name": "", "entity": "test-entity"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], serde_json::json!(["name should not be empty"]));
}

#[tokio::test]
async fn unknown_body_fields_are_rejected() {
    let response = test_app()
        .oneshot(post_json(
            "/categories",
            r#"{"name": "Fiction", "entity": "book", "color": "red"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_a_400_envelope() {
    let response = test_app()
        .oneshot(post_json("/books", r#"{"title": "#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["path"], "/books");
}

#[tokio::test]
async fn non_numeric_ids_are_rejected_before_the_service() {
    for uri in ["/categories/abc", "/documents/1.5", "/books/x"] {
        let response = test_app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["message"],
            serde_json::json!(["Validation failed (numeric string is expected)"])
        );
        assert_eq!(body["path"], uri);
    }
}

#[tokio::test]
async fn non_numeric_id_on_delete_is_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/books/not-a-number")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_routes_get_the_404_envelope() {
    let response = test_app().oneshot(get("/authors")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["path"], "/authors");
    assert_eq!(body["message"], serde_json::json!(["Not Found"]));
}

#[tokio::test]
async fn wrong_field_type_in_document_body_is_rejected() {
    let response = test_app()
        .oneshot(post_json("/documents", r#"{"created_by_id": "seven"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
