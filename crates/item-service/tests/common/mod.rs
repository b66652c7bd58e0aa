//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use item_service::messages::bundled_catalog;
use item_service::repository::MemoryItemRepository;
use item_service::{build_app, AppState};
use std::sync::Arc;
use tower::ServiceExt;

/// Router over an empty in-memory repository with the bundled messages
pub fn build_test_app() -> (Router, Arc<MemoryItemRepository>) {
    let repository = Arc::new(MemoryItemRepository::new());
    let catalog = bundled_catalog("en").expect("bundled messages parse");
    let app = build_app(AppState::new(repository.clone(), Arc::new(catalog)));
    (app, repository)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    post_form_with_language(app, uri, body, None).await
}

pub async fn post_form_with_language(
    app: Router,
    uri: &str,
    body: &str,
    language: Option<&str>,
) -> Response<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(language) = language {
        request = request.header(header::ACCEPT_LANGUAGE, language);
    }
    app.oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
