//! routes.rs
//!
//! Exercises the router in-process with `tower::ServiceExt::oneshot` over a
//! temporary asset directory.

use std::fs;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use emojidb_api::{router, AppState};
use emojidb_core::config::CoreConfig;
use emojidb_store::{open_service, StoreConfig};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn app(files: &[(&str, &str)]) -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    let service = open_service(StoreConfig::local(dir.path()), CoreConfig::default()).unwrap();
    (dir, router(AppState::new(service)))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn home_says_hello() {
    let (_dir, app) = app(&[]);
    let (status, _, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"data": "Hello world!"}));
}

#[tokio::test]
async fn index_lists_each_identifier_once() {
    let (_dir, app) = app(&[("smile.webp", "w"), ("smile.png", "p"), ("wave.bmp", "b")]);
    let (status, _, body) = get(&app, "/emoji").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"data": ["smile", "wave"]}));
}

#[tokio::test]
async fn meta_describes_known_emoji() {
    let (_dir, app) = app(&[("smile.png", "p"), ("smile.webp", "w")]);
    let (status, _, body) = get(&app, "/emoji/meta/smile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!({"data": {"id": "smile", "extensions": ["png", "webp"], "sizes": ["112", "112"]}})
    );
}

#[tokio::test]
async fn meta_of_unknown_emoji_is_404() {
    let (_dir, app) = app(&[]);
    let (status, _, body) = get(&app, "/emoji/meta/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body), json!({"description": "Emoji does not exist."}));
}

#[tokio::test]
async fn unqualified_fetch_serves_canonical_file() {
    let (_dir, app) = app(&[("smile.png", "png-bytes"), ("smile.webp", "webp-bytes")]);
    let (status, headers, body) = get(&app, "/emoji/smile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/webp");
    assert_eq!(body, b"webp-bytes");
}

#[tokio::test]
async fn unresolvable_emoji_is_500() {
    let (_dir, app) = app(&[("wave.bmp", "bmp")]);
    let (status, _, body) = get(&app, "/emoji/wave").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(&body),
        json!({"description": "Emoji exists, but is badly configured."})
    );
}

#[tokio::test]
async fn qualified_fetch_serves_requested_file() {
    let (_dir, app) = app(&[("smile.png", "png-bytes"), ("smile.webp", "webp-bytes"), ("wave.bmp", "bmp")]);
    let (status, headers, body) = get(&app, "/emoji/smile.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(body, b"png-bytes");

    let (status, _, body) = get(&app, "/emoji/wave.bmp").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"bmp");
}

#[tokio::test]
async fn qualified_miss_redirects_to_unqualified() {
    let (_dir, app) = app(&[("smile.png", "p"), ("smile.webp", "w")]);
    let (status, headers, _) = get(&app, "/emoji/smile.jpg").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(headers[header::LOCATION], "/emoji/smile");
}

#[tokio::test]
async fn dotted_identifier_redirect_does_not_loop() {
    let (_dir, app) = app(&[("v1.2.png", "p")]);
    let (status, headers, _) = get(&app, "/emoji/v1.2.gif").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(headers[header::LOCATION], "/emoji/v1.2");

    let (status, _, body) = get(&app, "/emoji/v1.2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"p");
}

#[tokio::test]
async fn unknown_emoji_is_404_qualified_or_not() {
    let (_dir, app) = app(&[("smile.png", "p")]);
    for uri in ["/emoji/ghost", "/emoji/ghost.png"] {
        let (status, _, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json_body(&body), json!({"description": "Emoji does not exist."}));
    }
}
