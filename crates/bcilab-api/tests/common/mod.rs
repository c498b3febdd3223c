#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use bcilab_api::auth::AppStateInner;
use bcilab_api::session::{SESSION_COOKIE, SessionConfig};

pub fn test_session_config() -> SessionConfig {
    SessionConfig {
        secret: "integration-test-secret".into(),
        ttl: chrono::Duration::hours(1),
        secure_cookies: false,
    }
}

/// Build the production router over a fresh in-memory state.
pub fn build_test_app() -> Router {
    bcilab_api::router(AppStateInner::in_memory(&test_session_config()))
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `name=value` of the session cookie set by `response`, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE}=")))
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn auth(app: &Router, action: &str, username: &str, password: &str) -> Response<Body> {
    post_json(
        app,
        "/login",
        json!({ "username": username, "password": password, "action": action }),
        None,
    )
    .await
}

/// Register `username` and return the session cookie.
pub async fn register(app: &Router, username: &str, password: &str) -> String {
    let response = auth(app, "register", username, password).await;
    session_cookie(&response).expect("registration should set a session cookie")
}

pub async fn star(app: &Router, cookie: &str, body: Value) -> Value {
    body_json(post_json(app, "/api/star-result", body, Some(cookie)).await).await
}

pub async fn list(app: &Router, cookie: &str) -> Vec<Value> {
    let json = body_json(get(app, "/api/get-starred-results", Some(cookie)).await).await;
    assert_eq!(json["success"], true);
    json["results"].as_array().cloned().unwrap()
}
