//! Integration tests for registration, login, logout and the session gates.

mod common;

use axum::http::{StatusCode, header};
use common::{auth, body_json, build_test_app, get, location, post_json, register, session_cookie};
use serde_json::json;

#[tokio::test]
async fn register_sets_session_and_redirects_to_simulator() {
    let app = build_test_app();
    let response = auth(&app, "register", "alice", "pw").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_some());

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["redirect"], "/simulator");
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = build_test_app();
    register(&app, "alice", "pw").await;

    let response = auth(&app, "register", "alice", "other").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Username already exists");
}

#[tokio::test]
async fn login_with_correct_password_succeeds() {
    let app = build_test_app();
    register(&app, "alice", "secret").await;

    let response = auth(&app, "login", "alice", "secret").await;
    let cookie = session_cookie(&response).expect("login should set a cookie");
    assert_eq!(body_json(response).await["success"], true);

    let listed = get(&app, "/api/get-starred-results", Some(&cookie)).await;
    assert_eq!(body_json(listed).await["success"], true);
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let app = build_test_app();
    register(&app, "alice", "secret").await;

    let wrong = body_json(auth(&app, "login", "alice", "nope").await).await;
    let unknown = body_json(auth(&app, "login", "nobody", "secret").await).await;

    assert_eq!(wrong["success"], false);
    assert_eq!(wrong["message"], "Invalid username or password");
    assert_eq!(wrong, unknown);
}

#[tokio::test]
async fn missing_fields_are_reported() {
    let app = build_test_app();
    let json = body_json(post_json(&app, "/login", json!({ "username": "alice", "action": "login" }), None).await).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Missing required field: password");
}

#[tokio::test]
async fn malformed_body_uses_error_envelope() {
    let app = build_test_app();
    let json = body_json(
        post_json(&app, "/login", json!({ "username": "a", "password": "b", "action": "delete" }), None).await,
    )
    .await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn root_redirects_by_session_state() {
    let app = build_test_app();

    let anonymous = get(&app, "/", None).await;
    assert_eq!(anonymous.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&anonymous), Some("/login"));

    let cookie = register(&app, "alice", "pw").await;
    let signed_in = get(&app, "/", Some(&cookie)).await;
    assert_eq!(location(&signed_in), Some("/simulator"));
}

#[tokio::test]
async fn login_page_redirects_when_already_signed_in() {
    let app = build_test_app();

    let anonymous = get(&app, "/login", None).await;
    assert_eq!(anonymous.status(), StatusCode::OK);

    let cookie = register(&app, "alice", "pw").await;
    let signed_in = get(&app, "/login", Some(&cookie)).await;
    assert_eq!(signed_in.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&signed_in), Some("/simulator"));
}

#[tokio::test]
async fn protected_api_without_session_is_unauthorized() {
    let app = build_test_app();
    let response = get(&app, "/api/get-starred-results", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Authentication required");
}

#[tokio::test]
async fn protected_pages_redirect_to_login() {
    let app = build_test_app();
    for uri in ["/simulator", "/account", "/logout"] {
        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), Some("/login"), "{uri}");
    }
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let app = build_test_app();
    let cookie = register(&app, "alice", "pw").await;

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));

    // Replaying the old cookie no longer works.
    let json = body_json(get(&app, "/api/get-starred-results", Some(&cookie)).await).await;
    assert_eq!(json["success"], false);

    // Logging in again opens a fresh session.
    let again = auth(&app, "login", "alice", "pw").await;
    assert!(session_cookie(&again).is_some());
}

#[tokio::test]
async fn forged_cookie_is_ignored() {
    let app = build_test_app();
    let response = get(&app, "/simulator", Some("bcilab_session=not-a-token")).await;
    assert_eq!(location(&response), Some("/login"));
}

fn clears_session_cookie(response: &axum::http::Response<axum::body::Body>) -> bool {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("bcilab_session=;") && v.contains("Max-Age=0"))
}

#[tokio::test]
async fn page_gate_clears_stale_cookie() {
    let app = build_test_app();
    let cookie = register(&app, "alice", "pw").await;
    get(&app, "/logout", Some(&cookie)).await;

    let revoked = get(&app, "/simulator", Some(&cookie)).await;
    assert_eq!(location(&revoked), Some("/login"));
    assert!(clears_session_cookie(&revoked));

    let forged = get(&app, "/account", Some("bcilab_session=not-a-token")).await;
    assert!(clears_session_cookie(&forged));

    // No cookie sent, nothing to clear.
    let anonymous = get(&app, "/simulator", None).await;
    assert!(!clears_session_cookie(&anonymous));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_admit_one_account() {
    let app = build_test_app();

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let response = auth(&app, "register", "bob", &format!("pw{i}")).await;
                body_json(response).await["success"] == true
            })
        })
        .collect();

    let mut admitted = 0;
    for task in tasks {
        if task.await.unwrap() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 1);

    let duplicate = body_json(auth(&app, "register", "bob", "late").await).await;
    assert_eq!(duplicate["message"], "Username already exists");
}

#[tokio::test]
async fn health_is_public() {
    let app = build_test_app();
    let json = body_json(get(&app, "/health", None).await).await;
    assert_eq!(json["status"], "ok");
}
