pub mod auth;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod session;
pub mod simulate;
pub mod starred;
pub mod templates;

use axum::{
    Json, Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::auth::AppState;
use crate::middleware::{require_api_session, require_page_session};

/// The complete application: pages, JSON API and request tracing.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(auth::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/health", get(health));

    let page_routes = Router::new()
        .route("/logout", get(auth::logout))
        .route("/simulator", get(pages::simulator))
        .route("/account", get(pages::account))
        .route_layer(from_fn_with_state(state.clone(), require_page_session));

    let api_routes = Router::new()
        .route("/api/star-result", post(starred::star_result))
        .route("/api/unstar-result", post(starred::unstar_result))
        .route("/api/get-starred-results", get(starred::get_starred_results))
        .route("/api/update-result-name", post(starred::update_result_name))
        .route("/api/modalities", get(simulate::list_modalities))
        .route("/api/simulate", post(simulate::simulate))
        .route_layer(from_fn_with_state(state.clone(), require_api_session));

    Router::new()
        .merge(public_routes)
        .merge(page_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
