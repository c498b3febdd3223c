use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::session::{SESSION_COOKIE, SessionManager};

/// The authenticated user, inserted into request extensions by the gates below.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub sid: Uuid,
}

/// Gate for JSON endpoints: no session yields an `Unauthorized` envelope.
pub async fn require_api_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = state.current_user(&jar)?.ok_or(ApiError::Unauthorized)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Gate for rendered pages: no session redirects to the login page. A stale or
/// revoked cookie is cleared on the way out.
pub async fn require_page_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    match state.current_user(&jar) {
        Ok(Some(user)) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(None) if jar.get(SESSION_COOKIE).is_some() => (
            jar.remove(SessionManager::removal_cookie()),
            Redirect::to("/login"),
        )
            .into_response(),
        Ok(None) => Redirect::to("/login").into_response(),
        Err(e) => e.into_response(),
    }
}
