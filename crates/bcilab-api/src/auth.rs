use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    Extension, Json,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info, warn};

use bcilab_store::{AccountStore, MemoryStore, StarredStore};
use bcilab_types::api::{LoginAction, LoginRequest, LoginResponse};
use bcilab_types::models::User;

use crate::error::{ApiError, ApiJson, ApiResult};
use crate::middleware::CurrentUser;
use crate::session::{SessionConfig, SessionManager};
use crate::templates;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: Arc<dyn AccountStore>,
    pub starred: Arc<dyn StarredStore>,
    pub sessions: SessionManager,
}

impl AppStateInner {
    /// State backed by a single [`MemoryStore`] serving both accounts and
    /// starred results.
    pub fn in_memory(session: &SessionConfig) -> AppState {
        let store = Arc::new(MemoryStore::new());
        Arc::new(Self {
            accounts: store.clone(),
            starred: store,
            sessions: SessionManager::new(session),
        })
    }

    /// Resolve the session cookie to a live user, if any.
    pub fn current_user(&self, jar: &CookieJar) -> ApiResult<Option<CurrentUser>> {
        let Some(claims) = self.sessions.claims_from_jar(jar) else {
            return Ok(None);
        };
        let Some(user) = self.accounts.get_user_by_id(&claims.sub)? else {
            warn!(user_id = %claims.sub, "Session refers to an unknown user");
            return Ok(None);
        };
        Ok(Some(CurrentUser {
            id: user.id,
            username: user.username,
            sid: claims.sid,
        }))
    }
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

async fn run_blocking<F, T>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(e.to_string())
    })?
}

/// Create an account. Usernames are unique; the hash is Argon2id.
pub async fn register_account(
    accounts: Arc<dyn AccountStore>,
    username: String,
    password: String,
) -> ApiResult<User> {
    // Cheap early rejection; `create_user` re-checks atomically.
    if accounts.get_user_by_username(&username)?.is_some() {
        return Err(ApiError::UsernameTaken);
    }

    run_blocking(move || {
        let password_hash =
            hash_password(&password).map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(accounts.create_user(&username, &password_hash)?)
    })
    .await
}

/// Check credentials. Unknown users and wrong passwords are indistinguishable.
pub async fn authenticate(
    accounts: Arc<dyn AccountStore>,
    username: String,
    password: String,
) -> ApiResult<User> {
    let user = accounts
        .get_user_by_username(&username)?
        .ok_or(ApiError::InvalidCredentials)?;

    run_blocking(move || {
        let ok = verify_password(&password, &user.password_hash)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        if ok {
            Ok(user)
        } else {
            Err(ApiError::InvalidCredentials)
        }
    })
    .await
}

pub async fn index(State(state): State<AppState>, jar: CookieJar) -> ApiResult<Redirect> {
    if state.current_user(&jar)?.is_some() {
        Ok(Redirect::to("/simulator"))
    } else {
        Ok(Redirect::to("/login"))
    }
}

pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> ApiResult<Response> {
    if state.current_user(&jar)?.is_some() {
        return Ok(Redirect::to("/simulator").into_response());
    }
    Ok(Html(templates::login_page()).into_response())
}

/// `POST /login` handles both registration and login, selected by `action`.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Response> {
    if state.current_user(&jar)?.is_some() {
        return Ok(Redirect::to("/simulator").into_response());
    }

    let username = req.username.ok_or_else(|| ApiError::missing("username"))?;
    let password = req.password.ok_or_else(|| ApiError::missing("password"))?;
    let action = req.action.ok_or_else(|| ApiError::missing("action"))?;

    let user = match action {
        LoginAction::Register => {
            let user = register_account(state.accounts.clone(), username, password).await?;
            info!(user_id = %user.id, username = %user.username, "User registered");
            user
        }
        LoginAction::Login => {
            match authenticate(state.accounts.clone(), username.clone(), password).await {
                Ok(user) => {
                    info!(user_id = %user.id, "User logged in");
                    user
                }
                Err(e) => {
                    warn!(username = %username, "Login failed");
                    return Err(e);
                }
            }
        }
    };

    let cookie = state
        .sessions
        .issue(&user)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            success: true,
            redirect: "/simulator".into(),
        }),
    )
        .into_response())
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
) -> impl IntoResponse {
    state.sessions.revoke(user.sid);
    info!(user_id = %user.id, "User logged out");
    (jar.remove(SessionManager::removal_cookie()), Redirect::to("/login"))
}
