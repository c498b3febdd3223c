use std::collections::HashMap;
use std::sync::Mutex;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;
use uuid::Uuid;

use bcilab_types::api::SessionClaims;
use bcilab_types::models::User;

pub const SESSION_COOKIE: &str = "bcilab_session";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl: chrono::Duration,
    pub secure_cookies: bool,
}

/// Cookie-carried sessions: a signed JWT in the cookie, plus the set of live
/// session ids on the server so logout takes effect immediately.
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: chrono::Duration,
    secure_cookies: bool,
    // sid -> exp (unix seconds)
    live: Mutex<HashMap<Uuid, usize>>,
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: config.ttl,
            secure_cookies: config.secure_cookies,
            live: Mutex::new(HashMap::new()),
        }
    }

    /// Start a session for `user` and return the cookie that carries it.
    pub fn issue(&self, user: &User) -> anyhow::Result<Cookie<'static>> {
        let now = chrono::Utc::now();
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| anyhow::anyhow!("session lifetime {} is out of range", self.ttl))?;
        let claims = SessionClaims {
            sub: user.id.clone(),
            username: user.username.clone(),
            sid: Uuid::new_v4(),
            exp: expires.timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;

        let mut live = self.live.lock().unwrap_or_else(|e| e.into_inner());
        let now_secs = now.timestamp() as usize;
        live.retain(|_, exp| *exp > now_secs);
        live.insert(claims.sid, claims.exp);
        debug!(user_id = %user.id, sid = %claims.sid, active = live.len(), "Session issued");

        Ok(Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .build())
    }

    /// Decode `token` and check that its session is still live.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .ok()?
            .claims;

        let live = self.live.lock().unwrap_or_else(|e| e.into_inner());
        live.contains_key(&claims.sid).then_some(claims)
    }

    pub fn claims_from_jar(&self, jar: &CookieJar) -> Option<SessionClaims> {
        jar.get(SESSION_COOKIE).and_then(|c| self.verify(c.value()))
    }

    pub fn revoke(&self, sid: Uuid) {
        self.live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&sid);
    }

    /// Cookie that clears the session cookie on the client.
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE).path("/").build()
    }
}
