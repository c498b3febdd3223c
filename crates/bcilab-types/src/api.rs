use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::StarredResult;

// -- Session Claims --

/// JWT claims carried in the session cookie. `sid` identifies the server-side
/// session entry so logout can revoke a token before it expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub username: String,
    pub sid: Uuid,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginAction {
    Register,
    Login,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub action: Option<LoginAction>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub redirect: String,
}

// -- Starred results --

#[derive(Debug, Deserialize)]
pub struct StarResultRequest {
    pub modality: Option<String>,
    #[serde(default)]
    pub parameters: Option<Map<String, Value>>,
    #[serde(default)]
    pub metrics: Option<Map<String, Value>>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StarResultResponse {
    pub success: bool,
    pub result: StarredResult,
}

#[derive(Debug, Deserialize)]
pub struct UnstarResultRequest {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StarredResultsResponse {
    pub success: bool,
    pub results: Vec<StarredResult>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResultNameRequest {
    pub id: Option<String>,
    pub name: Option<String>,
}

// -- Envelopes --

/// `{ "success": true }` with no payload.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{ "success": false, "message": ... }`, the shape of every API error.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}
