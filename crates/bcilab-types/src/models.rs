use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A registered account. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// A named snapshot of a simulator configuration saved by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarredResult {
    pub id: String,
    pub modality: String,
    pub parameters: Map<String, Value>,
    pub metrics: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
    pub name: String,
}

/// Caller-supplied fields for a new starred result. Id, timestamp and the
/// default name are assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewStarredResult {
    pub modality: String,
    pub parameters: Map<String, Value>,
    pub metrics: Map<String, Value>,
    pub name: Option<String>,
}
