//! Local user profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Locally fabricated user record. Never verified against a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a session user with an id derived from `created_at`.
    pub fn new(name: impl Into<String>, email: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: format!("user_{}", created_at.timestamp_millis()),
            name: name.into(),
            email: email.into(),
            created_at,
        }
    }
}
