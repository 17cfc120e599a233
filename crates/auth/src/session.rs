use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Role;

/// Account details returned alongside a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Session/user payload returned by register and login.
///
/// The API's exact shape is not fixed, so every field is optional and unknown
/// fields are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AccountProfile>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AuthSession {
    /// `true` once `expires_at` has passed; sessions without an expiry never expire here.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}
