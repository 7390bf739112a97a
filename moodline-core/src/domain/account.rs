//! Account domain model

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counter salting ids created within the same millisecond
static ID_COUNTER: AtomicI64 = AtomicI64::new(0);

/// Generate a fresh account id: millisecond timestamp in the upper bits,
/// a rolling counter in the lower 16. Monotonic within a session and safe
/// against two sign-ups landing on the same millisecond.
pub fn fresh_account_id() -> i64 {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);

    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    (timestamp << 16) | counter
}

/// A registered user account
///
/// Serialized in the persisted `"users"` wire format: camelCase keys, the
/// secret under `"password"`, and `name`/`avatar` omitted until onboarding
/// sets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub email: String,
    /// Opaque credential blob. Stored as given by the credential scheme;
    /// the reference scheme keeps it in clear text.
    #[serde(rename = "password")]
    pub password_secret: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Account {
    /// Create a new account with a fresh id and no profile
    pub fn new(email: impl Into<String>, password_secret: impl Into<String>) -> Self {
        Self {
            id: fresh_account_id(),
            email: email.into(),
            password_secret: password_secret.into(),
            created_at: Utc::now(),
            name: None,
            avatar: None,
        }
    }

    /// True once onboarding has stored a name. An empty string counts as
    /// unset, matching the truthiness check the login flow relies on.
    pub fn has_profile(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
    }
}
