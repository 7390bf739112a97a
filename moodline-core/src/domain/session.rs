//! Session snapshot domain model

use serde::{Deserialize, Serialize};

use super::Account;

/// The currently active user plus derived auth/onboarding flags
///
/// Persisted verbatim under the `"authState"` key (camelCase, the user
/// record under `"user"`). The unauthenticated default has no user and
/// both flags false; an unauthenticated snapshot never carries a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub current_user: Option<Account>,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub has_completed_onboarding: bool,
}

impl SessionSnapshot {
    /// Snapshot for a freshly authenticated user
    pub fn authenticated(user: Account, has_completed_onboarding: bool) -> Self {
        Self {
            current_user: Some(user),
            is_authenticated: true,
            has_completed_onboarding,
        }
    }
}
