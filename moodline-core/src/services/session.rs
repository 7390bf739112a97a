//! Session service - account sign-up, login, profile updates, and logout

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, SessionSnapshot};
use crate::ports::store::{self, AUTH_STATE_KEY};
use crate::ports::{CredentialScheme, KvStore};
use crate::services::AccountRegistry;

/// Holds the live session and keeps its persisted copy in step.
///
/// Auth mutations (`sign_up`, `login`) pass through an async gate so only
/// one is in flight at a time; combined with the registry's write-time
/// uniqueness check this closes the lost-update window between checking an
/// email and writing the account.
pub struct SessionService {
    store: Arc<dyn KvStore>,
    registry: Arc<AccountRegistry>,
    credentials: Arc<dyn CredentialScheme>,
    auth_latency: Duration,
    state: Mutex<SessionSnapshot>,
    auth_gate: tokio::sync::Mutex<()>,
}

impl SessionService {
    pub fn new(
        store: Arc<dyn KvStore>,
        registry: Arc<AccountRegistry>,
        credentials: Arc<dyn CredentialScheme>,
        auth_latency: Duration,
    ) -> Self {
        Self {
            store,
            registry,
            credentials,
            auth_latency,
            state: Mutex::new(SessionSnapshot::default()),
            auth_gate: tokio::sync::Mutex::new(()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionSnapshot> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, snapshot: &SessionSnapshot) -> Result<()> {
        store::write_json(self.store.as_ref(), AUTH_STATE_KEY, snapshot)
    }

    /// Restores the persisted session if one exists and parses; otherwise
    /// the session stays signed out. Called once when the context is built.
    pub fn load_session(&self) {
        if let Some(snapshot) = store::read_json(self.store.as_ref(), AUTH_STATE_KEY) {
            *self.state() = snapshot;
        }
    }

    /// Registers a new account and signs it in. The new session starts with
    /// onboarding incomplete.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        let _gate = self.auth_gate.lock().await;
        tokio::time::sleep(self.auth_latency).await;

        if self.registry.find_by_email(email).is_some() {
            return Err(Error::AccountExists);
        }

        let account = Account::new(email.to_string(), self.credentials.protect(password));
        self.registry.insert(&account)?;

        let snapshot = SessionSnapshot::authenticated(account, false);
        *self.state() = snapshot.clone();
        self.persist(&snapshot)
    }

    /// Signs an existing account in. A wrong email and a wrong password are
    /// indistinguishable to the caller, and the current session is left
    /// untouched on failure. Onboarding completion is re-derived from the
    /// stored profile here and nowhere else.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let _gate = self.auth_gate.lock().await;
        tokio::time::sleep(self.auth_latency).await;

        let account = self
            .registry
            .find_by_email(email)
            .filter(|a| self.credentials.verify(password, &a.password_secret))
            .ok_or(Error::InvalidCredentials)?;

        let onboarded = account.has_profile();
        let snapshot = SessionSnapshot::authenticated(account, onboarded);
        *self.state() = snapshot.clone();
        self.persist(&snapshot)
    }

    /// Records the onboarding answers on the current user and marks the
    /// session onboarded. The avatar is overwritten even when `None`. A
    /// signed-out session makes this a no-op.
    pub fn complete_onboarding(&self, name: &str, avatar: Option<String>) -> Result<()> {
        let snapshot = {
            let mut state = self.state();
            let Some(user) = state.current_user.as_mut() else {
                return Ok(());
            };
            user.name = Some(name.to_string());
            user.avatar = avatar;
            state.has_completed_onboarding = true;
            state.clone()
        };
        self.sync_user(&snapshot)
    }

    /// Edits the current user's profile. The avatar is only replaced when a
    /// new one is given; onboarding state is never touched. A signed-out
    /// session makes this a no-op.
    pub fn update_profile(&self, name: &str, avatar: Option<String>) -> Result<()> {
        let snapshot = {
            let mut state = self.state();
            let Some(user) = state.current_user.as_mut() else {
                return Ok(());
            };
            user.name = Some(name.to_string());
            if avatar.is_some() {
                user.avatar = avatar;
            }
            state.clone()
        };
        self.sync_user(&snapshot)
    }

    fn sync_user(&self, snapshot: &SessionSnapshot) -> Result<()> {
        if let Some(user) = &snapshot.current_user {
            // An account missing from the registry is ignored, matching the
            // session-only update the original app performed.
            self.registry.update(user)?;
        }
        self.persist(snapshot)
    }

    /// Signs out and removes the persisted session key entirely. Accounts
    /// and mood data are untouched.
    pub fn logout(&self) -> Result<()> {
        *self.state() = SessionSnapshot::default();
        self.store.remove(AUTH_STATE_KEY)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state().clone()
    }

    pub fn current_user(&self) -> Option<Account> {
        self.state().current_user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.state().has_completed_onboarding
    }

    /// Email of the signed-in user, or empty when signed out.
    pub fn user_email(&self) -> String {
        self.state()
            .current_user
            .as_ref()
            .map(|u| u.email.clone())
            .unwrap_or_default()
    }

    /// Display name of the signed-in user, or empty when unset or signed out.
    pub fn user_name(&self) -> String {
        self.state()
            .current_user
            .as_ref()
            .and_then(|u| u.name.clone())
            .unwrap_or_default()
    }

    /// Avatar of the signed-in user, or empty when unset or signed out.
    pub fn user_avatar(&self) -> String {
        self.state()
            .current_user
            .as_ref()
            .and_then(|u| u.avatar.clone())
            .unwrap_or_default()
    }
}
