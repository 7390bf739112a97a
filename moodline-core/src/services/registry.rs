//! Account registry - find, insert, and update stored accounts

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::Account;
use crate::ports::store::{self, USERS_KEY};
use crate::ports::KvStore;

/// Directory of all registered accounts, persisted as a single array under
/// the `users` key.
///
/// Reads are tolerant: a missing or malformed array is treated as an empty
/// registry. Writes always rewrite the whole array.
pub struct AccountRegistry {
    store: Arc<dyn KvStore>,
}

impl AccountRegistry {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Account> {
        store::read_json(self.store.as_ref(), USERS_KEY).unwrap_or_default()
    }

    fn save(&self, accounts: &[Account]) -> Result<()> {
        store::write_json(self.store.as_ref(), USERS_KEY, &accounts)
    }

    /// All registered accounts, in registration order.
    pub fn accounts(&self) -> Vec<Account> {
        self.load()
    }

    pub fn find_by_email(&self, email: &str) -> Option<Account> {
        self.load().into_iter().find(|a| a.email == email)
    }

    pub fn find_by_id(&self, id: i64) -> Option<Account> {
        self.load().into_iter().find(|a| a.id == id)
    }

    /// Adds a new account. Fails with `AccountExists` when the email is
    /// already registered; the check and the insert happen in the same
    /// read-modify-write pass.
    pub fn insert(&self, account: &Account) -> Result<()> {
        let mut accounts = self.load();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(Error::AccountExists);
        }
        accounts.push(account.clone());
        self.save(&accounts)
    }

    /// Replaces the stored account with the same id. Returns `Ok(false)`
    /// when no such account exists.
    pub fn update(&self, account: &Account) -> Result<bool> {
        let mut accounts = self.load();
        let Some(slot) = accounts.iter_mut().find(|a| a.id == account.id) else {
            return Ok(false);
        };
        *slot = account.clone();
        self.save(&accounts)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;

    fn registry() -> AccountRegistry {
        AccountRegistry::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_insert_and_find() {
        let registry = registry();
        let account = Account::new("mira@example.com".to_string(), "secret".to_string());
        registry.insert(&account).unwrap();

        let found = registry.find_by_email("mira@example.com").unwrap();
        assert_eq!(found.id, account.id);
        assert_eq!(found.email, "mira@example.com");
        assert_eq!(registry.find_by_id(account.id).unwrap().email, found.email);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let registry = registry();
        let first = Account::new("mira@example.com".to_string(), "secret".to_string());
        registry.insert(&first).unwrap();

        let second = Account::new("mira@example.com".to_string(), "other".to_string());
        let err = registry.insert(&second).unwrap_err();
        assert_eq!(err.to_string(), "User already exists");
        assert_eq!(registry.accounts().len(), 1);
    }

    #[test]
    fn test_update_replaces_account() {
        let registry = registry();
        let mut account = Account::new("mira@example.com".to_string(), "secret".to_string());
        registry.insert(&account).unwrap();

        account.name = Some("Mira".to_string());
        assert!(registry.update(&account).unwrap());
        assert_eq!(
            registry.find_by_id(account.id).unwrap().name.as_deref(),
            Some("Mira")
        );
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let registry = registry();
        let account = Account::new("mira@example.com".to_string(), "secret".to_string());
        registry.insert(&account).unwrap();

        let mut stranger = Account::new("other@example.com".to_string(), "pw".to_string());
        stranger.name = Some("Nobody".to_string());
        assert!(!registry.update(&stranger).unwrap());
        assert_eq!(registry.accounts().len(), 1);
        assert!(registry.find_by_email("other@example.com").is_none());
    }

    #[test]
    fn test_corrupt_users_value_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store
            .write(USERS_KEY, serde_json::json!({"not": "an array"}))
            .unwrap();
        let registry = AccountRegistry::new(store);
        assert!(registry.accounts().is_empty());

        let account = Account::new("mira@example.com".to_string(), "secret".to_string());
        registry.insert(&account).unwrap();
        assert_eq!(registry.accounts().len(), 1);
    }
}
