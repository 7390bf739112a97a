//! Key-value store port - persistence abstraction

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::domain::result::Result;

/// Persisted key for the account registry
pub const USERS_KEY: &str = "users";
/// Persisted key for the session snapshot
pub const AUTH_STATE_KEY: &str = "authState";
/// Persisted key for the mood ledger blob
pub const MOOD_DATA_KEY: &str = "moodData";

/// Durable string-keyed JSON store
///
/// The contract mirrors web storage: reading a key that was never written
/// yields `Ok(None)`, and removing one is a no-op. Writes replace the whole
/// value under the key; there is no partial update.
pub trait KvStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<JsonValue>>;
    fn write(&self, key: &str, value: JsonValue) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Read and decode a key. Any failure, whether a store error or a value
/// that no longer matches the expected shape, is treated as the key being
/// absent; callers fall back to their defaults.
pub fn read_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let value = store.read(key).ok().flatten()?;
    serde_json::from_value(value).ok()
}

/// Encode and write a value under a key
pub fn write_json<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> Result<()> {
    store.write(key, serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;

    #[test]
    fn test_read_json_absent_key() {
        let store = MemoryStore::new();
        let value: Option<Vec<String>> = read_json(&store, "missing");
        assert!(value.is_none());
    }

    #[test]
    fn test_read_json_shape_mismatch_is_absent() {
        let store = MemoryStore::new();
        store
            .write("users", serde_json::json!("not an array"))
            .unwrap();

        let value: Option<Vec<i64>> = read_json(&store, "users");
        assert!(value.is_none());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let store = MemoryStore::new();
        write_json(&store, "users", &vec![1, 2, 3]).unwrap();

        let value: Option<Vec<i64>> = read_json(&store, "users");
        assert_eq!(value, Some(vec![1, 2, 3]));
    }
}
