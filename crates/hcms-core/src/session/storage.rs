//! Persisted key/value storage capability.

use crate::error::Result;

/// Process-wide persisted key/value storage shared by every page.
///
/// This is the capability the session lives in. Implementations decide where
/// the values go (memory, a JSON file on disk, browser local storage); the
/// session layer only needs string get/set/remove.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
