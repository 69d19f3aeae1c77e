//! Session store over injected key/value storage.

use std::str::FromStr;
use std::sync::Arc;

use super::model::Session;
use super::storage::KeyValueStorage;
use crate::error::Result;
use crate::role::Role;

/// Storage key holding the opaque auth token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the role's wire name.
pub const ROLE_KEY: &str = "userRole";

/// Reads and writes the session keys.
///
/// A `SessionStore` is cheap to clone; all clones share the same storage, so
/// a write made by one page controller is visible to every other.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn set_role(&self, role: Role) -> Result<()> {
        self.storage.set_item(ROLE_KEY, role.as_ref())
    }

    /// Returns the stored role.
    ///
    /// An unrecognised stored value is treated as no role at all.
    pub fn get_role(&self) -> Result<Option<Role>> {
        let Some(raw) = self.storage.get_item(ROLE_KEY)? else {
            return Ok(None);
        };
        match Role::from_str(&raw) {
            Ok(role) => Ok(Some(role)),
            Err(_) => {
                tracing::warn!(value = %raw, "Ignoring unrecognised stored role");
                Ok(None)
            }
        }
    }

    pub fn clear_role(&self) -> Result<()> {
        self.storage.remove_item(ROLE_KEY)
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.storage.set_item(TOKEN_KEY, token)
    }

    pub fn get_token(&self) -> Result<Option<String>> {
        Ok(self.storage.get_item(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub fn clear_token(&self) -> Result<()> {
        self.storage.remove_item(TOKEN_KEY)
    }

    /// Starts an authenticated session after a successful login.
    pub fn begin(&self, role: Role, token: &str) -> Result<()> {
        self.set_token(token)?;
        self.set_role(role)?;
        tracing::info!(role = %role, "Session started");
        Ok(())
    }

    /// Removes both session keys.
    pub fn clear(&self) -> Result<()> {
        self.clear_token()?;
        self.clear_role()
    }

    pub fn snapshot(&self) -> Result<Session> {
        Ok(Session {
            token: self.get_token()?,
            role: self.get_role()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStorage {
        items: Mutex<HashMap<String, String>>,
    }

    impl KeyValueStorage for MapStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            Ok(self.items.lock().unwrap().get(key).cloned())
        }

        fn set_item(&self, key: &str, value: &str) -> Result<()> {
            self.items
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove_item(&self, key: &str) -> Result<()> {
            self.items.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn store() -> (SessionStore, Arc<MapStorage>) {
        let storage = Arc::new(MapStorage::default());
        (SessionStore::new(storage.clone()), storage)
    }

    #[test]
    fn test_role_is_persisted_by_wire_name() {
        let (store, storage) = store();
        store.set_role(Role::LoggedPatient).unwrap();
        assert_eq!(
            storage.get_item(ROLE_KEY).unwrap().as_deref(),
            Some("loggedPatient")
        );
        assert_eq!(store.get_role().unwrap(), Some(Role::LoggedPatient));
    }

    #[test]
    fn test_unknown_role_reads_as_none() {
        let (store, storage) = store();
        storage.set_item(ROLE_KEY, "nurse").unwrap();
        assert_eq!(store.get_role().unwrap(), None);
    }

    #[test]
    fn test_begin_and_clear() {
        let (store, storage) = store();
        store.begin(Role::Doctor, "tok-1").unwrap();
        assert_eq!(
            store.snapshot().unwrap(),
            Session::new(Role::Doctor, "tok-1")
        );

        store.clear().unwrap();
        assert!(storage.get_item(TOKEN_KEY).unwrap().is_none());
        assert!(storage.get_item(ROLE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_clones_share_storage() {
        let (store, _) = store();
        let other = store.clone();
        store.set_token("shared").unwrap();
        assert_eq!(other.get_token().unwrap().as_deref(), Some("shared"));
    }
}
