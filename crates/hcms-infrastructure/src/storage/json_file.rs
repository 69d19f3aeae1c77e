//! Session storage persisted to a JSON file.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use hcms_core::error::{HcmsError, Result};
use hcms_core::session::KeyValueStorage;

use super::atomic_json::AtomicJsonFile;

type Entries = BTreeMap<String, String>;

/// Key/value storage backed by one JSON object on disk.
///
/// Reads are served from an in-memory copy loaded at open; every write
/// goes through the file under its lock and refreshes the copy.
pub struct JsonFileStorage {
    file: AtomicJsonFile<Entries>,
    entries: Mutex<Entries>,
}

impl JsonFileStorage {
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = AtomicJsonFile::<Entries>::new(path);
        let entries = file.load()?.unwrap_or_default();
        tracing::debug!(path = %file.path().display(), keys = entries.len(), "Opened session file");
        Ok(Self {
            file,
            entries: Mutex::new(entries),
        })
    }

    fn entries(&self) -> Result<MutexGuard<'_, Entries>> {
        self.entries
            .lock()
            .map_err(|_| HcmsError::storage("Session storage lock poisoned"))
    }

    fn write<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries),
    {
        let mut entries = self.entries()?;
        *entries = self.file.update(Entries::new(), f)?;
        Ok(())
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.write(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.write(|entries| {
            entries.remove(key);
        })
    }
}
