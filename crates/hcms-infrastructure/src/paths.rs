//! Unified path management for hcms files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/hcms/          # Config directory (platform default via `dirs`)
//! ├── config.toml          # Portal configuration
//! ├── session.json         # Persisted `token` / `userRole` keys
//! └── logs/                # Application logs
//!     └── hcms.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

use hcms_core::error::{HcmsError, Result};

const APP_DIR: &str = "hcms";

/// Resolves every file the portal reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HcmsPaths {
    root: PathBuf,
}

impl HcmsPaths {
    /// Uses `root` when given, otherwise `<config_dir>/hcms`.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => dirs::config_dir()
                .ok_or_else(|| HcmsError::config("Cannot find config directory"))?
                .join(APP_DIR),
        };
        Ok(Self { root })
    }

    pub fn config_dir(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.root.join("session.json")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Creates the config and log directories if missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_files_live_under_root() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HcmsPaths::new(Some(temp_dir.path().to_path_buf())).unwrap();

        assert_eq!(paths.config_file(), temp_dir.path().join("config.toml"));
        assert_eq!(paths.session_file(), temp_dir.path().join("session.json"));

        paths.ensure_dirs().unwrap();
        assert!(paths.log_dir().is_dir());
    }
}
