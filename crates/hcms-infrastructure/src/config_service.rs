//! Configuration service implementation.
//!
//! Loads [`PortalConfig`] from `config.toml`, then layers environment
//! variables and command-line overrides on top, in that order.

use std::str::FromStr;

use hcms_core::config::{PortalConfig, StorageKind, TokenPlacement};
use hcms_core::error::{HcmsError, Result};

use crate::paths::HcmsPaths;

pub const ENV_BASE_URL: &str = "HCMS_BASE_URL";
pub const ENV_TOKEN_PLACEMENT: &str = "HCMS_TOKEN_PLACEMENT";

/// Values that take precedence over the file and the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub token_placement: Option<TokenPlacement>,
    pub request_timeout_secs: Option<u64>,
    pub filter_debounce_ms: Option<u64>,
    pub storage: Option<StorageKind>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut PortalConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(placement) = self.token_placement {
            config.token_placement = placement;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout_secs = secs;
        }
        if let Some(ms) = self.filter_debounce_ms {
            config.filter_debounce_ms = ms;
        }
        if let Some(storage) = self.storage {
            config.storage = storage;
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: HcmsPaths,
}

impl ConfigService {
    pub fn new(paths: HcmsPaths) -> Self {
        Self { paths }
    }

    /// Resolves the effective configuration from the process environment.
    pub fn load(&self, overrides: &ConfigOverrides) -> Result<PortalConfig> {
        self.load_with_env(overrides, |key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load) with an explicit environment lookup.
    pub fn load_with_env<F>(&self, overrides: &ConfigOverrides, env: F) -> Result<PortalConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.load_file()?;
        apply_env(&mut config, env)?;
        overrides.apply(&mut config);

        if config.base_url.trim().is_empty() {
            return Err(HcmsError::config("base_url must not be empty"));
        }
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        tracing::debug!(
            base_url = %config.base_url,
            token_placement = %config.token_placement,
            storage = %config.storage,
            "Configuration resolved"
        );
        Ok(config)
    }

    /// Reads `config.toml`; a missing or empty file yields the defaults.
    fn load_file(&self) -> Result<PortalConfig> {
        let path = self.paths.config_file();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(PortalConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(PortalConfig::default());
        }
        Ok(toml::from_str(&content)?)
    }

    /// Writes the default configuration if no file exists yet.
    pub fn ensure_config_file(&self) -> Result<()> {
        let path = self.paths.config_file();
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = toml::to_string_pretty(&PortalConfig::default())
            .map_err(|e| HcmsError::config(format!("Failed to serialize defaults: {}", e)))?;
        std::fs::write(&path, body)?;
        tracing::info!(path = %path.display(), "Created default config file");
        Ok(())
    }
}

fn apply_env<F>(config: &mut PortalConfig, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = env(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.base_url = base_url;
    }
    if let Some(raw) = env(ENV_TOKEN_PLACEMENT).filter(|v| !v.trim().is_empty()) {
        config.token_placement = TokenPlacement::from_str(raw.trim()).map_err(|_| {
            HcmsError::config(format!(
                "{} must be 'query' or 'header', got '{}'",
                ENV_TOKEN_PLACEMENT, raw
            ))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn service() -> (ConfigService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HcmsPaths::new(Some(temp_dir.path().to_path_buf())).unwrap();
        (ConfigService::new(paths), temp_dir)
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (service, _dir) = service();
        let config = service
            .load_with_env(&ConfigOverrides::default(), env(&[]))
            .unwrap();
        assert_eq!(config, PortalConfig::default());
    }

    #[test]
    fn test_precedence_file_then_env_then_flags() {
        let (service, dir) = service();
        std::fs::write(
            dir.path().join("config.toml"),
            "base_url = \"http://file:1\"\nfilter_debounce_ms = 250\n",
        )
        .unwrap();

        let from_env = service
            .load_with_env(
                &ConfigOverrides::default(),
                env(&[(ENV_BASE_URL, "http://env:2/"), (ENV_TOKEN_PLACEMENT, "Header")]),
            )
            .unwrap();
        assert_eq!(from_env.base_url, "http://env:2");
        assert_eq!(from_env.token_placement, TokenPlacement::Header);
        assert_eq!(from_env.filter_debounce_ms, 250);

        let overrides = ConfigOverrides {
            base_url: Some("http://flag:3".into()),
            token_placement: Some(TokenPlacement::Query),
            ..Default::default()
        };
        let from_flags = service
            .load_with_env(&overrides, env(&[(ENV_BASE_URL, "http://env:2")]))
            .unwrap();
        assert_eq!(from_flags.base_url, "http://flag:3");
        assert_eq!(from_flags.token_placement, TokenPlacement::Query);
    }

    #[test]
    fn test_bad_token_placement_is_a_config_error() {
        let (service, _dir) = service();
        let err = service
            .load_with_env(
                &ConfigOverrides::default(),
                env(&[(ENV_TOKEN_PLACEMENT, "cookie")]),
            )
            .unwrap_err();
        assert!(matches!(err, HcmsError::Config(_)));
    }

    #[test]
    fn test_ensure_config_file_writes_loadable_defaults() {
        let (service, dir) = service();
        service.ensure_config_file().unwrap();
        assert!(dir.path().join("config.toml").exists());

        let config = service
            .load_with_env(&ConfigOverrides::default(), env(&[]))
            .unwrap();
        assert_eq!(config, PortalConfig::default());
    }
}
