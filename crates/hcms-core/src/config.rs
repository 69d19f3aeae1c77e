//! Portal configuration model.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the auth token travels on authenticated requests.
#[derive(
    Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TokenPlacement {
    /// `?token=` query parameter or path segment, as the backend expects.
    #[default]
    Query,
    /// `Authorization: Bearer <token>`.
    Header,
}

/// Backend for the persisted session keys.
#[derive(
    Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageKind {
    #[default]
    File,
    Memory,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PortalConfig {
    pub base_url: String,
    pub token_placement: TokenPlacement,
    /// Per-request timeout; `0` disables it.
    pub request_timeout_secs: u64,
    /// Delay applied by the host before issuing a filter request.
    pub filter_debounce_ms: u64,
    pub storage: StorageKind,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_placement: TokenPlacement::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            filter_debounce_ms: 0,
            storage: StorageKind::default(),
        }
    }
}

impl PortalConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn filter_debounce(&self) -> Option<Duration> {
        (self.filter_debounce_ms > 0).then(|| Duration::from_millis(self.filter_debounce_ms))
    }
}
