use std::sync::Arc;

use anyhow::{Result, anyhow};
use hcms_application::PageContext;
use hcms_core::clock::SystemClock;
use hcms_core::config::StorageKind;
use hcms_core::session::{KeyValueStorage, SessionStore};
use hcms_infrastructure::{ConfigOverrides, ConfigService, HcmsPaths, JsonFileStorage, MemoryStorage};
use hcms_interaction::{ClientConfig, HttpHospitalClient};

use crate::app::AppState;
use crate::host::{TerminalNavigator, TerminalNotifier};

pub struct AppBootstrap {
    pub app_state: AppState,
}

fn open_storage(paths: &HcmsPaths, kind: StorageKind) -> Result<Arc<dyn KeyValueStorage>> {
    match kind {
        StorageKind::File => {
            let storage = JsonFileStorage::open(paths.session_file())
                .map_err(|e| anyhow!("Failed to open session storage: {}", e))?;
            Ok(Arc::new(storage))
        }
        StorageKind::Memory => Ok(Arc::new(MemoryStorage::new())),
    }
}

/// Composition root: resolves configuration and wires storage, the HTTP
/// client and the terminal host into a [`PageContext`].
pub fn bootstrap(paths: &HcmsPaths, overrides: &ConfigOverrides) -> Result<AppBootstrap> {
    let config_service = ConfigService::new(paths.clone());
    if let Err(e) = config_service.ensure_config_file() {
        tracing::warn!("[Bootstrap] Could not write default config: {}", e);
    }
    let config = config_service
        .load(overrides)
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    let storage = open_storage(paths, config.storage)?;
    let client = HttpHospitalClient::new(ClientConfig::from(&config))
        .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;
    let (navigator, navigations) = TerminalNavigator::channel();

    let ctx = PageContext::new(
        SessionStore::new(storage),
        Arc::new(client),
        Arc::new(navigator),
        Arc::new(TerminalNotifier),
        Arc::new(SystemClock),
    );
    tracing::info!(
        "[Bootstrap] Portal ready (backend: {}, storage: {})",
        config.base_url,
        config.storage
    );

    Ok(AppBootstrap {
        app_state: AppState::new(ctx, config, navigations),
    })
}
