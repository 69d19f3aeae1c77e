//! Filesystem-backed services for the HCMS portal: paths, session storage
//! and configuration loading.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use config_service::{ConfigOverrides, ConfigService};
pub use paths::HcmsPaths;
pub use storage::{JsonFileStorage, MemoryStorage};
