//! Domain model and capability ports of the HCMS portal.
//!
//! Nothing in this crate performs I/O. Storage, HTTP, navigation and user
//! notification are reached through the traits defined here and implemented
//! by the infrastructure, interaction and host crates.

pub mod api;
pub mod appointment;
pub mod auth;
pub mod clock;
pub mod config;
pub mod doctor;
pub mod error;
pub mod filter;
pub mod host;
pub mod patient;
pub mod prescription;
pub mod role;
pub mod route;
pub mod session;
pub(crate) mod wire;

// Re-export common types
pub use api::{ActionOutcome, HospitalApi};
pub use config::{PortalConfig, TokenPlacement};
pub use error::{HcmsError, Result};
pub use role::Role;
pub use route::{Location, Page};
pub use session::{Session, SessionStore};
