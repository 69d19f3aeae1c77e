//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: The `Session` snapshot (`token` + `role`)
//! - `storage`: The persisted key/value capability sessions live in
//! - `store`: `SessionStore`, the only reader/writer of the session keys

mod model;
mod storage;
mod store;

pub use model::Session;
pub use storage::KeyValueStorage;
pub use store::{ROLE_KEY, SessionStore, TOKEN_KEY};
