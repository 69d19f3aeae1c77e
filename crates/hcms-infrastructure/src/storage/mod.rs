//! Key/value storage backends for the session store.

mod atomic_json;
mod json_file;
mod memory;

pub use atomic_json::AtomicJsonFile;
pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
