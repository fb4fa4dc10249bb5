//! `KeyValueStorage` implementations.
//!
//! - [`InMemoryStorage`]: process-local map, for tests and `--in-memory` runs.
//! - [`FileStorage`]: one JSON file per key under the app data directory.

mod file;
mod in_memory;

pub use file::{FileStorage, default_data_dir};
pub use in_memory::InMemoryStorage;
