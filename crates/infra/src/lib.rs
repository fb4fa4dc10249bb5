//! Infrastructure layer: storage adapters for the catalog store.

pub mod storage;

pub use storage::{FileStorage, InMemoryStorage, default_data_dir};
