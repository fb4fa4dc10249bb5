//! Catalog of purifier models and refill products.
//!
//! This crate holds the catalog records, the two ordered collections, the
//! write-through [`CatalogStore`] (persistence is injected through
//! [`KeyValueStorage`]) and the single-form [`CatalogEditor`].

pub mod catalog;
pub mod editor;
pub mod item;
pub mod storage;
pub mod store;

pub use catalog::Catalog;
pub use editor::{CatalogEditor, EditTarget, EditorState, ItemForm};
pub use item::{CatalogItem, CollectionKind, Purifier, Refill, RefillCount};
pub use storage::{KeyValueStorage, StorageError};
pub use store::{CatalogStore, PersistenceMode};

#[cfg(test)]
pub(crate) mod test_support;
