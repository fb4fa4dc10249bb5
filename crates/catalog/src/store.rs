//! Write-through catalog repository.

use serde::Serialize;
use serde::de::DeserializeOwned;

use purific_core::{DomainResult, ItemId};

use crate::catalog::{Catalog, seed_purifiers, seed_refills};
use crate::item::{CatalogItem, CollectionKind, Purifier, Refill, RefillCount};
use crate::storage::{KeyValueStorage, StorageError};

/// Whether mutations still reach the backing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    /// Every mutation rewrites the affected collection.
    WriteThrough,
    /// Storage failed earlier in the session; changes live in memory only.
    MemoryOnly,
}

/// Owns the catalog and mirrors every change to local storage.
///
/// Storage failures never fail a mutation: they are logged and the store
/// drops to [`PersistenceMode::MemoryOnly`] for the rest of the session.
#[derive(Debug)]
pub struct CatalogStore<S> {
    catalog: Catalog,
    storage: S,
    mode: PersistenceMode,
}

impl<S: KeyValueStorage> CatalogStore<S> {
    /// Load both collections, falling back to the seed per missing key.
    pub fn open(storage: S) -> Self {
        let mut mode = PersistenceMode::WriteThrough;

        let purifiers =
            load_collection::<Purifier, _>(&storage, CollectionKind::Purifiers, &mut mode)
                .unwrap_or_else(seed_purifiers);
        let refills = load_collection::<Refill, _>(&storage, CollectionKind::Refills, &mut mode)
            .unwrap_or_else(seed_refills);

        tracing::info!(
            purifiers = purifiers.len(),
            refills = refills.len(),
            mode = ?mode,
            "catalog loaded"
        );

        Self {
            catalog: Catalog::new(purifiers, refills),
            storage,
            mode,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn purifiers(&self) -> &[Purifier] {
        self.catalog.purifiers()
    }

    pub fn refills(&self) -> &[Refill] {
        self.catalog.refills()
    }

    pub fn purifier(&self, id: &ItemId) -> Option<&Purifier> {
        self.catalog.purifier(id)
    }

    pub fn refill(&self, id: &ItemId) -> Option<&Refill> {
        self.catalog.refill(id)
    }

    pub fn item(&self, kind: CollectionKind, id: &ItemId) -> Option<CatalogItem> {
        self.catalog.item(kind, id)
    }

    pub fn persistence_mode(&self) -> PersistenceMode {
        self.mode
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append a purifier under a freshly issued id.
    ///
    /// Field validation is the editor's job; the store accepts what it is given.
    pub fn add_purifier(
        &mut self,
        description: String,
        price: f64,
        refill_count: RefillCount,
    ) -> DomainResult<ItemId> {
        let id = ItemId::generate();
        self.catalog.push_purifier(Purifier {
            id: id.clone(),
            description,
            refill_count,
            price,
        })?;
        tracing::debug!(kind = "purifiers", id = %id, "item added");
        self.persist(CollectionKind::Purifiers);
        Ok(id)
    }

    pub fn add_refill(&mut self, description: String, price: f64) -> DomainResult<ItemId> {
        let id = ItemId::generate();
        self.catalog.push_refill(Refill {
            id: id.clone(),
            description,
            price,
        })?;
        tracing::debug!(kind = "refills", id = %id, "item added");
        self.persist(CollectionKind::Refills);
        Ok(id)
    }

    pub fn replace_purifier(
        &mut self,
        id: &ItemId,
        description: String,
        price: f64,
        refill_count: RefillCount,
    ) -> DomainResult<()> {
        self.catalog
            .replace_purifier(id, description, price, refill_count)?;
        tracing::debug!(kind = "purifiers", id = %id, "item updated");
        self.persist(CollectionKind::Purifiers);
        Ok(())
    }

    pub fn replace_refill(
        &mut self,
        id: &ItemId,
        description: String,
        price: f64,
    ) -> DomainResult<()> {
        self.catalog.replace_refill(id, description, price)?;
        tracing::debug!(kind = "refills", id = %id, "item updated");
        self.persist(CollectionKind::Refills);
        Ok(())
    }

    /// Remove a record. Unknown ids are a no-op and nothing is written.
    pub fn remove(&mut self, kind: CollectionKind, id: &ItemId) -> bool {
        if !self.catalog.remove(kind, id) {
            tracing::debug!(kind = %kind, id = %id, "delete ignored, id not found");
            return false;
        }
        tracing::debug!(kind = %kind, id = %id, "item deleted");
        self.persist(kind);
        true
    }

    fn persist(&mut self, kind: CollectionKind) {
        if self.mode == PersistenceMode::MemoryOnly {
            return;
        }

        let result = match kind {
            CollectionKind::Purifiers => {
                write_collection(&self.storage, kind, self.catalog.purifiers())
            }
            CollectionKind::Refills => {
                write_collection(&self.storage, kind, self.catalog.refills())
            }
        };

        if let Err(err) = result {
            tracing::error!(
                key = kind.storage_key(),
                error = %err,
                "failed to persist catalog; continuing in memory only"
            );
            self.mode = PersistenceMode::MemoryOnly;
        }
    }
}

fn load_collection<T, S>(
    storage: &S,
    kind: CollectionKind,
    mode: &mut PersistenceMode,
) -> Option<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStorage,
{
    let key = kind.storage_key();
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::info!(key, "no stored collection, using seed data");
            return None;
        }
        Err(err) => {
            tracing::error!(
                key,
                error = %err,
                "storage unavailable, using seed data in memory only"
            );
            *mode = PersistenceMode::MemoryOnly;
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => Some(items),
        Err(err) => {
            // Writing now would replace the stored records with seed data.
            tracing::warn!(
                key,
                error = %err,
                "stored collection is unreadable, using seed data in memory only"
            );
            *mode = PersistenceMode::MemoryOnly;
            None
        }
    }
}

fn write_collection<T, S>(
    storage: &S,
    kind: CollectionKind,
    items: &[T],
) -> Result<(), StorageError>
where
    T: Serialize,
    S: KeyValueStorage,
{
    let key = kind.storage_key();
    let payload = serde_json::to_string(items).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &payload)
}
