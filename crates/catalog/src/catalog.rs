//! The two ordered catalog collections.

use purific_core::{DomainError, DomainResult, Entity, ItemId};

use crate::item::{CatalogItem, CollectionKind, Purifier, Refill, RefillCount};

/// Purifier and refill records in display order.
///
/// Ids are unique within their own collection only; a purifier and a refill
/// may share an id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    purifiers: Vec<Purifier>,
    refills: Vec<Refill>,
}

impl Catalog {
    pub fn new(purifiers: Vec<Purifier>, refills: Vec<Refill>) -> Self {
        Self { purifiers, refills }
    }

    /// The catalog a fresh install starts with.
    pub fn seed() -> Self {
        Self::new(seed_purifiers(), seed_refills())
    }

    pub fn purifiers(&self) -> &[Purifier] {
        &self.purifiers
    }

    pub fn refills(&self) -> &[Refill] {
        &self.refills
    }

    pub fn purifier(&self, id: &ItemId) -> Option<&Purifier> {
        position(&self.purifiers, id).map(|i| &self.purifiers[i])
    }

    pub fn refill(&self, id: &ItemId) -> Option<&Refill> {
        position(&self.refills, id).map(|i| &self.refills[i])
    }

    pub fn item(&self, kind: CollectionKind, id: &ItemId) -> Option<CatalogItem> {
        match kind {
            CollectionKind::Purifiers => self.purifier(id).cloned().map(CatalogItem::Purifier),
            CollectionKind::Refills => self.refill(id).cloned().map(CatalogItem::Refill),
        }
    }

    pub fn len(&self, kind: CollectionKind) -> usize {
        match kind {
            CollectionKind::Purifiers => self.purifiers.len(),
            CollectionKind::Refills => self.refills.len(),
        }
    }

    pub fn is_empty(&self, kind: CollectionKind) -> bool {
        self.len(kind) == 0
    }

    pub(crate) fn push_purifier(&mut self, purifier: Purifier) -> DomainResult<()> {
        if self.purifier(&purifier.id).is_some() {
            return Err(DomainError::invariant(format!(
                "purifier id {} already in use",
                purifier.id
            )));
        }
        self.purifiers.push(purifier);
        Ok(())
    }

    pub(crate) fn push_refill(&mut self, refill: Refill) -> DomainResult<()> {
        if self.refill(&refill.id).is_some() {
            return Err(DomainError::invariant(format!(
                "refill id {} already in use",
                refill.id
            )));
        }
        self.refills.push(refill);
        Ok(())
    }

    /// Overwrite the editable fields of a purifier, keeping id and position.
    pub(crate) fn replace_purifier(
        &mut self,
        id: &ItemId,
        description: String,
        price: f64,
        refill_count: RefillCount,
    ) -> DomainResult<()> {
        let index = position(&self.purifiers, id).ok_or_else(DomainError::not_found)?;
        let slot = &mut self.purifiers[index];
        slot.description = description;
        slot.price = price;
        slot.refill_count = refill_count;
        Ok(())
    }

    pub(crate) fn replace_refill(
        &mut self,
        id: &ItemId,
        description: String,
        price: f64,
    ) -> DomainResult<()> {
        let index = position(&self.refills, id).ok_or_else(DomainError::not_found)?;
        let slot = &mut self.refills[index];
        slot.description = description;
        slot.price = price;
        Ok(())
    }

    /// Remove a record; returns false when the id is not present.
    pub(crate) fn remove(&mut self, kind: CollectionKind, id: &ItemId) -> bool {
        match kind {
            CollectionKind::Purifiers => remove_by_id(&mut self.purifiers, id),
            CollectionKind::Refills => remove_by_id(&mut self.refills, id),
        }
    }
}

fn position<E: Entity<Id = ItemId>>(items: &[E], id: &ItemId) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

fn remove_by_id<E: Entity<Id = ItemId>>(items: &mut Vec<E>, id: &ItemId) -> bool {
    match position(items, id) {
        Some(index) => {
            // `remove` shifts the tail down, keeping display order.
            items.remove(index);
            true
        }
        None => false,
    }
}

pub(crate) fn seed_purifiers() -> Vec<Purifier> {
    vec![
        Purifier {
            id: ItemId::from("1"),
            description: "Purific Saúde".to_string(),
            refill_count: RefillCount::Two,
            price: 450.00,
        },
        Purifier {
            id: ItemId::from("2"),
            description: "Purific Ecológico".to_string(),
            refill_count: RefillCount::One,
            price: 290.00,
        },
    ]
}

pub(crate) fn seed_refills() -> Vec<Refill> {
    vec![
        Refill {
            id: ItemId::from("1"),
            description: "Refil Purific Camadas".to_string(),
            price: 65.00,
        },
        Refill {
            id: ItemId::from("2"),
            description: "Refil Purific Alcalino".to_string(),
            price: 85.00,
        },
    ]
}
