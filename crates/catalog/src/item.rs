//! Catalog records: purifier models and refill products.

use serde::{Deserialize, Serialize};

use purific_core::{DomainError, Entity, ItemId};

/// Number of refill units consumed by one refill-change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RefillCount {
    #[default]
    One,
    Two,
}

impl RefillCount {
    pub fn get(self) -> u8 {
        match self {
            RefillCount::One => 1,
            RefillCount::Two => 2,
        }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.get())
    }
}

impl TryFrom<u8> for RefillCount {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RefillCount::One),
            2 => Ok(RefillCount::Two),
            other => Err(DomainError::validation(format!(
                "refill count must be 1 or 2, got {other}"
            ))),
        }
    }
}

impl From<RefillCount> for u8 {
    fn from(value: RefillCount) -> Self {
        value.get()
    }
}

impl core::fmt::Display for RefillCount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// A purifier model on sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purifier {
    pub id: ItemId,
    pub description: String,
    pub refill_count: RefillCount,
    /// Purchase price in BRL.
    pub price: f64,
}

impl Entity for Purifier {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A replacement filter unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refill {
    pub id: ItemId,
    pub description: String,
    /// Unit price in BRL.
    pub price: f64,
}

impl Entity for Refill {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Which of the two catalog collections an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Purifiers,
    Refills,
}

impl CollectionKind {
    /// Key under which the collection is persisted.
    pub fn storage_key(self) -> &'static str {
        match self {
            CollectionKind::Purifiers => "purifiers",
            CollectionKind::Refills => "refills",
        }
    }
}

impl core::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.storage_key())
    }
}

impl core::str::FromStr for CollectionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "purifiers" | "purifier" | "p" => Ok(CollectionKind::Purifiers),
            "refills" | "refill" | "r" => Ok(CollectionKind::Refills),
            other => Err(DomainError::validation(format!(
                "unknown collection '{other}' (expected purifiers or refills)"
            ))),
        }
    }
}

/// Any catalog record, tagged by collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogItem {
    Purifier(Purifier),
    Refill(Refill),
}

impl CatalogItem {
    pub fn id(&self) -> &ItemId {
        match self {
            CatalogItem::Purifier(p) => &p.id,
            CatalogItem::Refill(r) => &r.id,
        }
    }

    pub fn kind(&self) -> CollectionKind {
        match self {
            CatalogItem::Purifier(_) => CollectionKind::Purifiers,
            CatalogItem::Refill(_) => CollectionKind::Refills,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            CatalogItem::Purifier(p) => &p.description,
            CatalogItem::Refill(r) => &r.description,
        }
    }

    pub fn price(&self) -> f64 {
        match self {
            CatalogItem::Purifier(p) => p.price,
            CatalogItem::Refill(r) => r.price,
        }
    }

    /// Refill units per change; only purifiers carry one.
    pub fn refill_count(&self) -> Option<RefillCount> {
        match self {
            CatalogItem::Purifier(p) => Some(p.refill_count),
            CatalogItem::Refill(_) => None,
        }
    }
}

impl From<Purifier> for CatalogItem {
    fn from(value: Purifier) -> Self {
        CatalogItem::Purifier(value)
    }
}

impl From<Refill> for CatalogItem {
    fn from(value: Refill) -> Self {
        CatalogItem::Refill(value)
    }
}
