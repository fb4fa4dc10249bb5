//! Entity trait: identity + continuity across edits.

/// Entity marker + minimal interface.
///
/// Catalog records keep their identifier for their whole lifetime; every
/// other field may be replaced by an edit.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
