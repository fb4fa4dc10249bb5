//! Catalog editor: one shared form, at most one record under edit.

use purific_core::{DomainError, DomainResult, ItemId};

use crate::item::{CatalogItem, CollectionKind, RefillCount};
use crate::storage::KeyValueStorage;
use crate::store::CatalogStore;

/// Form fields shared by both collections.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemForm {
    pub description: String,
    pub price: f64,
    /// Ignored when saving a refill.
    pub refill_count: RefillCount,
}

impl Default for ItemForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            price: 0.0,
            refill_count: RefillCount::One,
        }
    }
}

impl ItemForm {
    /// Check the fields every saved record must satisfy.
    pub fn validate(&self) -> DomainResult<()> {
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("description cannot be empty"));
        }
        // `!(x > 0)` also rejects NaN.
        if !(self.price > 0.0) || !self.price.is_finite() {
            return Err(DomainError::validation("price must be greater than zero"));
        }
        Ok(())
    }

    fn from_item(item: &CatalogItem) -> Self {
        Self {
            description: item.description().to_string(),
            price: item.price(),
            refill_count: item.refill_count().unwrap_or_default(),
        }
    }
}

/// The record currently being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub kind: CollectionKind,
    pub id: ItemId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    /// Saving appends a new record.
    #[default]
    Creating,
    /// Saving replaces the target in place.
    Editing(EditTarget),
}

/// Create/update/delete over a [`CatalogStore`].
///
/// Failed saves leave the form and state untouched so the user can correct
/// their input. Successful saves always return to [`EditorState::Creating`].
#[derive(Debug, Clone)]
pub struct CatalogEditor {
    active: CollectionKind,
    state: EditorState,
    form: ItemForm,
}

impl Default for CatalogEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogEditor {
    pub fn new() -> Self {
        Self {
            active: CollectionKind::Purifiers,
            state: EditorState::Creating,
            form: ItemForm::default(),
        }
    }

    pub fn active_collection(&self) -> CollectionKind {
        self.active
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing(_))
    }

    pub fn form(&self) -> &ItemForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ItemForm {
        &mut self.form
    }

    /// Change tabs. Any pending edit is dropped.
    pub fn switch_collection(&mut self, kind: CollectionKind) {
        self.active = kind;
        self.reset();
    }

    /// Start editing `item`, overwriting the form with its current values.
    pub fn select_for_edit(&mut self, item: &CatalogItem) {
        self.active = item.kind();
        self.form = ItemForm::from_item(item);
        self.state = EditorState::Editing(EditTarget {
            kind: item.kind(),
            id: item.id().clone(),
        });
        tracing::debug!(kind = %item.kind(), id = %item.id(), "editing item");
    }

    /// Leave edit mode without saving.
    pub fn cancel_edit(&mut self) {
        self.reset();
    }

    /// Save into whichever collection the active tab shows.
    pub fn submit<S: KeyValueStorage>(
        &mut self,
        store: &mut CatalogStore<S>,
    ) -> DomainResult<ItemId> {
        match self.active {
            CollectionKind::Purifiers => self.save_purifier(store),
            CollectionKind::Refills => self.save_refill(store),
        }
    }

    pub fn save_purifier<S: KeyValueStorage>(
        &mut self,
        store: &mut CatalogStore<S>,
    ) -> DomainResult<ItemId> {
        self.form.validate()?;
        let form = self.form.clone();

        let id = match self.target_for(CollectionKind::Purifiers)? {
            Some(id) => {
                store.replace_purifier(&id, form.description, form.price, form.refill_count)?;
                id
            }
            None => store.add_purifier(form.description, form.price, form.refill_count)?,
        };

        self.reset();
        Ok(id)
    }

    pub fn save_refill<S: KeyValueStorage>(
        &mut self,
        store: &mut CatalogStore<S>,
    ) -> DomainResult<ItemId> {
        self.form.validate()?;
        let form = self.form.clone();

        let id = match self.target_for(CollectionKind::Refills)? {
            Some(id) => {
                store.replace_refill(&id, form.description, form.price)?;
                id
            }
            None => store.add_refill(form.description, form.price)?,
        };

        self.reset();
        Ok(id)
    }

    /// Delete a record; unknown ids are a no-op.
    ///
    /// Deleting the record under edit also cancels the edit, otherwise the
    /// next save would target a record that no longer exists.
    pub fn delete_item<S: KeyValueStorage>(
        &mut self,
        store: &mut CatalogStore<S>,
        kind: CollectionKind,
        id: &ItemId,
    ) -> bool {
        let removed = store.remove(kind, id);
        if removed {
            if let EditorState::Editing(target) = &self.state {
                if target.kind == kind && &target.id == id {
                    self.reset();
                }
            }
        }
        removed
    }

    fn target_for(&self, kind: CollectionKind) -> DomainResult<Option<ItemId>> {
        match &self.state {
            EditorState::Creating => Ok(None),
            EditorState::Editing(target) if target.kind == kind => Ok(Some(target.id.clone())),
            EditorState::Editing(target) => Err(DomainError::invariant(format!(
                "cannot save {kind} while editing an item of {}",
                target.kind
            ))),
        }
    }

    fn reset(&mut self) {
        self.state = EditorState::Creating;
        self.form = ItemForm::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::test_support::StubStorage;

    fn store() -> CatalogStore<StubStorage> {
        CatalogStore::open(StubStorage::default())
    }

    fn fill(editor: &mut CatalogEditor, description: &str, price: f64) {
        let form = editor.form_mut();
        form.description = description.to_string();
        form.price = price;
    }

    #[test]
    fn save_rejects_empty_description() {
        let mut store = store();
        let mut editor = CatalogEditor::new();
        fill(&mut editor, "", 100.0);

        let err = editor.save_purifier(&mut store).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.catalog(), &Catalog::seed());
        // Input is kept for correction.
        assert_eq!(editor.form().price, 100.0);
    }

    #[test]
    fn save_rejects_non_positive_price() {
        let mut store = store();
        let mut editor = CatalogEditor::new();

        for price in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            fill(&mut editor, "Refil", price);
            assert!(editor.save_refill(&mut store).is_err());
        }
        assert_eq!(store.catalog(), &Catalog::seed());
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn creating_two_items_yields_distinct_stable_ids() {
        let mut store = store();
        let mut editor = CatalogEditor::new();
        editor.switch_collection(CollectionKind::Refills);

        fill(&mut editor, "Refil A", 10.0);
        let first = editor.submit(&mut store).unwrap();
        fill(&mut editor, "Refil B", 20.0);
        let second = editor.submit(&mut store).unwrap();
        assert_ne!(first, second);

        let before = store.refill(&second).cloned().unwrap();
        assert!(editor.delete_item(&mut store, CollectionKind::Refills, &first));

        assert!(store.refill(&first).is_none());
        assert_eq!(store.refill(&second), Some(&before));
        assert_eq!(store.refills().len(), 3);
    }

    #[test]
    fn deleting_first_of_two_created_leaves_one() {
        let mut catalog_store = CatalogStore::open(StubStorage::default());
        for id in ["1", "2"] {
            catalog_store.remove(CollectionKind::Purifiers, &ItemId::from(id));
        }
        let mut editor = CatalogEditor::new();

        fill(&mut editor, "Purific A", 300.0);
        let first = editor.save_purifier(&mut catalog_store).unwrap();
        fill(&mut editor, "Purific B", 400.0);
        editor.form_mut().refill_count = RefillCount::Two;
        let second = editor.save_purifier(&mut catalog_store).unwrap();

        editor.delete_item(&mut catalog_store, CollectionKind::Purifiers, &first);

        assert_eq!(catalog_store.purifiers().len(), 1);
        let remaining = &catalog_store.purifiers()[0];
        assert_eq!(remaining.id, second);
        assert_eq!(remaining.description, "Purific B");
        assert_eq!(remaining.price, 400.0);
        assert_eq!(remaining.refill_count, RefillCount::Two);
    }

    #[test]
    fn successful_save_resets_form_and_state() {
        let mut store = store();
        let mut editor = CatalogEditor::new();
        fill(&mut editor, "Purific Novo", 350.0);
        editor.form_mut().refill_count = RefillCount::Two;

        editor.save_purifier(&mut store).unwrap();

        assert_eq!(editor.state(), &EditorState::Creating);
        assert_eq!(editor.form(), &ItemForm::default());
    }

    #[test]
    fn edit_replaces_in_place() {
        let mut store = store();
        let mut editor = CatalogEditor::new();
        let target = store.item(CollectionKind::Purifiers, &ItemId::from("1")).unwrap();

        editor.select_for_edit(&target);
        assert!(editor.is_editing());
        assert_eq!(editor.form().description, "Purific Saúde");
        assert_eq!(editor.form().refill_count, RefillCount::Two);

        editor.form_mut().price = 499.90;
        let id = editor.save_purifier(&mut store).unwrap();

        assert_eq!(id, ItemId::from("1"));
        assert_eq!(store.purifiers().len(), 2);
        assert_eq!(store.purifiers()[0].id, id);
        assert_eq!(store.purifiers()[0].price, 499.90);
        assert_eq!(store.purifiers()[0].description, "Purific Saúde");
        assert!(!editor.is_editing());
    }

    #[test]
    fn selecting_a_refill_defaults_refill_count() {
        let store = store();
        let mut editor = CatalogEditor::new();
        editor.form_mut().refill_count = RefillCount::Two;

        let refill = store.item(CollectionKind::Refills, &ItemId::from("2")).unwrap();
        editor.select_for_edit(&refill);

        assert_eq!(editor.form().refill_count, RefillCount::One);
        assert_eq!(editor.form().price, 85.0);
        assert_eq!(editor.active_collection(), CollectionKind::Refills);
    }

    #[test]
    fn cancel_edit_discards_changes() {
        let mut store = store();
        let mut editor = CatalogEditor::new();
        let target = store.item(CollectionKind::Refills, &ItemId::from("1")).unwrap();

        editor.select_for_edit(&target);
        editor.form_mut().price = 1.0;
        editor.cancel_edit();

        assert_eq!(editor.state(), &EditorState::Creating);
        assert_eq!(editor.form(), &ItemForm::default());
        assert_eq!(store.refills()[0].price, 65.0);

        // A save now creates rather than overwriting the former target.
        fill(&mut editor, "Refil C", 30.0);
        editor.save_refill(&mut store).unwrap();
        assert_eq!(store.refills().len(), 3);
        assert_eq!(store.refills()[0].price, 65.0);
    }

    #[test]
    fn deleting_the_edit_target_cancels_the_edit() {
        let mut store = store();
        let mut editor = CatalogEditor::new();
        let target = store.item(CollectionKind::Purifiers, &ItemId::from("2")).unwrap();
        editor.select_for_edit(&target);

        editor.delete_item(&mut store, CollectionKind::Purifiers, &ItemId::from("2"));

        assert_eq!(editor.state(), &EditorState::Creating);
        assert_eq!(editor.form(), &ItemForm::default());
    }

    #[test]
    fn deleting_same_id_in_other_collection_keeps_the_edit() {
        let mut store = store();
        let mut editor = CatalogEditor::new();
        let target = store.item(CollectionKind::Purifiers, &ItemId::from("1")).unwrap();
        editor.select_for_edit(&target);

        editor.delete_item(&mut store, CollectionKind::Refills, &ItemId::from("1"));

        assert!(editor.is_editing());
        assert!(store.purifier(&ItemId::from("1")).is_some());
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let mut store = store();
        let mut editor = CatalogEditor::new();
        assert!(!editor.delete_item(&mut store, CollectionKind::Refills, &ItemId::from("zzz")));
        assert_eq!(store.catalog(), &Catalog::seed());
    }

    #[test]
    fn saving_into_the_other_collection_while_editing_is_refused() {
        let mut store = store();
        let mut editor = CatalogEditor::new();
        let target = store.item(CollectionKind::Refills, &ItemId::from("1")).unwrap();
        editor.select_for_edit(&target);

        let err = editor.save_purifier(&mut store).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert!(editor.is_editing());
        assert_eq!(store.catalog(), &Catalog::seed());
    }

    #[test]
    fn switching_collection_drops_the_edit() {
        let store = store();
        let mut editor = CatalogEditor::new();
        let target = store.item(CollectionKind::Purifiers, &ItemId::from("1")).unwrap();
        editor.select_for_edit(&target);

        editor.switch_collection(CollectionKind::Refills);

        assert_eq!(editor.active_collection(), CollectionKind::Refills);
        assert!(!editor.is_editing());
        assert!(editor.form().description.is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: invalid forms never change the catalog.
            #[test]
            fn invalid_saves_leave_catalog_unchanged(
                description in "[ \t]{0,5}",
                price in -1000.0f64..1000.0,
            ) {
                let mut store = store();
                let mut editor = CatalogEditor::new();
                fill(&mut editor, &description, price);

                prop_assert!(editor.save_purifier(&mut store).is_err());
                prop_assert!(editor.save_refill(&mut store).is_err());
                prop_assert_eq!(store.catalog(), &Catalog::seed());
            }

            /// Property: an edited record keeps its id and position.
            #[test]
            fn edits_preserve_identity_and_order(
                index in 0usize..2,
                description in "[A-Za-z][A-Za-z0-9 ]{0,30}",
                price in 0.01f64..10_000.0,
            ) {
                let mut store = store();
                let mut editor = CatalogEditor::new();
                let original = store.purifiers()[index].clone();

                editor.select_for_edit(&CatalogItem::Purifier(original.clone()));
                fill(&mut editor, &description, price);
                editor.save_purifier(&mut store).unwrap();

                prop_assert_eq!(store.purifiers().len(), 2);
                let edited = &store.purifiers()[index];
                prop_assert_eq!(&edited.id, &original.id);
                prop_assert_eq!(&edited.description, &description);
                prop_assert_eq!(edited.price, price);
            }
        }
    }
}
