//! Collection screen state machine
//!
//! One screen per entity collection: the loaded records, the selection set,
//! the pagination cursor, the add/edit form, and any pending delete
//! confirmation. Every mutation goes through the store seam and is followed
//! by a full reload, so the in-memory list is always a fresh snapshot.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::Local;
use serde_json::{Map, Value};

use crate::api::DocumentStore;
use crate::entity::Entity;

/// A loaded record: the store-assigned id plus the typed entity.
#[derive(Debug, Clone)]
pub struct StoredRecord<E> {
    pub id: String,
    pub entity: E,
}

/// Open add/edit form. `editing_id` decides where a save goes: set means
/// update, unset means create.
#[derive(Debug, Clone, Default)]
struct EditorState {
    editing_id: Option<String>,
    fields: Vec<(String, String)>,
}

/// Delete awaiting confirmation.
#[derive(Debug, Clone)]
enum PendingDelete {
    One { id: String, label: String },
    Selected,
}

/// What a completed save did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

pub struct CollectionScreen<E: Entity> {
    store: Arc<dyn DocumentStore>,
    records: Vec<StoredRecord<E>>,
    selected: BTreeSet<String>,
    filter: String,
    page: usize,
    page_size: usize,
    editor: Option<EditorState>,
    pending_delete: Option<PendingDelete>,
    busy: bool,
}

impl<E: Entity> CollectionScreen<E> {
    pub fn new(store: Arc<dyn DocumentStore>, page_size: usize) -> Self {
        Self {
            store,
            records: Vec::new(),
            selected: BTreeSet::new(),
            filter: String::new(),
            page: 0,
            page_size: page_size.max(1),
            editor: None,
            pending_delete: None,
            busy: false,
        }
    }

    /// Replace the in-memory collection with a fresh full read. The
    /// selection set is pruned to ids that still exist.
    pub async fn load(&mut self) -> Result<()> {
        let records = self
            .store
            .list_all(E::COLLECTION)
            .await
            .with_context(|| format!("Failed to load {}", E::NOUN_PLURAL))?;

        self.records = records
            .into_iter()
            .map(|record| StoredRecord {
                entity: E::from_fields(&record.fields),
                id: record.id,
            })
            .collect();
        self.selected
            .retain(|id| self.records.iter().any(|r| &r.id == id));
        Ok(())
    }

    pub fn records(&self) -> &[StoredRecord<E>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn view(&self, id: &str) -> Option<&StoredRecord<E>> {
        self.records.iter().find(|r| r.id == id)
    }

    // --- editor -----------------------------------------------------------

    /// Open a blank add form.
    pub fn open_editor(&mut self) {
        self.editor = Some(EditorState {
            editing_id: None,
            fields: E::FORM_FIELDS
                .iter()
                .map(|(wire, _)| (wire.to_string(), String::new()))
                .collect(),
        });
    }

    /// Open the form pre-filled from a loaded record; saves will update it.
    pub fn edit(&mut self, id: &str) -> Result<()> {
        let record = self
            .view(id)
            .with_context(|| format!("No {} with id {}", E::NOUN, id))?;
        let fields = record.entity.to_fields();
        self.editor = Some(EditorState {
            editing_id: Some(id.to_string()),
            fields: E::FORM_FIELDS
                .iter()
                .map(|(wire, _)| (wire.to_string(), crate::entity::field_str(&fields, wire)))
                .collect(),
        });
        Ok(())
    }

    /// Set one form field. The field must exist on the form.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        let editor = self.editor.as_mut().context("No editor open")?;
        let slot = editor
            .fields
            .iter_mut()
            .find(|(wire, _)| wire == field)
            .with_context(|| format!("Unknown form field {}", field))?;
        slot.1 = value.into();
        Ok(())
    }

    /// Close the form, clearing the editing id and every field so nothing
    /// leaks into the next add.
    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editor
            .as_ref()
            .is_some_and(|editor| editor.editing_id.is_some())
    }

    /// Submit the open form. Routes to update when an editing id is set,
    /// otherwise to create (stamping the run date). On success the form is
    /// closed and the collection reloaded.
    pub async fn save(&mut self) -> Result<SaveOutcome> {
        if self.busy {
            bail!("Another operation is already in progress");
        }
        let editor = self.editor.clone().context("No editor open")?;

        self.busy = true;
        let result = self.submit(&editor).await;
        self.busy = false;
        let outcome = result?;

        self.close_editor();
        self.load().await?;
        Ok(outcome)
    }

    async fn submit(&mut self, editor: &EditorState) -> Result<SaveOutcome> {
        let mut fields = Map::new();
        for (wire, value) in &editor.fields {
            fields.insert(wire.clone(), Value::String(value.clone()));
        }

        match &editor.editing_id {
            Some(id) => {
                self.store
                    .update(E::COLLECTION, id, fields)
                    .await
                    .with_context(|| format!("Failed to update {} {}", E::NOUN, id))?;
                Ok(SaveOutcome::Updated)
            }
            None => {
                let mut entity = E::from_fields(&fields);
                entity.stamp_created(&run_date());
                self.store
                    .create(E::COLLECTION, entity.to_fields())
                    .await
                    .with_context(|| format!("Failed to create {}", E::NOUN))?;
                Ok(SaveOutcome::Created)
            }
        }
    }

    // --- delete confirmation ----------------------------------------------

    /// Stage a single-record delete for confirmation.
    pub fn request_delete(&mut self, id: &str) -> Result<()> {
        let record = self
            .view(id)
            .with_context(|| format!("No {} with id {}", E::NOUN, id))?;
        self.pending_delete = Some(PendingDelete::One {
            id: id.to_string(),
            label: record.entity.label().to_string(),
        });
        Ok(())
    }

    /// Stage a delete of the current selection for confirmation.
    pub fn request_bulk_delete(&mut self) -> Result<()> {
        if self.selected.is_empty() {
            bail!("No {} selected", E::NOUN_PLURAL);
        }
        self.pending_delete = Some(PendingDelete::Selected);
        Ok(())
    }

    /// The question to put to the user, naming the record or the count.
    pub fn confirm_prompt(&self) -> Option<String> {
        match &self.pending_delete {
            Some(PendingDelete::One { label, .. }) => Some(format!(
                "Are you sure you want to delete the {} \"{}\"?",
                E::NOUN,
                label
            )),
            Some(PendingDelete::Selected) => Some(format!(
                "Are you sure you want to delete {} {}?",
                self.selected.len(),
                E::NOUN_PLURAL
            )),
            None => None,
        }
    }

    /// Carry out the staged delete. Bulk deletes run sequentially and clear
    /// the selection; either kind reloads the collection afterwards.
    pub async fn confirm_delete(&mut self) -> Result<usize> {
        if self.busy {
            bail!("Another operation is already in progress");
        }
        let pending = self.pending_delete.take().context("No delete pending")?;

        self.busy = true;
        let result = self.delete_pending(pending).await;
        self.busy = false;
        let deleted = result?;

        self.load().await?;
        Ok(deleted)
    }

    async fn delete_pending(&mut self, pending: PendingDelete) -> Result<usize> {
        let ids: Vec<String> = match &pending {
            PendingDelete::One { id, .. } => vec![id.clone()],
            PendingDelete::Selected => self.selected.iter().cloned().collect(),
        };

        for id in &ids {
            self.store
                .delete(E::COLLECTION, id)
                .await
                .with_context(|| format!("Failed to delete {} {}", E::NOUN, id))?;
        }

        if matches!(pending, PendingDelete::Selected) {
            self.selected.clear();
        }
        Ok(ids.len())
    }

    /// Drop the staged delete without touching the store.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn has_pending_delete(&self) -> bool {
        self.pending_delete.is_some()
    }

    // --- selection --------------------------------------------------------

    /// Select or clear every loaded record.
    pub fn select_all(&mut self, selected: bool) {
        if selected {
            self.selected = self.records.iter().map(|r| r.id.clone()).collect();
        } else {
            self.selected.clear();
        }
    }

    /// Toggle one record. Ids not currently loaded are ignored, so the
    /// selection set stays a subset of the loaded ids.
    pub fn select_one(&mut self, id: &str, selected: bool) {
        if selected {
            if self.view(id).is_some() {
                self.selected.insert(id.to_string());
            }
        } else {
            self.selected.remove(id);
        }
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    // --- filtering and pagination -----------------------------------------

    /// Narrow the visible rows to records with any field containing `term`,
    /// case-insensitively. Filtering is display-only: the loaded collection
    /// and the selection semantics are untouched.
    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.filter = term.into();
        self.page = 0;
    }

    /// The records the table shows: the loaded collection, narrowed by the
    /// filter when one is set.
    pub fn visible(&self) -> Vec<&StoredRecord<E>> {
        if self.filter.is_empty() {
            return self.records.iter().collect();
        }
        let needle = self.filter.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                record
                    .entity
                    .to_fields()
                    .values()
                    .any(|value| match value {
                        Value::String(s) => s.to_lowercase().contains(&needle),
                        _ => false,
                    })
            })
            .collect()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change the window size and snap back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.visible().len().div_ceil(self.page_size).max(1)
    }

    /// The visible window: a fixed-size slice of the visible rows.
    pub fn current_page(&self) -> Vec<&StoredRecord<E>> {
        let visible = self.visible();
        let start = (self.page * self.page_size).min(visible.len());
        let end = (start + self.page_size).min(visible.len());
        visible[start..end].to_vec()
    }
}

fn run_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemoryStore;
    use crate::entity::Department;

    async fn seeded_screen(names: &[&str]) -> CollectionScreen<Department> {
        let store = Arc::new(MemoryStore::new());
        for name in names {
            let department = Department {
                name: name.to_string(),
                manager_id: format!("M-{}", name),
                created_at: "2026-01-01".to_string(),
            };
            store
                .create(Department::COLLECTION, department.to_fields())
                .await
                .unwrap();
        }
        let mut screen = CollectionScreen::new(store, 10);
        screen.load().await.unwrap();
        screen
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let mut screen = seeded_screen(&["Engineering", "Sales", "Support"]).await;
        let first: Vec<String> = screen.records().iter().map(|r| r.id.clone()).collect();

        screen.load().await.unwrap();
        let second: Vec<String> = screen.records().iter().map(|r| r.id.clone()).collect();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_pagination_partitions_collection() {
        let names: Vec<String> = (0..7).map(|i| format!("Dept {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut screen = seeded_screen(&refs).await;
        screen.set_page_size(3);

        let mut seen = Vec::new();
        for page in 0..screen.page_count() {
            screen.set_page(page);
            seen.extend(screen.current_page().iter().map(|r| r.id.clone()));
        }

        let all: Vec<String> = screen.records().iter().map(|r| r.id.clone()).collect();
        assert_eq!(seen, all);

        // Past the last page the window is empty, not wrapped.
        screen.set_page(screen.page_count());
        assert!(screen.current_page().is_empty());
    }

    #[tokio::test]
    async fn test_page_size_change_resets_page() {
        let mut screen = seeded_screen(&["A", "B", "C"]).await;
        screen.set_page(2);
        screen.set_page_size(2);
        assert_eq!(screen.page(), 0);
    }

    #[tokio::test]
    async fn test_select_all_then_deselect_one() {
        let mut screen = seeded_screen(&["Engineering", "Sales", "Support"]).await;
        screen.select_all(true);

        let all: BTreeSet<String> = screen.records().iter().map(|r| r.id.clone()).collect();
        assert_eq!(screen.selected(), &all);

        let dropped = screen.records()[1].id.clone();
        screen.select_one(&dropped, false);
        assert!(!screen.selected().contains(&dropped));
        assert_eq!(screen.selected().len(), all.len() - 1);

        // Unknown ids never enter the selection.
        screen.select_one("not-loaded", true);
        assert!(!screen.selected().contains("not-loaded"));
    }

    #[tokio::test]
    async fn test_filter_narrows_visible_rows_only() {
        let mut screen = seeded_screen(&["Engineering", "Sales", "Field Sales"]).await;
        screen.set_page(1);
        screen.set_filter("sales");

        // Filter resets the page and narrows what the table shows.
        assert_eq!(screen.page(), 0);
        let visible: Vec<&str> = screen
            .visible()
            .iter()
            .map(|r| r.entity.name.as_str())
            .collect();
        assert_eq!(visible, vec!["Sales", "Field Sales"]);

        // Select-all still covers the whole loaded collection.
        screen.select_all(true);
        assert_eq!(screen.selected().len(), 3);

        screen.set_filter("");
        assert_eq!(screen.visible().len(), 3);
    }

    #[tokio::test]
    async fn test_save_creates_with_run_date() {
        let mut screen = seeded_screen(&[]).await;
        screen.open_editor();
        screen.set_field("name", "Engineering").unwrap();
        screen.set_field("managerId", "M1").unwrap();

        let outcome = screen.save().await.unwrap();
        assert_eq!(outcome, SaveOutcome::Created);
        assert_eq!(screen.len(), 1);
        assert_eq!(screen.records()[0].entity.name, "Engineering");
        assert_eq!(screen.records()[0].entity.created_at, run_date());
        // Form is gone after a save.
        assert!(screen.set_field("name", "x").is_err());
    }

    #[tokio::test]
    async fn test_save_routes_to_update_when_editing() {
        let mut screen = seeded_screen(&["Engineering"]).await;
        let id = screen.records()[0].id.clone();

        screen.edit(&id).unwrap();
        assert!(screen.is_editing());
        screen.set_field("managerId", "M9").unwrap();

        let outcome = screen.save().await.unwrap();
        assert_eq!(outcome, SaveOutcome::Updated);
        assert_eq!(screen.len(), 1);
        assert_eq!(screen.records()[0].id, id);
        assert_eq!(screen.records()[0].entity.manager_id, "M9");
        // The update touched only form fields; the stored stamp survives.
        assert_eq!(screen.records()[0].entity.created_at, "2026-01-01");
    }

    #[tokio::test]
    async fn test_closing_editor_clears_stale_state() {
        let mut screen = seeded_screen(&["Engineering"]).await;
        let id = screen.records()[0].id.clone();

        screen.edit(&id).unwrap();
        screen.close_editor();

        // A fresh add form starts blank and creates rather than updates.
        screen.open_editor();
        assert!(!screen.is_editing());
        screen.set_field("name", "Sales").unwrap();
        screen.set_field("managerId", "M2").unwrap();
        screen.save().await.unwrap();

        assert_eq!(screen.len(), 2);
    }

    #[tokio::test]
    async fn test_save_while_busy_fails() {
        let mut screen = seeded_screen(&[]).await;
        screen.open_editor();
        screen.set_field("name", "Engineering").unwrap();
        screen.busy = true;

        assert!(screen.save().await.is_err());

        screen.busy = false;
        screen.save().await.unwrap();
        assert_eq!(screen.len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_delete_issues_no_store_call() {
        let mut screen = seeded_screen(&["Engineering", "Sales"]).await;
        let id = screen.records()[0].id.clone();

        screen.request_delete(&id).unwrap();
        assert!(screen.confirm_prompt().unwrap().contains("Engineering"));

        screen.cancel_delete();
        assert!(!screen.has_pending_delete());
        assert!(screen.confirm_delete().await.is_err());

        screen.load().await.unwrap();
        assert_eq!(screen.len(), 2);
    }

    #[tokio::test]
    async fn test_confirm_delete_removes_record() {
        let mut screen = seeded_screen(&["Engineering", "Sales"]).await;
        let id = screen.records()[0].id.clone();

        screen.request_delete(&id).unwrap();
        let deleted = screen.confirm_delete().await.unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(screen.len(), 1);
        assert!(screen.view(&id).is_none());
    }

    #[tokio::test]
    async fn test_bulk_delete_clears_selection() {
        let mut screen = seeded_screen(&["Engineering", "Sales", "Support"]).await;
        screen.select_all(true);
        screen.select_one(&screen.records()[2].id.clone(), false);

        screen.request_bulk_delete().unwrap();
        assert!(screen.confirm_prompt().unwrap().contains("2 departments"));

        let deleted = screen.confirm_delete().await.unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(screen.len(), 1);
        assert!(screen.selected().is_empty());
        assert_eq!(screen.records()[0].entity.name, "Support");
    }

    #[tokio::test]
    async fn test_bulk_delete_requires_selection() {
        let mut screen = seeded_screen(&["Engineering"]).await;
        assert!(screen.request_bulk_delete().is_err());
        assert!(!screen.has_pending_delete());
    }
}
