//! Transient form state for building or editing one entry.
//!
//! A draft accumulates field edits and staged files, then folds into
//! the store as exactly one mutation on submit: an update when an
//! editing target is set, a create otherwise. The draft never holds a
//! live reference into the store; editing keeps only the target's id
//! and copies of its editable fields.

use uuid::Uuid;

use crate::error::{Result, StudylogError};
use crate::files::StagedFile;
use crate::model::Entry;
use crate::store::{EntryStore, StorageSlot};

#[derive(Debug, Default)]
pub struct DraftSession {
    topic: String,
    notes: String,
    staged: Vec<StagedFile>,
    editing: Option<Uuid>,
    error: Option<String>,
}

impl DraftSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn staged(&self) -> &[StagedFile] {
        &self.staged
    }

    /// Id of the entry being edited, absent when creating new.
    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Current validation message, for form binding.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
        self.error = None;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.error = None;
    }

    pub fn stage_file(&mut self, file: StagedFile) {
        self.staged.push(file);
    }

    /// Remove one staged file by position; the others keep their
    /// relative order.
    pub fn unstage_file(&mut self, index: usize) -> Option<StagedFile> {
        if index < self.staged.len() {
            Some(self.staged.remove(index))
        } else {
            None
        }
    }

    /// Start editing an existing entry: its text fields are copied in
    /// and the staging list starts empty. Persisted metadata cannot be
    /// turned back into live file handles, so attachments must be
    /// re-staged or the update will clear them.
    pub fn begin_edit(&mut self, entry: &Entry) {
        self.topic = entry.topic.clone();
        self.notes = entry.notes.clone();
        self.staged.clear();
        self.editing = Some(entry.id);
        self.error = None;
    }

    /// Abandon the draft without touching the store.
    pub fn cancel_edit(&mut self) {
        *self = Self::default();
    }

    /// Validate and fold the draft into the store. The draft resets
    /// only on success; a failed submit (blank topic, or the editing
    /// target vanished) leaves it intact for correction.
    pub fn submit<S: StorageSlot>(&mut self, store: &mut EntryStore<S>) -> Result<Uuid> {
        if self.topic.trim().is_empty() {
            let err = StudylogError::TopicRequired;
            self.error = Some(err.to_string());
            return Err(err);
        }

        let files = self.staged.iter().map(StagedFile::to_metadata).collect();
        let topic = self.topic.clone();
        let notes = self.notes.clone();

        let id = match self.editing {
            Some(id) => store.update(id, topic, notes, files)?.id,
            None => store.create(topic, notes, files)?.id,
        };

        *self = Self::default();
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemorySlot;

    fn open_empty() -> EntryStore<MemorySlot> {
        EntryStore::open(MemorySlot::new())
    }

    #[test]
    fn test_submit_creates_entry() {
        let mut store = open_empty();
        let mut draft = DraftSession::new();

        draft.set_topic("Physics");
        let id = draft.submit(&mut store).unwrap();

        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].id, id);
        assert_eq!(store.entries()[0].topic, "Physics");
    }

    #[test]
    fn test_submit_resets_draft() {
        let mut store = open_empty();
        let mut draft = DraftSession::new();

        draft.set_topic("Physics");
        draft.set_notes("wave equations");
        draft.stage_file(StagedFile::new("a.png", "image/png", 1));
        draft.submit(&mut store).unwrap();

        assert_eq!(draft.topic(), "");
        assert_eq!(draft.notes(), "");
        assert!(draft.staged().is_empty());
        assert!(!draft.is_editing());
        assert!(draft.error().is_none());
    }

    #[test]
    fn test_submit_blank_topic_sets_error_and_leaves_store_alone() {
        let mut store = open_empty();
        let mut draft = DraftSession::new();

        draft.set_topic("   ");
        draft.set_notes("some notes");
        assert!(matches!(
            draft.submit(&mut store),
            Err(StudylogError::TopicRequired)
        ));

        assert!(store.entries().is_empty());
        assert_eq!(draft.error(), Some("Topic name is required"));
        // The rest of the draft survives for correction
        assert_eq!(draft.notes(), "some notes");
    }

    #[test]
    fn test_set_field_clears_error() {
        let mut store = open_empty();
        let mut draft = DraftSession::new();

        let _ = draft.submit(&mut store);
        assert!(draft.error().is_some());

        draft.set_topic("Biology");
        assert!(draft.error().is_none());
    }

    #[test]
    fn test_edit_roundtrip_keeps_id_and_count() {
        let mut store = open_empty();
        let original = store
            .create("Math".to_string(), String::new(), Vec::new())
            .unwrap()
            .clone();

        let mut draft = DraftSession::new();
        draft.begin_edit(&original);
        assert_eq!(draft.topic(), "Math");
        assert!(draft.is_editing());

        draft.set_topic("Algebra");
        let id = draft.submit(&mut store).unwrap();

        assert_eq!(store.entries().len(), 1);
        assert_eq!(id, original.id);
        assert_eq!(store.entries()[0].topic, "Algebra");
        assert_eq!(store.entries()[0].date, original.date);
        assert!(!draft.is_editing());
    }

    #[test]
    fn test_begin_edit_clears_staged_files() {
        let mut store = open_empty();
        let entry = store
            .create(
                "Math".to_string(),
                String::new(),
                vec![StagedFile::new("old.png", "image/png", 10).to_metadata()],
            )
            .unwrap()
            .clone();

        let mut draft = DraftSession::new();
        draft.stage_file(StagedFile::new("pending.pdf", "application/pdf", 5));
        draft.begin_edit(&entry);

        assert!(draft.staged().is_empty());
    }

    #[test]
    fn test_edit_without_restaging_drops_attachments() {
        let mut store = open_empty();
        let entry = store
            .create(
                "Math".to_string(),
                String::new(),
                vec![StagedFile::new("old.png", "image/png", 10).to_metadata()],
            )
            .unwrap()
            .clone();

        let mut draft = DraftSession::new();
        draft.begin_edit(&entry);
        draft.submit(&mut store).unwrap();

        assert!(store.entries()[0].files.is_empty());
    }

    #[test]
    fn test_unstage_is_positionally_stable() {
        let mut draft = DraftSession::new();
        draft.stage_file(StagedFile::new("a.png", "image/png", 1));
        draft.stage_file(StagedFile::new("b.pdf", "application/pdf", 2));
        draft.stage_file(StagedFile::new("c.txt", "text/plain", 3));

        let removed = draft.unstage_file(1).unwrap();
        assert_eq!(removed.name, "b.pdf");

        let names: Vec<&str> = draft.staged().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "c.txt"]);

        assert!(draft.unstage_file(5).is_none());
    }

    #[test]
    fn test_cancel_edit_resets_without_mutation() {
        let mut store = open_empty();
        let entry = store
            .create("Math".to_string(), "notes".to_string(), Vec::new())
            .unwrap()
            .clone();

        let mut draft = DraftSession::new();
        draft.begin_edit(&entry);
        draft.set_topic("Changed");
        draft.cancel_edit();

        assert!(!draft.is_editing());
        assert_eq!(draft.topic(), "");
        assert_eq!(store.entries()[0].topic, "Math");
    }

    #[test]
    fn test_submit_to_vanished_target_keeps_draft() {
        let mut store = open_empty();
        let entry = store
            .create("Math".to_string(), String::new(), Vec::new())
            .unwrap()
            .clone();

        let mut draft = DraftSession::new();
        draft.begin_edit(&entry);
        draft.set_topic("Algebra");

        store.delete(entry.id).unwrap();

        assert!(matches!(
            draft.submit(&mut store),
            Err(StudylogError::EntryNotFound(_))
        ));
        // Draft stays editable rather than silently resetting
        assert_eq!(draft.topic(), "Algebra");
        assert!(draft.is_editing());
    }

    #[test]
    fn test_staged_image_projects_preview() {
        let mut store = open_empty();
        let mut draft = DraftSession::new();

        draft.set_topic("Biology");
        draft.stage_file(StagedFile::new("cell.png", "image/png", 42));
        draft.stage_file(StagedFile::new("paper.pdf", "application/pdf", 43));
        draft.submit(&mut store).unwrap();

        let files = &store.entries()[0].files;
        assert_eq!(files.len(), 2);
        assert!(files[0].preview.is_some());
        assert_eq!(files[1].preview, None);
    }
}
