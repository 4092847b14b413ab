//! Device-local guest store.
//!
//! Substitutes for the remote note service when no account session exists.
//! Two fixed logical keys hold serialized arrays, read-modify-written
//! wholesale. Every operation degrades to a silent no-op (or an empty read)
//! when the backing directory is unavailable, so callers never see an error
//! from the guest path.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::Result;
use crate::models::{Note, NoteId, NotePatch, Notebook, NotebookId, Snapshot};
use crate::store::NoteBackend;

const NOTES_KEY: &str = "guest_notes";
const NOTEBOOKS_KEY: &str = "guest_notebooks";

/// Local key-value persistence for guest notes and notebooks.
#[derive(Debug, Clone)]
pub struct GuestStore {
    /// `None` models an unavailable storage substrate.
    dir: Option<PathBuf>,
}

impl GuestStore {
    /// Open a guest store rooted at the given directory.
    ///
    /// If the directory cannot be created the store opens in disabled mode
    /// and every operation becomes a silent no-op.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        match fs::create_dir_all(&dir) {
            Ok(()) => Self { dir: Some(dir) },
            Err(error) => {
                tracing::warn!(
                    "Guest storage unavailable at {}: {error}; operating without local persistence",
                    dir.display()
                );
                Self { dir: None }
            }
        }
    }

    /// A store with no backing storage, for non-persistent contexts.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { dir: None }
    }

    /// Whether the store has a usable backing directory.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.dir.is_some()
    }

    // ── Notes ───────────────────────────────────────────────────

    /// Read all guest notes, backfilling fields missing from records
    /// written by older versions.
    #[must_use]
    pub fn notes(&self) -> Vec<Note> {
        self.read_key(NOTES_KEY)
    }

    /// Replace the entire stored note collection.
    pub fn write_notes(&self, notes: &[Note]) {
        self.write_key(NOTES_KEY, notes);
    }

    /// Create a guest note from a draft snapshot, prepending it to the list.
    ///
    /// The note is returned even when storage is unavailable so the caller
    /// can keep editing against its identifier.
    pub fn create_note(&self, snapshot: Snapshot) -> Note {
        let note = Note::from_snapshot(snapshot);
        let mut notes = self.notes();
        notes.insert(0, note.clone());
        self.write_notes(&notes);
        note
    }

    /// Merge a patch into the matching note and refresh its update
    /// timestamp. Unknown identifiers are a no-op returning `None`.
    pub fn update_note(&self, id: &NoteId, patch: &NotePatch) -> Option<Note> {
        let mut notes = self.notes();
        let note = notes.iter_mut().find(|note| note.id == *id)?;

        if let Some(title) = &patch.title {
            note.title = title.clone();
        }
        if let Some(content) = &patch.content {
            note.content = content.clone();
        }
        if let Some(is_pinned) = patch.is_pinned {
            note.is_pinned = is_pinned;
        }
        if let Some(notebook_id) = patch.notebook_id {
            note.notebook_id = notebook_id;
        }
        if let Some(tags) = &patch.tags {
            note.tags = tags.clone();
        }
        note.updated_at = Utc::now();

        let updated = note.clone();
        self.write_notes(&notes);
        Some(updated)
    }

    /// Remove the note with the given identifier.
    pub fn delete_note(&self, id: &NoteId) {
        let notes: Vec<Note> = self
            .notes()
            .into_iter()
            .filter(|note| note.id != *id)
            .collect();
        self.write_notes(&notes);
    }

    /// Drop the stored note collection (used after a successful migration).
    pub fn clear_notes(&self) {
        self.remove_key(NOTES_KEY);
    }

    // ── Notebooks ───────────────────────────────────────────────

    /// Read all guest notebooks.
    #[must_use]
    pub fn notebooks(&self) -> Vec<Notebook> {
        self.read_key(NOTEBOOKS_KEY)
    }

    /// Replace the entire stored notebook collection.
    pub fn write_notebooks(&self, notebooks: &[Notebook]) {
        self.write_key(NOTEBOOKS_KEY, notebooks);
    }

    /// Create a named guest notebook.
    pub fn create_notebook(&self, name: impl Into<String>) -> Notebook {
        let notebook = Notebook::new(name);
        let mut notebooks = self.notebooks();
        notebooks.push(notebook.clone());
        self.write_notebooks(&notebooks);
        notebook
    }

    /// Rename a notebook. Unknown identifiers are a no-op.
    pub fn rename_notebook(&self, id: &NotebookId, name: impl Into<String>) -> Option<Notebook> {
        let mut notebooks = self.notebooks();
        let notebook = notebooks.iter_mut().find(|notebook| notebook.id == *id)?;
        notebook.name = name.into();
        notebook.updated_at = Utc::now();
        let renamed = notebook.clone();
        self.write_notebooks(&notebooks);
        Some(renamed)
    }

    /// Delete a notebook and clear the assignment on every note that
    /// pointed to it. Notes themselves are never deleted here.
    pub fn delete_notebook(&self, id: &NotebookId) {
        let notebooks: Vec<Notebook> = self
            .notebooks()
            .into_iter()
            .filter(|notebook| notebook.id != *id)
            .collect();
        self.write_notebooks(&notebooks);

        let mut notes = self.notes();
        let mut changed = false;
        for note in &mut notes {
            if note.notebook_id == Some(*id) {
                note.notebook_id = None;
                note.updated_at = Utc::now();
                changed = true;
            }
        }
        if changed {
            self.write_notes(&notes);
        }
    }

    // ── Key-value substrate ─────────────────────────────────────

    fn key_path(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(format!("{key}.json")))
    }

    fn read_key<T: serde::de::DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(path) = self.key_path(key) else {
            return Vec::new();
        };
        let Ok(raw) = fs::read_to_string(&path) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    fn write_key<T: serde::Serialize>(&self, key: &str, values: &[T]) {
        let Some(path) = self.key_path(key) else {
            return;
        };
        match serde_json::to_string(values) {
            Ok(raw) => {
                if let Err(error) = fs::write(&path, raw) {
                    tracing::warn!("Failed to write guest key {key}: {error}");
                }
            }
            Err(error) => tracing::warn!("Failed to serialize guest key {key}: {error}"),
        }
    }

    fn remove_key(&self, key: &str) {
        if let Some(path) = self.key_path(key) {
            if let Err(error) = fs::remove_file(&path) {
                if error.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to clear guest key {key}: {error}");
                }
            }
        }
    }
}

#[async_trait]
impl NoteBackend for GuestStore {
    async fn create(&self, snapshot: &Snapshot) -> Result<Note> {
        Ok(self.create_note(snapshot.clone()))
    }

    async fn update(&self, id: &NoteId, snapshot: &Snapshot) -> Result<Note> {
        let patch = NotePatch::from(snapshot.clone());
        // A vanished id is a silent success, matching local-storage
        // semantics: nothing is written and editing continues.
        Ok(self
            .update_note(id, &patch)
            .unwrap_or_else(|| Note::with_id(*id, snapshot.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, GuestStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = GuestStore::open(dir.path());
        (dir, store)
    }

    fn snapshot(title: &str, content: &str) -> Snapshot {
        Snapshot {
            title: title.to_string(),
            content: content.to_string(),
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_create_and_read() {
        let (_dir, store) = store();
        let note = store.create_note(snapshot("First", "body"));

        let notes = store.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, note.id);
        assert_eq!(notes[0].title, "First");
    }

    #[test]
    fn test_create_prepends() {
        let (_dir, store) = store();
        store.create_note(snapshot("older", ""));
        let newer = store.create_note(snapshot("newer", ""));
        assert_eq!(store.notes()[0].id, newer.id);
    }

    #[test]
    fn test_update_merges_and_touches_timestamp() {
        let (_dir, store) = store();
        let note = store.create_note(snapshot("t", "c"));

        let patch = NotePatch {
            is_pinned: Some(true),
            ..NotePatch::default()
        };
        let updated = store.update_note(&note.id, &patch).unwrap();

        assert!(updated.is_pinned);
        assert_eq!(updated.title, "t");
        assert!(updated.updated_at >= note.updated_at);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (_dir, store) = store();
        store.create_note(snapshot("kept", ""));

        let result = store.update_note(
            &NoteId::new(),
            &NotePatch {
                title: Some("ghost".to_string()),
                ..NotePatch::default()
            },
        );

        assert!(result.is_none());
        assert_eq!(store.notes()[0].title, "kept");
    }

    #[test]
    fn test_delete_note() {
        let (_dir, store) = store();
        let note = store.create_note(snapshot("bye", ""));
        store.delete_note(&note.id);
        assert!(store.notes().is_empty());
    }

    #[test]
    fn test_clear_notes() {
        let (_dir, store) = store();
        store.create_note(snapshot("a", ""));
        store.create_note(snapshot("b", ""));
        store.clear_notes();
        assert!(store.notes().is_empty());
        // Clearing an already-empty store must stay silent.
        store.clear_notes();
    }

    #[test]
    fn test_legacy_records_are_backfilled() {
        let (dir, store) = store();
        let raw = format!(
            "[{{\"id\":\"{}\",\"title\":\"old\",\"content\":\"\",\
             \"createdAt\":\"2024-01-01T00:00:00Z\",\"updatedAt\":\"2024-01-01T00:00:00Z\"}}]",
            NoteId::new()
        );
        fs::write(dir.path().join("guest_notes.json"), raw).unwrap();

        let notes = store.notes();
        assert_eq!(notes.len(), 1);
        assert!(!notes[0].is_pinned);
        assert!(notes[0].notebook_id.is_none());
        assert!(notes[0].tags.is_empty());
    }

    #[test]
    fn test_corrupt_key_reads_as_empty() {
        let (dir, store) = store();
        fs::write(dir.path().join("guest_notes.json"), "not json").unwrap();
        assert!(store.notes().is_empty());
    }

    #[test]
    fn test_disabled_store_is_silent() {
        let store = GuestStore::disabled();
        assert!(!store.is_available());

        let note = store.create_note(snapshot("lost", ""));
        assert_eq!(note.title, "lost");
        assert!(store.notes().is_empty());
        store.delete_note(&note.id);
        store.clear_notes();
    }

    #[test]
    fn test_notebook_crud() {
        let (_dir, store) = store();
        let notebook = store.create_notebook("Recipes");
        assert_eq!(store.notebooks().len(), 1);

        let renamed = store.rename_notebook(&notebook.id, "Cooking").unwrap();
        assert_eq!(renamed.name, "Cooking");
        assert_eq!(store.notebooks()[0].name, "Cooking");

        store.delete_notebook(&notebook.id);
        assert!(store.notebooks().is_empty());
    }

    #[test]
    fn test_delete_notebook_clears_note_references() {
        let (_dir, store) = store();
        let notebook = store.create_notebook("Work");
        let mut snap = snapshot("assigned", "");
        snap.notebook_id = Some(notebook.id);
        let assigned = store.create_note(snap);
        let unassigned = store.create_note(snapshot("loose", ""));

        store.delete_notebook(&notebook.id);

        let notes = store.notes();
        let assigned_after = notes.iter().find(|n| n.id == assigned.id).unwrap();
        assert!(assigned_after.notebook_id.is_none());
        // The note itself survives.
        assert!(notes.iter().any(|n| n.id == unassigned.id));
        assert_eq!(notes.len(), 2);
    }

    #[tokio::test]
    async fn test_backend_update_of_missing_id_succeeds() {
        let (_dir, store) = store();
        let id = NoteId::new();
        let result = NoteBackend::update(&store, &id, &snapshot("ghost", "c"))
            .await
            .unwrap();
        assert_eq!(result.id, id);
        assert_eq!(result.title, "ghost");
        assert!(store.notes().is_empty());
    }

    #[tokio::test]
    async fn test_backend_create_then_update() {
        let (_dir, store) = store();
        let created = NoteBackend::create(&store, &snapshot("t", "c")).await.unwrap();
        let updated = NoteBackend::update(&store, &created.id, &snapshot("t2", "c2"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(store.notes()[0].title, "t2");
    }
}
