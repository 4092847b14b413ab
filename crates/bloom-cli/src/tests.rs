use bloom_core::models::NotePatch;
use bloom_core::store::GuestStore;
use bloom_core::Snapshot;

use crate::commands::common::{
    format_note_lines, format_relative_time, normalize_tags, note_preview, note_to_list_item,
    resolve_note, resolve_notebook, sort_notes,
};
use crate::error::CliError;

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
fn format_relative_time_buckets() {
    let now = 1_000_000_000_000;
    assert_eq!(format_relative_time(now - 30_000, now), "just now");
    assert_eq!(format_relative_time(now - 5 * 60_000, now), "5m ago");
    assert_eq!(format_relative_time(now - 3 * 3_600_000, now), "3h ago");
    assert_eq!(format_relative_time(now - 2 * 86_400_000, now), "2d ago");
    assert_eq!(format_relative_time(now - 21 * 86_400_000, now), "3w ago");
}

#[test]
fn note_preview_prefers_title_and_truncates() {
    let mut note = bloom_core::Note::from_snapshot(snapshot(
        "A   title  with   gaps",
        "ignored body",
    ));
    assert_eq!(note_preview(&note, 40), "A title with gaps");

    note.title = String::new();
    note.content = "first line of body\nsecond line".to_string();
    assert_eq!(note_preview(&note, 40), "first line of body");

    note.content = "x".repeat(50);
    assert_eq!(note_preview(&note, 10).chars().count(), 10);
    assert!(note_preview(&note, 10).ends_with("..."));
}

#[test]
fn normalize_tags_dedupes_preserving_order() {
    let tags = normalize_tags(vec![
        "work".to_string(),
        "  ".to_string(),
        "home".to_string(),
        "work".to_string(),
    ]);
    assert_eq!(tags, vec!["work", "home"]);
}

#[test]
fn sort_notes_puts_pinned_first_then_newest() {
    let (_dir, store) = store();
    let older = store.create_note(snapshot("older", ""));
    let newer = store.create_note(snapshot("newer", ""));
    let pinned = store.create_note(snapshot("pinned", ""));
    store.update_note(
        &pinned.id,
        &NotePatch {
            is_pinned: Some(true),
            ..NotePatch::default()
        },
    );

    let mut notes = store.notes();
    sort_notes(&mut notes);

    assert_eq!(notes[0].id, pinned.id);
    assert_eq!(notes[1].id, newer.id);
    assert_eq!(notes[2].id, older.id);
}

#[test]
fn resolve_note_accepts_full_id_and_prefix() {
    let (_dir, store) = store();
    let note = store.create_note(snapshot("target", ""));

    let by_id = resolve_note(&store, &note.id.as_str()).unwrap();
    assert_eq!(by_id.id, note.id);

    let prefix: String = note.id.as_str().chars().take(13).collect();
    let by_prefix = resolve_note(&store, &prefix).unwrap();
    assert_eq!(by_prefix.id, note.id);
}

#[test]
fn resolve_note_reports_missing_and_ambiguous() {
    let (_dir, store) = store();
    store.create_note(snapshot("a", ""));
    store.create_note(snapshot("b", ""));

    assert!(matches!(
        resolve_note(&store, "zzzz"),
        Err(CliError::NoteNotFound(_))
    ));
    // Every uuid in this store shares the empty prefix.
    assert!(matches!(
        resolve_note(&store, ""),
        Err(CliError::AmbiguousNoteId(_))
    ));
}

#[test]
fn resolve_notebook_matches_id_or_name() {
    let (_dir, store) = store();
    let notebook = store.create_notebook("Recipes");

    assert_eq!(
        resolve_notebook(&store, &notebook.id.as_str()).unwrap().id,
        notebook.id
    );
    assert_eq!(resolve_notebook(&store, "Recipes").unwrap().id, notebook.id);
    assert!(matches!(
        resolve_notebook(&store, "Missing"),
        Err(CliError::NotebookNotFound(_))
    ));
}

#[test]
fn list_rendering_marks_pins_and_tags() {
    let (_dir, store) = store();
    let mut snap = snapshot("pinned note", "");
    snap.is_pinned = true;
    snap.tags = vec!["urgent".to_string()];
    store.create_note(snap);

    let notes = store.notes();
    let lines = format_note_lines(&notes, &store.notebooks());
    assert!(lines[0].starts_with('*'));
    assert!(lines[0].contains("#urgent"));

    let item = note_to_list_item(&notes[0], &store.notebooks());
    assert!(item.is_pinned);
    assert_eq!(item.tags, vec!["urgent"]);
    assert!(item.notebook.is_none());
}

#[test]
fn list_item_names_the_notebook() {
    let (_dir, store) = store();
    let notebook = store.create_notebook("Work");
    let mut snap = snapshot("assigned", "");
    snap.notebook_id = Some(notebook.id);
    store.create_note(snap);

    let notes = store.notes();
    let item = note_to_list_item(&notes[0], &store.notebooks());
    assert_eq!(item.notebook.as_deref(), Some("Work"));
}
