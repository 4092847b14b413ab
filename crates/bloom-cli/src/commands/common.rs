use std::path::{Path, PathBuf};

use bloom_core::config::{ClientConfig, DATA_DIR_ENV};
use bloom_core::store::GuestStore;
use bloom_core::{Note, NoteId, Notebook, NotebookId};
use chrono::Utc;
use serde::Serialize;

use crate::error::CliError;

/// JSON shape for `list --json`.
#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub updated_at: String,
    pub relative_time: String,
    pub is_pinned: bool,
    pub notebook: Option<String>,
    pub tags: Vec<String>,
}

/// Pick the guest data directory: CLI flag, then `BLOOM_DATA_DIR`, then the
/// platform data dir.
pub fn resolve_data_dir(cli_override: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(dir) = cli_override {
        return Ok(dir);
    }
    let config = ClientConfig::from_env()?;
    if let Some(dir) = config.data_dir {
        return Ok(dir);
    }
    dirs::data_dir()
        .map(|dir| dir.join("bloom"))
        .ok_or_else(|| {
            tracing::warn!("No platform data directory; set {DATA_DIR_ENV}");
            CliError::StorageUnavailable
        })
}

/// Open the guest store, failing loudly: the CLI exists to manage local
/// data, so a silently disabled store would only confuse.
pub fn open_store(data_dir: &Path) -> Result<GuestStore, CliError> {
    let store = GuestStore::open(data_dir);
    if store.is_available() {
        Ok(store)
    } else {
        Err(CliError::StorageUnavailable)
    }
}

/// Pinned notes first, then newest-updated, matching the web list views.
pub fn sort_notes(notes: &mut [Note]) {
    notes.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then(b.updated_at.cmp(&a.updated_at))
    });
}

/// Resolve a note by full id or unambiguous id prefix.
pub fn resolve_note(store: &GuestStore, query: &str) -> Result<Note, CliError> {
    let notes = store.notes();

    if let Ok(id) = query.parse::<NoteId>() {
        if let Some(note) = notes.iter().find(|note| note.id == id) {
            return Ok(note.clone());
        }
        return Err(CliError::NoteNotFound(query.to_string()));
    }

    let matches: Vec<&Note> = notes
        .iter()
        .filter(|note| note.id.as_str().starts_with(query))
        .collect();

    match matches.len() {
        0 => Err(CliError::NoteNotFound(query.to_string())),
        1 => Ok(matches[0].clone()),
        _ => {
            let options = matches
                .iter()
                .take(3)
                .map(|note| note.id.as_str().chars().take(13).collect::<String>())
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

/// Resolve a notebook by id or exact name.
pub fn resolve_notebook(store: &GuestStore, query: &str) -> Result<Notebook, CliError> {
    let notebooks = store.notebooks();

    if let Ok(id) = query.parse::<NotebookId>() {
        if let Some(notebook) = notebooks.iter().find(|notebook| notebook.id == id) {
            return Ok(notebook.clone());
        }
    }
    notebooks
        .into_iter()
        .find(|notebook| notebook.name == query)
        .ok_or_else(|| CliError::NotebookNotFound(query.to_string()))
}

pub fn note_to_list_item(note: &Note, notebooks: &[Notebook]) -> NoteListItem {
    let now = Utc::now();
    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        preview: note_preview(note, 80),
        updated_at: note.updated_at.to_rfc3339(),
        relative_time: format_relative_time(
            note.updated_at.timestamp_millis(),
            now.timestamp_millis(),
        ),
        is_pinned: note.is_pinned,
        notebook: notebook_name(note, notebooks),
        tags: note.tags.clone(),
    }
}

pub fn format_note_lines(notes: &[Note], notebooks: &[Notebook]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .iter()
        .map(|note| {
            let id = note.id.as_str();
            let short_id = id.chars().take(13).collect::<String>();
            let pin = if note.is_pinned { "*" } else { " " };
            let preview = note_preview(note, 40);
            let relative_time =
                format_relative_time(note.updated_at.timestamp_millis(), now_ms);
            let mut line = format!("{pin} {short_id:<13}  {preview:<40}  {relative_time}");
            if let Some(name) = notebook_name(note, notebooks) {
                line.push_str(&format!("  [{name}]"));
            }
            if !note.tags.is_empty() {
                line.push_str("  ");
                line.push_str(&render_tags(note));
            }
            line
        })
        .collect()
}

pub fn notebook_name(note: &Note, notebooks: &[Notebook]) -> Option<String> {
    let id = note.notebook_id?;
    notebooks
        .iter()
        .find(|notebook| notebook.id == id)
        .map(|notebook| notebook.name.clone())
}

/// First line of title-or-content, whitespace collapsed, truncated.
pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let source = if note.title.trim().is_empty() {
        &note.content
    } else {
        &note.title
    };
    let first_line = source.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn render_tags(note: &Note) -> String {
    note.tags
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else {
        format!("{}w ago", diff / week)
    }
}

/// Deduplicate tags while keeping first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}
