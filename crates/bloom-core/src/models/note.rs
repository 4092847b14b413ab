//! Note model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::notebook::NotebookId;
use super::snapshot::Snapshot;

/// A unique identifier for a note, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A note in the system.
///
/// The identifier is issued once, on the first successful persist; an
/// unpersisted draft exists only as editor state and never as a `Note`.
/// The three `serde(default)` fields backfill records written before
/// pinning, notebooks, and tags existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, immutable once assigned
    pub id: NoteId,
    /// Title line
    pub title: String,
    /// Rich text serialized as a markup string
    pub content: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp, non-decreasing across saves
    pub updated_at: DateTime<Utc>,
    /// Pinned to the top of list views
    #[serde(default)]
    pub is_pinned: bool,
    /// Optional notebook assignment; `None` means uncategorized
    #[serde(default)]
    pub notebook_id: Option<NotebookId>,
    /// Tags in insertion order, no duplicates
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    /// Create a new note from a draft snapshot, issuing a fresh identifier
    /// and current timestamps.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::with_id(NoteId::new(), snapshot)
    }

    /// Build a note view with a known identifier and current timestamps.
    #[must_use]
    pub fn with_id(id: NoteId, snapshot: Snapshot) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: snapshot.title,
            content: snapshot.content,
            created_at: now,
            updated_at: now,
            is_pinned: snapshot.is_pinned,
            notebook_id: snapshot.notebook_id,
            tags: snapshot.tags,
        }
    }

    /// Project the comparable subset of fields used for save decisions.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            title: self.title.clone(),
            content: self.content.clone(),
            is_pinned: self.is_pinned,
            notebook_id: self.notebook_id,
            tags: self.tags.clone(),
        }
    }
}
