//! Save snapshot and partial-update payloads.

use serde::{Deserialize, Serialize};

use super::notebook::NotebookId;

/// The comparable projection of editable note state.
///
/// Two snapshots are equal iff every field is equal. Tag equality is
/// positional (`Vec` equality), so reordering tags counts as a change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub notebook_id: Option<NotebookId>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Snapshot {
    /// A blank snapshot is never persisted: an untouched new note must not
    /// produce a created record.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}

/// Partial update for a note. Absent fields are left untouched;
/// `notebook_id: Some(None)` clears the assignment (serialized as an
/// explicit `null`, while `None` omits the key entirely).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notebook_id: Option<Option<NotebookId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl From<Snapshot> for NotePatch {
    /// A full patch carrying every tracked field of the snapshot.
    fn from(snapshot: Snapshot) -> Self {
        Self {
            title: Some(snapshot.title),
            content: Some(snapshot.content),
            is_pinned: Some(snapshot.is_pinned),
            notebook_id: Some(snapshot.notebook_id),
            tags: Some(snapshot.tags),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn snapshot(title: &str, content: &str) -> Snapshot {
        Snapshot {
            title: title.to_string(),
            content: content.to_string(),
            ..Snapshot::default()
        }
    }

    #[test]
    fn blank_when_title_and_content_are_whitespace() {
        assert!(snapshot("", "").is_blank());
        assert!(snapshot("  \n", "\t ").is_blank());
        assert!(!snapshot("a", "").is_blank());
        assert!(!snapshot("", "b").is_blank());
    }

    #[test]
    fn pinned_or_tags_do_not_rescue_a_blank_snapshot() {
        let blank = Snapshot {
            is_pinned: true,
            tags: vec!["kept".to_string()],
            ..Snapshot::default()
        };
        assert!(blank.is_blank());
    }

    #[test]
    fn tag_equality_is_order_sensitive() {
        let mut a = snapshot("t", "c");
        a.tags = vec!["a".to_string(), "b".to_string()];
        let mut b = a.clone();
        b.tags = vec!["b".to_string(), "a".to_string()];
        assert_ne!(a, b);
    }

    #[test]
    fn equality_covers_every_field() {
        let base = snapshot("t", "c");
        let mut pinned = base.clone();
        pinned.is_pinned = true;
        let mut moved = base.clone();
        moved.notebook_id = Some(NotebookId::new());
        assert_ne!(base, pinned);
        assert_ne!(base, moved);
        assert_eq!(base, base.clone());
    }

    #[test]
    fn patch_serializes_null_vs_omitted_notebook() {
        let clear = NotePatch {
            notebook_id: Some(None),
            ..NotePatch::default()
        };
        assert_eq!(serde_json::to_string(&clear).unwrap(), "{\"notebookId\":null}");

        let untouched = NotePatch::default();
        assert_eq!(serde_json::to_string(&untouched).unwrap(), "{}");
    }

    #[test]
    fn full_patch_from_snapshot_carries_all_fields() {
        let mut snap = snapshot("t", "c");
        snap.tags = vec!["x".to_string()];
        let patch = NotePatch::from(snap);
        assert_eq!(patch.title.as_deref(), Some("t"));
        assert_eq!(patch.is_pinned, Some(false));
        assert_eq!(patch.notebook_id, Some(None));
        assert_eq!(patch.tags, Some(vec!["x".to_string()]));
    }
}
