use std::path::Path;

use bloom_core::Snapshot;

use crate::commands::common::{normalize_tags, open_store, resolve_notebook};
use crate::error::CliError;

pub fn run_add(
    title: Option<String>,
    content_parts: &[String],
    tags: Vec<String>,
    notebook: Option<&str>,
    pin: bool,
    data_dir: &Path,
) -> Result<(), CliError> {
    let store = open_store(data_dir)?;

    let title = title.unwrap_or_default();
    let content = content_parts.join(" ");
    if title.trim().is_empty() && content.trim().is_empty() {
        return Err(CliError::EmptyNote);
    }

    let notebook_id = match notebook {
        Some(query) => Some(resolve_notebook(&store, query)?.id),
        None => None,
    };

    let note = store.create_note(Snapshot {
        title,
        content,
        is_pinned: pin,
        notebook_id,
        tags: normalize_tags(tags),
    });

    println!("{}", note.id);
    Ok(())
}
