use std::path::Path;

use bloom_core::models::NotePatch;
use clap::Args;

use crate::commands::common::{normalize_tags, open_store, resolve_note, resolve_notebook};
use crate::error::CliError;

#[derive(Args)]
pub struct EditArgs {
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New content
    #[arg(long)]
    pub content: Option<String>,
    /// Pin the note
    #[arg(long, conflicts_with = "unpin")]
    pub pin: bool,
    /// Unpin the note
    #[arg(long)]
    pub unpin: bool,
    /// Move to a notebook by id or name
    #[arg(long, conflicts_with = "clear_notebook")]
    pub notebook: Option<String>,
    /// Remove the notebook assignment
    #[arg(long)]
    pub clear_notebook: bool,
    /// Replace the tag list (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && !self.pin
            && !self.unpin
            && self.notebook.is_none()
            && !self.clear_notebook
            && self.tags.is_empty()
    }
}

pub fn run_edit(id: &str, args: &EditArgs, data_dir: &Path) -> Result<(), CliError> {
    if args.is_empty() {
        return Err(CliError::EmptyEdit);
    }

    let store = open_store(data_dir)?;
    let note = resolve_note(&store, id)?;

    let notebook_id = if args.clear_notebook {
        Some(None)
    } else {
        match &args.notebook {
            Some(query) => Some(Some(resolve_notebook(&store, query)?.id)),
            None => None,
        }
    };

    let is_pinned = if args.pin {
        Some(true)
    } else if args.unpin {
        Some(false)
    } else {
        None
    };

    let patch = NotePatch {
        title: args.title.clone(),
        content: args.content.clone(),
        is_pinned,
        notebook_id,
        tags: if args.tags.is_empty() {
            None
        } else {
            Some(normalize_tags(args.tags.clone()))
        },
    };

    store
        .update_note(&note.id, &patch)
        .ok_or_else(|| CliError::NoteNotFound(id.to_string()))?;

    println!("{}", note.id);
    Ok(())
}
