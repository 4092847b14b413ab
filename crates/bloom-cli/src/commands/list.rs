use std::path::Path;

use bloom_core::Note;

use crate::commands::common::{
    format_note_lines, note_to_list_item, open_store, resolve_notebook, sort_notes, NoteListItem,
};
use crate::error::CliError;

pub struct ListFilter {
    pub limit: usize,
    pub notebook: Option<String>,
    pub tag: Option<String>,
    pub pinned_only: bool,
}

pub fn run_list(filter: &ListFilter, as_json: bool, data_dir: &Path) -> Result<(), CliError> {
    let store = open_store(data_dir)?;
    let notebooks = store.notebooks();

    let notebook_id = match &filter.notebook {
        Some(query) => Some(resolve_notebook(&store, query)?.id),
        None => None,
    };

    let mut notes: Vec<Note> = store
        .notes()
        .into_iter()
        .filter(|note| notebook_id.is_none() || note.notebook_id == notebook_id)
        .filter(|note| {
            filter
                .tag
                .as_ref()
                .map_or(true, |tag| note.tags.iter().any(|t| t == tag))
        })
        .filter(|note| !filter.pinned_only || note.is_pinned)
        .collect();
    sort_notes(&mut notes);
    notes.truncate(filter.limit);

    if as_json {
        let items = notes
            .iter()
            .map(|note| note_to_list_item(note, &notebooks))
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if notes.is_empty() {
        println!("No notes yet");
    } else {
        for line in format_note_lines(&notes, &notebooks) {
            println!("{line}");
        }
    }

    Ok(())
}
