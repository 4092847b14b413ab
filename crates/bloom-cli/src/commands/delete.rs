use std::path::Path;

use crate::commands::common::{open_store, resolve_note};
use crate::error::CliError;

pub fn run_delete(id: &str, data_dir: &Path) -> Result<(), CliError> {
    let store = open_store(data_dir)?;
    let note = resolve_note(&store, id)?;
    store.delete_note(&note.id);
    println!("Deleted {}", note.id);
    Ok(())
}
