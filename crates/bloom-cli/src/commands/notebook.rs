use std::path::Path;

use clap::Subcommand;

use crate::commands::common::{open_store, resolve_notebook};
use crate::error::CliError;

#[derive(Subcommand)]
pub enum NotebookCommand {
    /// List notebooks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a notebook
    Add {
        /// Notebook name
        name: String,
    },
    /// Rename a notebook
    Rename {
        /// Notebook id or current name
        id: String,
        /// New name
        name: String,
    },
    /// Delete a notebook; its notes become uncategorized
    Delete {
        /// Notebook id or name
        id: String,
    },
}

pub fn run_notebook(command: NotebookCommand, data_dir: &Path) -> Result<(), CliError> {
    let store = open_store(data_dir)?;

    match command {
        NotebookCommand::List { json } => {
            let notebooks = store.notebooks();
            if json {
                println!("{}", serde_json::to_string_pretty(&notebooks)?);
            } else if notebooks.is_empty() {
                println!("No notebooks yet");
            } else {
                for notebook in notebooks {
                    let note_count = store
                        .notes()
                        .iter()
                        .filter(|note| note.notebook_id == Some(notebook.id))
                        .count();
                    println!("{}  {} ({note_count})", notebook.id, notebook.name);
                }
            }
        }
        NotebookCommand::Add { name } => {
            if name.trim().is_empty() {
                return Err(CliError::EmptyNotebookName);
            }
            let notebook = store.create_notebook(name.trim());
            println!("{}", notebook.id);
        }
        NotebookCommand::Rename { id, name } => {
            if name.trim().is_empty() {
                return Err(CliError::EmptyNotebookName);
            }
            let notebook = resolve_notebook(&store, &id)?;
            store
                .rename_notebook(&notebook.id, name.trim())
                .ok_or(CliError::NotebookNotFound(id))?;
            println!("{}", notebook.id);
        }
        NotebookCommand::Delete { id } => {
            let notebook = resolve_notebook(&store, &id)?;
            store.delete_notebook(&notebook.id);
            println!("Deleted {}", notebook.id);
        }
    }

    Ok(())
}
