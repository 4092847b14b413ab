//! bloom CLI - guest notes from the command line
//!
//! Manages the device-local guest store (the same data a guest browser
//! session would hold) and can migrate it into an account on the remote
//! note service.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::add::run_add;
use crate::commands::common::resolve_data_dir;
use crate::commands::delete::run_delete;
use crate::commands::edit::{run_edit, EditArgs};
use crate::commands::list::{run_list, ListFilter};
use crate::commands::migrate::run_migrate;
use crate::commands::notebook::{run_notebook, NotebookCommand};
use crate::error::CliError;

mod commands;
mod error;
#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "bloom")]
#[command(about = "A cozy notes app: notebooks, tags, pins, and guest-to-account migration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional path to the guest data directory
    #[arg(long, value_name = "PATH", global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        #[arg(long)]
        title: Option<String>,
        /// Note content
        content: Vec<String>,
        /// Attach a tag (repeatable, insertion order kept)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Assign to a notebook by id or name
        #[arg(long)]
        notebook: Option<String>,
        /// Pin the note
        #[arg(long)]
        pin: bool,
    },
    /// List notes, pinned first then newest-updated
    List {
        /// Number of notes to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only notes in this notebook (id or name)
        #[arg(long)]
        notebook: Option<String>,
        /// Only notes carrying this tag
        #[arg(long)]
        tag: Option<String>,
        /// Only pinned notes
        #[arg(long)]
        pinned: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit fields of an existing note
    Edit {
        /// Note id (or unambiguous prefix)
        id: String,
        #[command(flatten)]
        args: EditArgs,
    },
    /// Delete a note
    Delete {
        /// Note id (or unambiguous prefix)
        id: String,
    },
    /// Manage notebooks
    #[command(subcommand)]
    Notebook(NotebookCommand),
    /// Migrate guest notes into an account on the remote service
    Migrate {
        /// Remote API base URL (defaults to BLOOM_API_URL)
        #[arg(long)]
        api_url: Option<String>,
        /// Session cookie of the freshly registered account
        #[arg(long)]
        session: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bloom=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir)?;

    match cli.command {
        Commands::Add {
            title,
            content,
            tags,
            notebook,
            pin,
        } => run_add(title, &content, tags, notebook.as_deref(), pin, &data_dir),
        Commands::List {
            limit,
            notebook,
            tag,
            pinned,
            json,
        } => run_list(
            &ListFilter {
                limit,
                notebook,
                tag,
                pinned_only: pinned,
            },
            json,
            &data_dir,
        ),
        Commands::Edit { id, args } => run_edit(&id, &args, &data_dir),
        Commands::Delete { id } => run_delete(&id, &data_dir),
        Commands::Notebook(command) => run_notebook(command, &data_dir),
        Commands::Migrate { api_url, session } => {
            run_migrate(api_url, &session, &data_dir).await
        }
    }
}
