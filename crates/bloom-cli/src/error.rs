use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] bloom_core::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note title and content cannot both be empty")]
    EmptyNote,
    #[error("Notebook name cannot be empty")]
    EmptyNotebookName,
    #[error("No fields to change; pass at least one of --title/--content/--pin/--unpin/--notebook/--clear-notebook/--tag")]
    EmptyEdit,
    #[error("Note not found for id/prefix: {0}")]
    NoteNotFound(String),
    #[error("Notebook not found: {0}")]
    NotebookNotFound(String),
    #[error("{0}")]
    AmbiguousNoteId(String),
    #[error("Guest storage is unavailable at the configured data directory")]
    StorageUnavailable,
    #[error("Remote API is not configured. Pass --api-url or set BLOOM_API_URL.")]
    ApiNotConfigured,
}
