//! Data models for bloom

mod note;
mod notebook;
mod snapshot;

pub use note::{Note, NoteId};
pub use notebook::{Notebook, NotebookId};
pub use snapshot::{NotePatch, Snapshot};
