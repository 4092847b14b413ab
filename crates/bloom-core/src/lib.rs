//! bloom-core - Core library for bloom
//!
//! This crate contains the shared models, the autosave reconciliation engine,
//! and the persistence backends (local guest store and remote note service)
//! used by all bloom interfaces.

pub mod autosave;
pub mod config;
pub mod error;
pub mod migrate;
pub mod models;
pub mod store;

pub use error::{Error, Result};
pub use models::{Note, NoteId, Notebook, NotebookId, Snapshot};
