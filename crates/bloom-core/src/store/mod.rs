//! Persistence backends for the autosave engine.
//!
//! Two concrete implementations exist: the device-local [`GuestStore`] for
//! unauthenticated sessions and the [`RemoteNoteClient`] for authenticated
//! ones. The engine picks one at session start and never re-evaluates the
//! choice mid-edit.

mod guest;
mod remote;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Note, NoteId, Snapshot};

pub use guest::GuestStore;
pub use remote::RemoteNoteClient;

/// The persistence seam the autosave engine saves through.
#[async_trait]
pub trait NoteBackend: Send + Sync {
    /// Persist a brand-new note, issuing its identifier.
    async fn create(&self, snapshot: &Snapshot) -> Result<Note>;

    /// Persist the full snapshot onto an existing note.
    async fn update(&self, id: &NoteId, snapshot: &Snapshot) -> Result<Note>;
}
