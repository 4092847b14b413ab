//! Autosave reconciliation engine.
//!
//! One engine is spawned per note-editing session. It owns the debounce
//! timer, the last-saved snapshot, and the save-status state machine, and it
//! decides whether, when, and where an in-progress edit is persisted. The
//! backend (guest store or remote service) is chosen once at session start.
//!
//! Status transitions: `idle -> saving -> saved -> idle` (timed), with
//! `error` reachable from `saving` on failure. A blank snapshot or one equal
//! to the last-saved baseline is never persisted. The engine runs as a
//! single actor task, so persists are serialized by construction; dropping
//! the handle stops the actor and cancels any pending timer.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};

use crate::models::{Note, NoteId, Snapshot};
use crate::store::NoteBackend;

/// Quiet period after the last draft change before a save is attempted.
pub const DEBOUNCE: Duration = Duration::from_millis(1500);

/// How long the `saved` status is displayed before reverting to `idle`.
pub const SAVED_DISPLAY: Duration = Duration::from_millis(2000);

/// Save status surfaced to the editor UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveStatus {
    /// No save pending or in flight.
    Idle,
    /// A persist operation is in flight.
    Saving,
    /// The last persist succeeded; reverts to `Idle` after [`SAVED_DISPLAY`].
    Saved,
    /// The last persist failed; the draft is retained, no retry is scheduled.
    Error,
}

/// Notifications emitted by the engine alongside status updates.
#[derive(Clone, Debug)]
pub enum AutosaveEvent {
    /// First save of a draft created a note; carries the issued identifier.
    Created(Note),
    /// An existing note was saved.
    Saved(Note),
    /// A persist failed; the message is suitable for a transient toast.
    Failed(String),
}

/// The note (or unpersisted draft) an engine session is editing.
#[derive(Clone, Debug, Default)]
pub struct EditSession {
    /// Identifier of the note being edited, absent for a fresh draft.
    pub note_id: Option<NoteId>,
    /// The persisted state the first equality check compares against.
    pub baseline: Snapshot,
}

impl EditSession {
    /// Session for a brand-new, unpersisted draft.
    #[must_use]
    pub fn new_draft() -> Self {
        Self::default()
    }

    /// Session for editing an already persisted note.
    #[must_use]
    pub fn existing(note: &Note) -> Self {
        Self {
            note_id: Some(note.id),
            baseline: note.snapshot(),
        }
    }
}

enum Command {
    DraftChanged(Snapshot),
    SaveNow,
    OpenNote {
        note_id: Option<NoteId>,
        baseline: Snapshot,
    },
}

/// Caller-side handle to a spawned autosave engine.
///
/// Dropping the handle shuts the engine down, cancelling any pending
/// debounce timer.
pub struct AutosaveHandle {
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<SaveStatus>,
    events: Option<mpsc::UnboundedReceiver<AutosaveEvent>>,
}

impl AutosaveHandle {
    /// Spawn an engine for one editing session against a fixed backend.
    pub fn spawn<B: NoteBackend + 'static>(backend: B, session: EditSession) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(SaveStatus::Idle);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let engine = Engine {
            backend: Box::new(backend),
            note_id: session.note_id,
            last_saved: session.baseline.clone(),
            draft: session.baseline,
            debounce_deadline: None,
            saved_reset_deadline: None,
            commands: command_rx,
            status: status_tx,
            events: event_tx,
        };
        tokio::spawn(engine.run());

        Self {
            commands: command_tx,
            status: status_rx,
            events: Some(event_rx),
        }
    }

    /// Report a change to any tracked draft field, (re)starting the
    /// debounce timer. This is the sole passive entry point for autosave.
    pub fn draft_changed(&self, snapshot: Snapshot) {
        let _ = self.commands.send(Command::DraftChanged(snapshot));
    }

    /// Cancel the pending debounce timer and attempt an immediate persist.
    ///
    /// Used for semantically instantaneous interactions such as toggling
    /// the pin or reassigning the notebook, where debouncing would lag.
    pub fn save_now(&self) {
        let _ = self.commands.send(Command::SaveNow);
    }

    /// Switch the session to a different note (or a fresh draft).
    ///
    /// This is a cancellation boundary: the previous note's pending timer
    /// is dropped, the baseline resets to the given persisted state, and
    /// status returns to idle.
    pub fn open_note(&self, note_id: Option<NoteId>, baseline: Snapshot) {
        let _ = self.commands.send(Command::OpenNote { note_id, baseline });
    }

    /// Current save status.
    #[must_use]
    pub fn status(&self) -> SaveStatus {
        *self.status.borrow()
    }

    /// Subscribe to status changes.
    #[must_use]
    pub fn subscribe_status(&self) -> watch::Receiver<SaveStatus> {
        self.status.clone()
    }

    /// Take the event stream. Yields `None` on repeat calls.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<AutosaveEvent>> {
        self.events.take()
    }
}

struct Engine {
    backend: Box<dyn NoteBackend>,
    note_id: Option<NoteId>,
    last_saved: Snapshot,
    draft: Snapshot,
    debounce_deadline: Option<Instant>,
    saved_reset_deadline: Option<Instant>,
    commands: mpsc::UnboundedReceiver<Command>,
    status: watch::Sender<SaveStatus>,
    events: mpsc::UnboundedSender<AutosaveEvent>,
}

impl Engine {
    async fn run(mut self) {
        loop {
            tokio::select! {
                maybe_command = self.commands.recv() => match maybe_command {
                    Some(command) => self.handle_command(command).await,
                    // Handle dropped: editor closed, cancel everything.
                    None => break,
                },
                () = sleep_until(self.debounce_deadline.unwrap_or_else(Instant::now)),
                    if self.debounce_deadline.is_some() =>
                {
                    self.debounce_deadline = None;
                    self.try_save().await;
                }
                () = sleep_until(self.saved_reset_deadline.unwrap_or_else(Instant::now)),
                    if self.saved_reset_deadline.is_some() =>
                {
                    self.saved_reset_deadline = None;
                    self.set_status(SaveStatus::Idle);
                }
            }
        }
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::DraftChanged(snapshot) => {
                self.draft = snapshot;
                if *self.status.borrow() == SaveStatus::Error {
                    self.set_status(SaveStatus::Idle);
                }
                self.debounce_deadline = Some(Instant::now() + DEBOUNCE);
            }
            Command::SaveNow => {
                self.debounce_deadline = None;
                self.try_save().await;
            }
            Command::OpenNote { note_id, baseline } => {
                self.debounce_deadline = None;
                self.saved_reset_deadline = None;
                self.note_id = note_id;
                self.draft = baseline.clone();
                self.last_saved = baseline;
                self.set_status(SaveStatus::Idle);
            }
        }
    }

    async fn try_save(&mut self) {
        let snapshot = self.draft.clone();

        if snapshot.is_blank() {
            tracing::debug!("Skipping autosave: draft is blank");
            return;
        }
        if snapshot == self.last_saved {
            tracing::debug!("Skipping autosave: draft matches last-saved snapshot");
            return;
        }

        self.saved_reset_deadline = None;
        self.set_status(SaveStatus::Saving);

        let result = match self.note_id {
            Some(id) => self.backend.update(&id, &snapshot).await.map(|note| (note, false)),
            None => self.backend.create(&snapshot).await.map(|note| (note, true)),
        };

        match result {
            Ok((note, created)) => {
                if created {
                    tracing::debug!("Autosave created note {}", note.id);
                    self.note_id = Some(note.id);
                    self.emit(AutosaveEvent::Created(note));
                } else {
                    tracing::debug!("Autosaved note {}", note.id);
                    self.emit(AutosaveEvent::Saved(note));
                }
                // The baseline advances only after a confirmed success.
                self.last_saved = snapshot;
                self.set_status(SaveStatus::Saved);
                self.saved_reset_deadline = Some(Instant::now() + SAVED_DISPLAY);
            }
            Err(error) => {
                tracing::warn!("Autosave failed: {error}");
                self.set_status(SaveStatus::Error);
                self.emit(AutosaveEvent::Failed(error.to_string()));
            }
        }
    }

    fn set_status(&self, status: SaveStatus) {
        self.status.send_replace(status);
    }

    fn emit(&self, event: AutosaveEvent) {
        let _ = self.events.send(event);
    }
}
