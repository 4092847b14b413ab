//! Guest-to-account note migration.
//!
//! One-shot transfer of guest notes into the authenticated backend right
//! after registration. The bulk create is treated as atomic from this
//! routine's perspective: the guest store is cleared only on confirmed
//! success, so a failed attempt loses nothing and can simply be retried.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Note;
use crate::store::GuestStore;

/// Upper bound on notes submitted in a single migration request.
pub const MIGRATION_CAP: usize = 100;

/// The bulk-create seam the migration routine submits notes through.
#[async_trait]
pub trait MigrationTarget: Send + Sync {
    /// Create all supplied notes for the current session, returning the
    /// created records.
    async fn bulk_create(&self, notes: &[Note]) -> Result<Vec<Note>>;
}

/// Migrate guest notes into the given target.
///
/// Returns the number of notes submitted. No guest notes is a no-op
/// (`Ok(0)`, no request). Submissions are capped at [`MIGRATION_CAP`];
/// the guest-issued identifiers travel with the payload so the service
/// side can be made idempotent. Notebooks are not migrated.
pub async fn migrate_guest_notes<T: MigrationTarget>(
    guest: &GuestStore,
    target: &T,
) -> Result<usize> {
    let notes = guest.notes();
    if notes.is_empty() {
        return Ok(0);
    }

    let batch = &notes[..notes.len().min(MIGRATION_CAP)];
    tracing::debug!("Migrating {} guest note(s)", batch.len());

    match target.bulk_create(batch).await {
        Ok(created) => {
            guest.clear_notes();
            tracing::info!("Migrated {} guest note(s) to account", created.len());
            Ok(batch.len())
        }
        Err(error) => {
            // Guest notes stay untouched so a later retry loses nothing.
            tracing::warn!("Guest note migration failed: {error}");
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::Error;
    use crate::models::Snapshot;

    #[derive(Default)]
    struct RecordingTarget {
        submissions: Mutex<Vec<Vec<Note>>>,
        fail: bool,
    }

    #[async_trait]
    impl MigrationTarget for RecordingTarget {
        async fn bulk_create(&self, notes: &[Note]) -> Result<Vec<Note>> {
            self.submissions.lock().unwrap().push(notes.to_vec());
            if self.fail {
                Err(Error::Api("HTTP 502".to_string()))
            } else {
                Ok(notes.to_vec())
            }
        }
    }

    fn seeded_store(count: usize) -> (tempfile::TempDir, GuestStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = GuestStore::open(dir.path());
        for index in 0..count {
            store.create_note(Snapshot {
                title: format!("note {index}"),
                ..Snapshot::default()
            });
        }
        (dir, store)
    }

    #[tokio::test]
    async fn empty_store_is_a_noop() {
        let (_dir, store) = seeded_store(0);
        let target = RecordingTarget::default();

        let migrated = migrate_guest_notes(&store, &target).await.unwrap();

        assert_eq!(migrated, 0);
        assert!(target.submissions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn success_clears_the_guest_store() {
        let (_dir, store) = seeded_store(5);
        let target = RecordingTarget::default();

        let migrated = migrate_guest_notes(&store, &target).await.unwrap();

        assert_eq!(migrated, 5);
        assert_eq!(target.submissions.lock().unwrap().len(), 1);
        assert!(store.notes().is_empty());
    }

    #[tokio::test]
    async fn failure_leaves_guest_notes_intact() {
        let (_dir, store) = seeded_store(5);
        let target = RecordingTarget {
            fail: true,
            ..RecordingTarget::default()
        };

        let result = migrate_guest_notes(&store, &target).await;

        assert!(result.is_err());
        assert_eq!(store.notes().len(), 5);
    }

    #[tokio::test]
    async fn submission_is_capped_at_one_hundred() {
        let (_dir, store) = seeded_store(150);
        let target = RecordingTarget::default();

        let migrated = migrate_guest_notes(&store, &target).await.unwrap();

        assert_eq!(migrated, MIGRATION_CAP);
        let submissions = target.submissions.lock().unwrap();
        assert_eq!(submissions[0].len(), MIGRATION_CAP);
    }

    #[tokio::test]
    async fn payload_carries_guest_identifiers() {
        let (_dir, store) = seeded_store(2);
        let guest_ids: Vec<_> = store.notes().iter().map(|note| note.id).collect();
        let target = RecordingTarget::default();

        migrate_guest_notes(&store, &target).await.unwrap();

        let submissions = target.submissions.lock().unwrap();
        let submitted_ids: Vec<_> = submissions[0].iter().map(|note| note.id).collect();
        assert_eq!(submitted_ids, guest_ids);
    }
}
