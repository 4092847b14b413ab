use std::path::Path;

use bloom_core::config::ClientConfig;
use bloom_core::migrate::{migrate_guest_notes, MIGRATION_CAP};
use bloom_core::store::RemoteNoteClient;

use crate::commands::common::open_store;
use crate::error::CliError;

pub async fn run_migrate(
    api_url: Option<String>,
    session: &str,
    data_dir: &Path,
) -> Result<(), CliError> {
    let store = open_store(data_dir)?;

    let base_url = match api_url {
        Some(url) => url,
        None => ClientConfig::from_env()?
            .api_base_url
            .ok_or(CliError::ApiNotConfigured)?,
    };
    let client = RemoteNoteClient::new(base_url)?.with_session_cookie(session);

    let total = store.notes().len();
    if total > MIGRATION_CAP {
        println!(
            "Note: {total} guest notes found; only the first {MIGRATION_CAP} will be migrated"
        );
    }

    let migrated = migrate_guest_notes(&store, &client).await?;
    if migrated == 0 {
        println!("No guest notes to migrate");
    } else {
        println!("Migrated {migrated} note(s); guest store cleared");
    }
    Ok(())
}
