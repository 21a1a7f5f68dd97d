use anyhow::Result;
use tracing::info;

use crate::storage::{log_store::LogStore, slot::StorageSlot};

/// Removes every saved log. Nothing happens unless `confirmed` is set.
pub async fn process_clear_command(
    store: &LogStore<impl StorageSlot>,
    confirmed: bool,
) -> Result<String> {
    if !confirmed {
        return Ok("This removes every saved log. Run again with --yes to confirm.\n".into());
    }

    let count = store.load_all().await?.len();
    store.clear().await?;
    info!("Removed {count} logs");
    Ok(format!("Removed {count} logs.\n"))
}
