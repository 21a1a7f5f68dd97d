use anyhow::Result;

/// Every command runs to completion on one thread, nothing is spawned in the background.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
