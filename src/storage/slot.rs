use std::{
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Result};
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWriteExt},
};
use tracing::debug;

/// Interface for a single persistent location holding one serialized blob.
pub trait StorageSlot {
    /// Returns the stored blob or `None` if nothing was ever written.
    fn read(&self) -> impl Future<Output = Result<Option<String>>>;

    /// Replaces the whole blob.
    fn write(&self, blob: &str) -> impl Future<Output = Result<()>>;

    /// Removes the blob. Removing a missing blob is not an error.
    fn remove(&self) -> impl Future<Output = Result<()>>;
}

impl<T: Deref> StorageSlot for T
where
    T::Target: StorageSlot,
{
    fn read(&self) -> impl Future<Output = Result<Option<String>>> {
        self.deref().read()
    }

    fn write(&self, blob: &str) -> impl Future<Output = Result<()>> {
        self.deref().write(blob)
    }

    fn remove(&self) -> impl Future<Output = Result<()>> {
        self.deref().remove()
    }
}

/// Slot backed by a json file inside the application directory.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(dir: &Path, key: &str) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(dir)?;

        Ok(Self {
            path: dir.join(format!("{key}.json")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_with_file(file: &mut File, blob: &str) -> Result<()> {
        // Truncate only after the lock is held, otherwise a reader could see an empty file.
        file.set_len(0).await?;
        file.write_all(blob.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

impl StorageSlot for FileSlot {
    async fn read(&self) -> Result<Option<String>> {
        async fn extract(path: &Path) -> std::result::Result<String, std::io::Error> {
            debug!("Reading slot {path:?}");
            let mut file = File::open(path).await?;
            file.lock_shared()?;
            let mut blob = String::new();
            let result = file.read_to_string(&mut blob).await;
            file.unlock_async().await?;
            result?;
            Ok(blob)
        }

        match extract(&self.path).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)?,
        }
    }

    async fn write(&self, blob: &str) -> Result<()> {
        debug!("Writing {} bytes into slot {:?}", blob.len(), self.path);
        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .await?;

        file.lock_exclusive()?;
        let result = Self::write_with_file(&mut file, blob).await;
        file.unlock_async().await?;
        result
    }

    async fn remove(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)?,
        }
    }
}

/// Slot kept in memory. Used for testing and for embedding the store without a filesystem.
#[derive(Default)]
pub struct MemorySlot {
    blob: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    pub fn blob(&self) -> Result<Option<String>> {
        Ok(self
            .blob
            .lock()
            .map_err(|_| anyhow!("Memory slot lock is poisoned"))?
            .clone())
    }

    fn replace(&self, value: Option<String>) -> Result<()> {
        *self
            .blob
            .lock()
            .map_err(|_| anyhow!("Memory slot lock is poisoned"))? = value;
        Ok(())
    }
}

impl StorageSlot for MemorySlot {
    async fn read(&self) -> Result<Option<String>> {
        self.blob()
    }

    async fn write(&self, blob: &str) -> Result<()> {
        self.replace(Some(blob.to_owned()))
    }

    async fn remove(&self) -> Result<()> {
        self.replace(None)
    }
}

#[cfg(test)]
mod tests {
    use std::{rc::Rc, sync::Arc};

    use anyhow::Result;
    use tempfile::tempdir;

    use super::{FileSlot, MemorySlot, StorageSlot};

    #[tokio::test]
    async fn file_slot_missing_file_reads_as_none() -> Result<()> {
        let dir = tempdir()?;
        let slot = FileSlot::new(dir.path(), "logs")?;

        assert_eq!(slot.read().await?, None);
        assert!(!slot.path().exists());
        Ok(())
    }

    #[tokio::test]
    async fn file_slot_overwrites_whole_blob() -> Result<()> {
        let dir = tempdir()?;
        let slot = FileSlot::new(&dir.path().join("nested"), "logs")?;

        slot.write("a much longer first blob").await?;
        slot.write("short").await?;

        assert_eq!(slot.read().await?.as_deref(), Some("short"));
        assert_eq!(std::fs::read_to_string(slot.path())?, "short");
        Ok(())
    }

    #[tokio::test]
    async fn file_slot_remove_is_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let slot = FileSlot::new(dir.path(), "logs")?;

        slot.write("{}").await?;
        slot.remove().await?;
        slot.remove().await?;

        assert_eq!(slot.read().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn memory_slot_through_pointers() -> Result<()> {
        let slot = Arc::new(MemorySlot::new());
        let shared = Rc::new(slot.clone());

        shared.write("blob").await?;
        assert_eq!(slot.read().await?.as_deref(), Some("blob"));

        slot.remove().await?;
        assert_eq!(shared.read().await?, None);
        Ok(())
    }
}
