use std::collections::{BTreeMap, HashMap};

use anyhow::{ensure, Result};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::{entities::DailyLog, slot::StorageSlot};

/// Key of the slot that holds every saved log.
pub const STORAGE_KEY: &str = "wq_learning_logs";

/// All saved logs. The mapping itself has no order, consumers sort when they need to.
pub type LogMap = HashMap<NaiveDate, DailyLog>;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read stored logs: {0:#}")]
    Read(anyhow::Error),
    #[error("Stored logs are corrupted: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Owns the mapping between a date and its [DailyLog]. Every save rewrites the whole blob, so
/// only one writer is expected at a time.
pub struct LogStore<S> {
    slot: S,
}

impl<S: StorageSlot> LogStore<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Reads the stored mapping, reporting corruption instead of hiding it.
    pub async fn try_load_all(&self) -> Result<LogMap, LoadError> {
        let blob = self.slot.read().await.map_err(LoadError::Read)?;
        match blob {
            Some(blob) if !blob.is_empty() => Ok(serde_json::from_str(&blob)?),
            _ => Ok(LogMap::new()),
        }
    }

    /// Reads the stored mapping. Corrupted data is treated as if nothing was stored.
    pub async fn load_all(&self) -> Result<LogMap> {
        match self.try_load_all().await {
            Ok(logs) => Ok(logs),
            Err(LoadError::Corrupt(e)) => {
                warn!("Failed to parse logs, treating them as empty: {e}");
                Ok(LogMap::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the saved log or a zeroed one. The zeroed log is not saved.
    pub async fn get_for_date(&self, date: NaiveDate) -> Result<DailyLog> {
        let mut logs = self.load_all().await?;
        Ok(logs.remove(&date).unwrap_or_else(|| DailyLog::empty(date)))
    }

    /// Overwrites the log stored for `log.date`.
    ///
    /// Json has no representation for NaN or infinity, serde_json writes them as `null`, which
    /// would make the whole blob unreadable. Such logs are rejected before anything is written.
    #[instrument(skip_all, fields(date = %log.date))]
    pub async fn save(&self, log: &DailyLog) -> Result<()> {
        ensure!(
            log.brain_score.is_finite(),
            "Brain score for {} must be a finite number, got {}",
            log.date,
            log.brain_score
        );
        let mut logs = self.load_all().await?;
        logs.insert(log.date, log.clone());

        // Written in date order so the blob stays stable between saves.
        let ordered = logs.iter().collect::<BTreeMap<_, _>>();
        let blob = serde_json::to_string(&ordered)?;
        self.slot.write(&blob).await?;
        debug!("Saved log, {} logs stored", logs.len());
        Ok(())
    }

    /// Returns every saved log ordered by date.
    pub async fn get_all_sorted(&self) -> Result<Vec<DailyLog>> {
        let mut logs = self.load_all().await?.into_values().collect::<Vec<_>>();
        logs.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(logs)
    }

    /// Removes every saved log.
    pub async fn clear(&self) -> Result<()> {
        self.slot.remove().await
    }
}
