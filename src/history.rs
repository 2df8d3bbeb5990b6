use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use monitor_domain::{HealthStatus, NodeRecord};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum HistoryError {
    #[error("Failed to write history file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize history snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A record as persisted, with its derived health label alongside.
#[derive(Serialize)]
struct HistoryEntry<'a> {
    #[serde(flatten)]
    record: &'a NodeRecord,
    health: HealthStatus,
}

/// Writes one JSON snapshot per cycle to `<dir>/nodes_<YYYYmmdd_HHMMSS>.json`.
pub(crate) struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn snapshot_path(&self, taken_at: DateTime<Utc>) -> PathBuf {
        self.dir
            .join(format!("nodes_{}.json", taken_at.format("%Y%m%d_%H%M%S")))
    }

    pub(crate) async fn save(
        &self,
        records: &[NodeRecord],
        taken_at: DateTime<Utc>,
    ) -> Result<PathBuf, HistoryError> {
        let entries: Vec<HistoryEntry<'_>> = records
            .iter()
            .map(|record| HistoryEntry {
                record,
                health: record.health(),
            })
            .collect();
        let body = serde_json::to_vec_pretty(&entries)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| HistoryError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.snapshot_path(taken_at);
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| HistoryError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}
