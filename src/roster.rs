use std::path::{Path, PathBuf};

use async_trait::async_trait;
use monitor_domain::NodeId;

/// Supplies the ordered list of node ids to monitor each cycle.
#[async_trait]
pub(crate) trait RosterSource: Send + Sync {
    /// Never fails; an unreadable source is an empty roster.
    async fn load(&self) -> Vec<NodeId>;
}

/// Roster read from a text file, one node id per line.
pub(crate) struct FileRoster {
    path: PathBuf,
}

impl FileRoster {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RosterSource for FileRoster {
    async fn load(&self) -> Vec<NodeId> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let roster = parse_roster(&contents);
                tracing::debug!(
                    path = %self.path.display(),
                    nodes = roster.len(),
                    "Loaded roster"
                );
                roster
            }
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %error,
                    "Roster file unreadable; monitoring no nodes this cycle"
                );
                Vec::new()
            }
        }
    }
}

/// Trims every line and drops blank ones. Order and duplicates are kept.
pub(crate) fn parse_roster(contents: &str) -> Vec<NodeId> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(NodeId::from)
        .collect()
}
