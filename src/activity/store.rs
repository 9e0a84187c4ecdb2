use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{StateError, read_toml, write_toml};

use super::tracker::ActivityTracker;

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    history: Vec<String>,
}

/// Keeps a tracker's history in a TOML file.
///
/// Only the chronological title list is stored; counts are rebuilt on load.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved history, or an empty tracker if nothing was saved yet.
    pub fn load(&self) -> Result<ActivityTracker, StateError> {
        let file: HistoryFile = read_toml(&self.path)?.unwrap_or_default();
        debug!(
            "loaded {} plays from {}",
            file.history.len(),
            self.path.display()
        );
        Ok(ActivityTracker::from_history(file.history))
    }

    pub fn save(&self, tracker: &ActivityTracker) -> Result<(), StateError> {
        write_toml(
            &self.path,
            &HistoryFile {
                history: tracker.history().to_vec(),
            },
        )
    }
}
