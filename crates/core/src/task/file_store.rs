//! File-based task storage implementation
//!
//! Stores the task collection as JSON in a single file on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::model::Task;
use super::storage::TaskStorage;
use crate::{Error, Result};

/// File-based task storage using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
}

impl FileTaskStore {
    /// Create a store backed by the given file.
    ///
    /// The file does not need to exist; it is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStorage for FileTaskStore {
    fn load(&self) -> Vec<Task> {
        if !self.path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Failed to read task file {}, starting with an empty list: {}",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(
                    "Task file {} is corrupt, starting with an empty list: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let content = serde_json::to_string_pretty(tasks)
            .map_err(|e| Error::Persistence(format!("Failed to serialize tasks: {}", e)))?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::Persistence(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        // Write to a sibling temp file and rename it into place, so a
        // concurrent reader never observes a half-written file.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, content)
            .map_err(|e| Error::Persistence(format!("Failed to write task file: {}", e)))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| Error::Persistence(format!("Failed to replace task file: {}", e)))?;

        debug!("Saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }
}
