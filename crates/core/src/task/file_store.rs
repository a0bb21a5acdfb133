//! File-based task storage implementation
//!
//! Stores tasks as a pretty-printed JSON array in a file on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::model::Task;
use super::repository::TaskRepository;
use crate::Result;

/// File-based task store using JSON
///
/// Holds no cache: every load reads the whole file and every save rewrites it.
#[derive(Debug, Clone)]
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn load_all(&self) -> Result<Vec<Task>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        Ok(tasks)
    }

    async fn save_all(&self, tasks: &[Task]) -> Result<()> {
        let content = serde_json::to_string_pretty(tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(&self.path, content).await?;
        tracing::debug!("Persisted {} tasks to {:?}", tasks.len(), self.path);
        Ok(())
    }
}
