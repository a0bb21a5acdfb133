//! Task repository trait
//!
//! Defines the persistence adapter the task store reads from and writes to.

use async_trait::async_trait;

use super::model::Task;
use crate::Result;

/// Whole-collection persistence for tasks.
///
/// Implementations load and save the complete ordered collection; there is
/// no partial or incremental write.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Load every stored task in stored order
    async fn load_all(&self) -> Result<Vec<Task>>;

    /// Replace the stored collection with `tasks`
    async fn save_all(&self, tasks: &[Task]) -> Result<()>;

    /// Whether data survives a process restart
    fn is_persistent(&self) -> bool {
        true
    }
}
