//! In-memory task storage (non-persistent).

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::model::Task;
use super::repository::TaskRepository;
use crate::Result;

#[derive(Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(tasks)),
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn load_all(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.read().await.clone())
    }

    async fn save_all(&self, tasks: &[Task]) -> Result<()> {
        *self.tasks.write().await = tasks.to_vec();
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}
