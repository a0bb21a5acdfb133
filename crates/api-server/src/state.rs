//! Application state

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracktodo_core::task::{FileTaskStore, InMemoryTaskStore, TaskRepository, TaskStore};

use crate::config::{ServerConfig, StorageBackend};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_store: TaskStore,
    started_at: Instant,
}

impl AppState {
    /// Create a new AppState backed by the configured storage
    pub fn new(config: &ServerConfig) -> Self {
        let repository: Arc<dyn TaskRepository> = match config.storage {
            StorageBackend::File => Arc::new(FileTaskStore::new(&config.data_file)),
            StorageBackend::Memory => Arc::new(InMemoryTaskStore::new()),
        };
        Self::with_repository(repository)
    }

    pub fn with_repository(repository: Arc<dyn TaskRepository>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                task_store: TaskStore::new(repository),
                started_at: Instant::now(),
            }),
        }
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &TaskStore {
        &self.inner.task_store
    }

    pub fn uptime(&self) -> Duration {
        self.inner.started_at.elapsed()
    }
}
