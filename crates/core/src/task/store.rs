//! Task store
//!
//! Whole-collection task operations on top of a [`TaskRepository`].
//!
//! Every operation reloads the full collection from the repository; mutating
//! operations write the full collection back. There is no locking between
//! callers: two concurrent mutations both read the same snapshot and the last
//! write wins. TrackToDo is a single-user tool and accepts this.

use std::sync::Arc;

use chrono::Utc;

use super::model::{Task, TaskInput};
use super::query::{QueryParams, QueryResult, TaskQuery};
use super::repository::TaskRepository;
use super::stats::{AnalyticsWindow, TaskAnalytics, TaskSummary};
use crate::{Error, Result};

#[derive(Clone)]
pub struct TaskStore {
    repository: Arc<dyn TaskRepository>,
}

impl TaskStore {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn TaskRepository> {
        &self.repository
    }

    /// Get all tasks in stored order
    pub async fn list_all(&self) -> Result<Vec<Task>> {
        self.repository.load_all().await
    }

    /// Get a task by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Task> {
        self.repository
            .load_all()
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    /// Create a new task and append it to the collection
    pub async fn create(&self, input: &TaskInput) -> Result<Task> {
        let task = Task::create(input)?;

        let mut tasks = self.repository.load_all().await?;
        tasks.push(task.clone());
        self.repository.save_all(&tasks).await?;

        tracing::info!("Created task {}", task.id);
        Ok(task)
    }

    /// Update an existing task in place
    pub async fn update(&self, id: &str, patch: &TaskInput) -> Result<Task> {
        self.modify(id, |task| task.update(patch)).await
    }

    /// Flip a task's completion flag
    pub async fn toggle(&self, id: &str) -> Result<Task> {
        self.modify(id, |task| {
            task.toggle();
            Ok(())
        })
        .await
    }

    /// Delete a task, returning the removed record
    pub async fn delete(&self, id: &str) -> Result<Task> {
        let mut tasks = self.repository.load_all().await?;
        let index = position(&tasks, id)?;
        let removed = tasks.remove(index);
        self.repository.save_all(&tasks).await?;

        tracing::info!("Deleted task {}", removed.id);
        Ok(removed)
    }

    /// Parse raw listing parameters and run the query
    pub async fn query(&self, params: &QueryParams) -> Result<QueryResult> {
        let query = TaskQuery::parse(params)?;
        self.run_query(&query).await
    }

    /// Run an already parsed query
    pub async fn run_query(&self, query: &TaskQuery) -> Result<QueryResult> {
        let tasks = self.repository.load_all().await?;
        Ok(query.apply(tasks))
    }

    pub async fn summary(&self) -> Result<TaskSummary> {
        let tasks = self.repository.load_all().await?;
        Ok(TaskSummary::from_tasks(&tasks))
    }

    pub async fn analytics(&self, window: AnalyticsWindow) -> Result<TaskAnalytics> {
        let tasks = self.repository.load_all().await?;
        Ok(TaskAnalytics::compute(&tasks, window, Utc::now()))
    }

    /// Load, mutate one task, persist. Nothing is written if `apply` fails.
    async fn modify<F>(&self, id: &str, apply: F) -> Result<Task>
    where
        F: FnOnce(&mut Task) -> Result<()>,
    {
        let mut tasks = self.repository.load_all().await?;
        let index = position(&tasks, id)?;
        apply(&mut tasks[index])?;
        self.repository.save_all(&tasks).await?;

        tracing::debug!("Updated task {}", id);
        Ok(tasks[index].clone())
    }
}

fn position(tasks: &[Task], id: &str) -> Result<usize> {
    tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| Error::TaskNotFound(id.to_string()))
}
