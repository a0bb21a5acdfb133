//! Task module
//!
//! This module contains task-related types and logic.

mod file_store;
mod memory_store;
mod model;
mod query;
mod repository;
mod stats;
mod store;
pub mod validation;

pub use file_store::FileTaskStore;
pub use memory_store::InMemoryTaskStore;
pub use model::*;
pub use query::{QueryParams, QueryResult, SortKey, TaskFilter, TaskQuery, MAX_PAGE_LIMIT};
pub use repository::TaskRepository;
pub use stats::{
    AnalyticsWindow, PriorityStats, TaskAnalytics, TaskCounts, TaskSummary, TrendPoint,
};
pub use store::TaskStore;
pub use validation::ValidationMode;
