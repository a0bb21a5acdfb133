//! Core library for TrackToDo
//!
//! This crate contains the task-tracking business logic, including:
//! - The task entity and its validation rules
//! - Persistence adapters (JSON file, in-memory)
//! - The task store with query, summary and analytics views

pub mod error;
pub mod task;

pub use error::{Error, ErrorKind, ValidationErrors};
pub type Result<T> = std::result::Result<T, Error>;
