//! Task model definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::validation::ValidationMode;
use crate::{Error, Result};

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Sort weight, higher is more urgent.
    pub fn weight(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("Unknown priority: {}", other)),
        }
    }
}

/// A single to-do record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Loosely-typed task payload as received from a caller.
///
/// Every field keeps the raw JSON value so that type mismatches surface as
/// validation messages instead of deserialization failures. `null` is read
/// as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<Value>,
}

impl TaskInput {
    /// Payload carrying only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(Value::String(title.into())),
            ..Self::default()
        }
    }

    /// Empty patch, applies nothing
    pub fn patch() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Value::String(title.into()));
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Value::String(description.into()));
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(Value::String(priority.as_str().to_string()));
        self
    }

    /// Set the completion flag
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(Value::Bool(completed));
        self
    }

    fn title_str(&self) -> Option<&str> {
        self.title.as_ref().and_then(Value::as_str)
    }

    fn description_str(&self) -> Option<&str> {
        self.description.as_ref().and_then(Value::as_str)
    }

    fn priority_value(&self) -> Option<TaskPriority> {
        self.priority
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse().ok())
    }

    fn completed_bool(&self) -> Option<bool> {
        self.completed.as_ref().and_then(Value::as_bool)
    }
}

impl Task {
    /// Validate a creation payload and build the normalized task.
    ///
    /// Assigns a fresh id and stamps `created_at == updated_at == now`.
    pub fn create(input: &TaskInput) -> Result<Self> {
        input
            .validate(ValidationMode::Create)
            .map_err(Error::Validation)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title: input.title_str().unwrap_or_default().trim().to_string(),
            description: input
                .description_str()
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            priority: input.priority_value().unwrap_or_default(),
            completed: input.completed_bool().unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a patch after validating the merged result.
    ///
    /// Only fields present in the patch change; `id` and `created_at` never do.
    /// On failure the task is left untouched.
    pub fn update(&mut self, patch: &TaskInput) -> Result<()> {
        self.merged_with(patch)
            .validate(ValidationMode::Create)
            .map_err(Error::Validation)?;

        if let Some(title) = patch.title_str() {
            self.title = title.trim().to_string();
        }
        if let Some(description) = patch.description_str() {
            self.description = description.trim().to_string();
        }
        if let Some(priority) = patch.priority_value() {
            self.priority = priority;
        }
        if let Some(completed) = patch.completed_bool() {
            self.completed = completed;
        }

        self.touch();
        Ok(())
    }

    /// Flip the completion flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.touch();
    }

    /// Effective record when `patch` is laid over the current fields.
    fn merged_with(&self, patch: &TaskInput) -> TaskInput {
        TaskInput {
            title: patch
                .title
                .clone()
                .or_else(|| Some(Value::String(self.title.clone()))),
            description: patch
                .description
                .clone()
                .or_else(|| Some(Value::String(self.description.clone()))),
            priority: patch
                .priority
                .clone()
                .or_else(|| Some(Value::String(self.priority.as_str().to_string()))),
            completed: patch
                .completed
                .clone()
                .or(Some(Value::Bool(self.completed))),
        }
    }

    /// Stamp `updated_at`, always moving it forward even if the clock did not.
    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    /// Case-insensitive substring match on title or description.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
