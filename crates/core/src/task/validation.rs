//! Field rules shared by every task payload
//!
//! All rules run; every violation is reported in rule order.

use serde_json::Value;

use super::model::{TaskInput, TaskPriority};
use crate::ValidationErrors;

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

pub const TITLE_REQUIRED: &str = "Title is required and must be a non-empty string";
pub const TITLE_TOO_LONG: &str = "Title must be less than 200 characters";
pub const DESCRIPTION_NOT_STRING: &str = "Description must be a string";
pub const DESCRIPTION_TOO_LONG: &str = "Description must be less than 1000 characters";
pub const PRIORITY_INVALID: &str = "Priority must be one of: high, medium, low";
pub const COMPLETED_NOT_BOOLEAN: &str = "Completed must be a boolean value";

/// Whether an absent title is a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Title is required
    Create,
    /// Title is checked only when present
    Patch,
}

impl TaskInput {
    pub fn validate(&self, mode: ValidationMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match &self.title {
            None if mode == ValidationMode::Create => errors.push(TITLE_REQUIRED),
            None => {}
            Some(Value::String(title)) if title.trim().is_empty() => errors.push(TITLE_REQUIRED),
            Some(Value::String(title)) if title.chars().count() > TITLE_MAX_LEN => {
                errors.push(TITLE_TOO_LONG)
            }
            Some(Value::String(_)) => {}
            Some(_) => errors.push(TITLE_REQUIRED),
        }

        match &self.description {
            None => {}
            Some(Value::String(description))
                if description.chars().count() > DESCRIPTION_MAX_LEN =>
            {
                errors.push(DESCRIPTION_TOO_LONG)
            }
            Some(Value::String(_)) => {}
            Some(_) => errors.push(DESCRIPTION_NOT_STRING),
        }

        if let Some(priority) = &self.priority {
            let known = priority
                .as_str()
                .is_some_and(|raw| raw.parse::<TaskPriority>().is_ok());
            if !known {
                errors.push(PRIORITY_INVALID);
            }
        }

        if let Some(completed) = &self.completed {
            if !completed.is_boolean() {
                errors.push(COMPLETED_NOT_BOOLEAN);
            }
        }

        errors.into_result()
    }
}
