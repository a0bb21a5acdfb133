//! Query interpretation for task listings
//!
//! Raw string parameters are parsed once into a [`TaskQuery`], which then
//! runs the fixed pipeline: filter, search chain, sort, paginate.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use icu_collator::{Collator, CollatorOptions, Strength};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::{Task, TaskInput, TaskPriority};
use super::validation::ValidationMode;
use crate::{Error, Result, ValidationErrors};

pub const MAX_PAGE_LIMIT: usize = 100;

const LIMIT_INVALID: &str = "Limit must be a number between 1 and 100";
const OFFSET_INVALID: &str = "Offset must be a non-negative number";

/// Listing parameters exactly as supplied by a caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub completed: Option<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// Single-value listing filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Pending,
    Priority(TaskPriority),
}

impl TaskFilter {
    /// Unknown values mean no filtering
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "completed" => Self::Completed,
            "pending" => Self::Pending,
            other => other.parse().map(Self::Priority).unwrap_or(Self::All),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
            Self::Priority(priority) => task.priority == *priority,
        }
    }
}

/// Listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// High before medium before low
    Priority,
    /// Ascending, case-insensitive
    Title,
    /// Newest first
    #[default]
    CreatedAt,
}

impl SortKey {
    /// Unknown values fall back to `CreatedAt`
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "priority" => Self::Priority,
            "title" => Self::Title,
            _ => Self::CreatedAt,
        }
    }

    /// Stable sort in place
    pub fn sort(&self, tasks: &mut [Task]) {
        match self {
            Self::Priority => tasks.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight())),
            Self::Title => {
                let collator = title_collator();
                tasks.sort_by(|a, b| collate(collator.as_ref(), &a.title, &b.title))
            }
            Self::CreatedAt => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
    }
}

/// Root-locale Unicode collation at tertiary strength.
///
/// Accents and punctuation follow the UCA tables; on case-only ties
/// lowercase sorts first.
fn title_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);

    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            tracing::warn!("Title collator unavailable, comparing case-folded code points: {}", err);
            None
        }
    }
}

fn collate(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| b.cmp(a)),
    }
}

/// Parsed, validated listing query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQuery {
    pub filter: TaskFilter,
    /// Lowercased search term
    pub search: Option<String>,
    pub priority: Option<TaskPriority>,
    pub completed: Option<bool>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    /// `None` keeps stored (creation) order
    pub sort: Option<SortKey>,
    pub offset: usize,
    pub limit: Option<usize>,
}

/// One page of a listing plus the size of the whole filtered set
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub tasks: Vec<Task>,
    pub total: usize,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl QueryResult {
    /// Limit as reported to callers; the filtered total when none was given.
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(self.total)
    }
}

impl TaskQuery {
    pub fn parse(params: &QueryParams) -> Result<Self> {
        let mut errors = ValidationErrors::new();

        // priority and completed go through the task field rules
        let probe = TaskInput {
            priority: non_blank(&params.priority).map(|raw| Value::String(raw.to_string())),
            completed: non_blank(&params.completed).map(|raw| match raw {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                other => Value::String(other.to_string()),
            }),
            ..TaskInput::default()
        };
        if let Err(field_errors) = probe.validate(ValidationMode::Patch) {
            errors.extend(field_errors);
        }

        let limit = match non_blank(&params.limit) {
            None => None,
            Some(raw) => match raw.parse::<usize>() {
                Ok(limit) if (1..=MAX_PAGE_LIMIT).contains(&limit) => Some(limit),
                _ => {
                    errors.push(LIMIT_INVALID);
                    None
                }
            },
        };

        let offset = match non_blank(&params.offset) {
            None => 0,
            Some(raw) => raw.parse::<usize>().unwrap_or_else(|_| {
                errors.push(OFFSET_INVALID);
                0
            }),
        };

        if !errors.is_empty() {
            return Err(Error::InvalidQuery(errors));
        }

        Ok(Self {
            filter: non_blank(&params.filter)
                .map(TaskFilter::parse)
                .unwrap_or_default(),
            search: non_blank(&params.q).map(str::to_lowercase),
            priority: non_blank(&params.priority).and_then(|raw| raw.parse().ok()),
            completed: non_blank(&params.completed).map(|raw| raw == "true"),
            date_from: non_blank(&params.date_from).and_then(|raw| parse_bound(raw, false)),
            date_to: non_blank(&params.date_to).and_then(|raw| parse_bound(raw, true)),
            sort: non_blank(&params.sort).map(SortKey::parse),
            offset,
            limit,
        })
    }

    /// Whether `task` survives the filter and the search chain
    pub fn matches(&self, task: &Task) -> bool {
        if !self.filter.matches(task) {
            return false;
        }
        if let Some(needle) = &self.search {
            if !task.matches_text(needle) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(completed) = self.completed {
            if task.completed != completed {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if task.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if task.created_at > to {
                return false;
            }
        }
        true
    }

    /// Filter, sort, then slice `tasks`
    pub fn apply(&self, tasks: Vec<Task>) -> QueryResult {
        let mut matched: Vec<Task> = tasks.into_iter().filter(|t| self.matches(t)).collect();
        if let Some(sort) = self.sort {
            sort.sort(&mut matched);
        }

        let total = matched.len();
        let page = matched
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .collect();

        QueryResult {
            tasks: page,
            total,
            offset: self.offset,
            limit: self.limit,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// RFC 3339 timestamp or `YYYY-MM-DD`; a bare `to` date covers the whole day.
fn parse_bound(raw: &str, end_of_day: bool) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = if end_of_day {
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)?
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)?
    };
    Some(date.and_time(time).and_utc())
}
