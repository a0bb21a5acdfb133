//! Aggregate statistics over the full task collection

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::model::{Task, TaskPriority};

/// Number of newest tasks included in a summary
pub const RECENT_TASKS: usize = 5;

/// Pending high-priority tasks above which a focus hint is given
const HIGH_PRIORITY_BACKLOG: usize = 3;
/// Pending tasks above which a pruning hint is given
const PENDING_BACKLOG: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityStats {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityStats {
    fn record(&mut self, priority: TaskPriority) {
        match priority {
            TaskPriority::High => self.high += 1,
            TaskPriority::Medium => self.medium += 1,
            TaskPriority::Low => self.low += 1,
        }
    }
}

/// Counters shared by the summary and analytics views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCounts {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub completion_rate: u32,
    pub priority_stats: PriorityStats,
}

impl TaskCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total_tasks = tasks.len();
        let completed_tasks = tasks.iter().filter(|t| t.completed).count();

        let mut priority_stats = PriorityStats::default();
        for task in tasks {
            priority_stats.record(task.priority);
        }

        Self {
            total_tasks,
            completed_tasks,
            pending_tasks: total_tasks - completed_tasks,
            completion_rate: percentage(completed_tasks, total_tasks),
            priority_stats,
        }
    }
}

/// Rounded `part / whole * 100`, zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    #[serde(flatten)]
    pub counts: TaskCounts,
    pub recent_tasks: Vec<Task>,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut recent: Vec<Task> = tasks.to_vec();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_TASKS);

        Self {
            counts: TaskCounts::from_tasks(tasks),
            recent_tasks: recent,
        }
    }
}

/// Trailing period covered by the trend view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AnalyticsWindow {
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl AnalyticsWindow {
    /// Anything unrecognized falls back to a week
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "30" | "30d" | "month" => Self::Month,
            _ => Self::Week,
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
        }
    }
}

/// Activity on one calendar day (UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub created: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAnalytics {
    #[serde(flatten)]
    pub counts: TaskCounts,
    pub period: AnalyticsWindow,
    pub trend: Vec<TrendPoint>,
    /// Percentage of high-priority tasks that are completed
    pub productivity_score: u32,
    pub average_completion_days: Option<f64>,
    pub recommendations: Vec<String>,
}

impl TaskAnalytics {
    pub fn compute(tasks: &[Task], window: AnalyticsWindow, now: DateTime<Utc>) -> Self {
        let counts = TaskCounts::from_tasks(tasks);

        let high: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.priority == TaskPriority::High)
            .collect();
        let high_done = high.iter().filter(|t| t.completed).count();
        let high_pending = high.len() - high_done;

        Self {
            counts,
            period: window,
            trend: trend(tasks, window, now),
            productivity_score: percentage(high_done, high.len()),
            average_completion_days: average_completion_days(tasks),
            recommendations: recommendations(&counts, high_pending),
        }
    }
}

fn trend(tasks: &[Task], window: AnalyticsWindow, now: DateTime<Utc>) -> Vec<TrendPoint> {
    let today = now.date_naive();
    (0..window.days())
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            TrendPoint {
                date,
                created: tasks
                    .iter()
                    .filter(|t| t.created_at.date_naive() == date)
                    .count(),
                // completed tasks bucketed by updated_at
                completed: tasks
                    .iter()
                    .filter(|t| t.completed && t.updated_at.date_naive() == date)
                    .count(),
            }
        })
        .collect()
}

fn average_completion_days(tasks: &[Task]) -> Option<f64> {
    let spans: Vec<f64> = tasks
        .iter()
        .filter(|t| t.completed)
        .map(|t| (t.updated_at - t.created_at).num_seconds() as f64 / 86_400.0)
        .collect();

    if spans.is_empty() {
        return None;
    }

    let mean = spans.iter().sum::<f64>() / spans.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

fn recommendations(counts: &TaskCounts, high_pending: usize) -> Vec<String> {
    let mut hints = Vec::new();

    if counts.total_tasks == 0 {
        hints.push("Create your first task to start tracking your progress.".to_string());
        return hints;
    }

    if high_pending > HIGH_PRIORITY_BACKLOG {
        hints.push(format!(
            "You have {} pending high-priority tasks. Focus on completing these first.",
            high_pending
        ));
    }

    if counts.completion_rate < 50 {
        hints.push(
            "Your completion rate is below 50%. Try breaking large tasks into smaller steps."
                .to_string(),
        );
    }

    if counts.pending_tasks > PENDING_BACKLOG {
        hints.push(format!(
            "You have {} pending tasks. Consider reviewing and pruning your list.",
            counts.pending_tasks
        ));
    }

    if counts.completion_rate >= 80 && counts.total_tasks >= 5 {
        hints.push("Great job! You are completing most of your tasks.".to_string());
    }

    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskInput;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn task(priority: TaskPriority, completed: bool, created: DateTime<Utc>) -> Task {
        let mut task = Task::create(
            &TaskInput::new("task")
                .with_priority(priority)
                .with_completed(completed),
        )
        .unwrap();
        task.created_at = created;
        task.updated_at = created;
        task
    }

    #[test]
    fn test_empty_collection_has_zero_rate() {
        let counts = TaskCounts::from_tasks(&[]);
        assert_eq!(counts.total_tasks, 0);
        assert_eq!(counts.completion_rate, 0);
        assert_eq!(counts.priority_stats, PriorityStats::default());
    }

    #[test]
    fn test_counts_add_up() {
        let tasks = vec![
            task(TaskPriority::High, true, at(1, 8)),
            task(TaskPriority::High, false, at(1, 9)),
            task(TaskPriority::Low, true, at(2, 9)),
        ];
        let counts = TaskCounts::from_tasks(&tasks);

        assert_eq!(counts.total_tasks, 3);
        assert_eq!(counts.completed_tasks + counts.pending_tasks, counts.total_tasks);
        assert_eq!(counts.completion_rate, 67);
        let stats = counts.priority_stats;
        assert_eq!(stats.high + stats.medium + stats.low, counts.total_tasks);
        assert_eq!(stats.high, 2);
        assert_eq!(stats.medium, 0);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_summary_keeps_five_newest() {
        let tasks: Vec<Task> = (1..=7)
            .map(|day| task(TaskPriority::Medium, false, at(day, 12)))
            .collect();
        let summary = TaskSummary::from_tasks(&tasks);

        assert_eq!(summary.recent_tasks.len(), RECENT_TASKS);
        assert_eq!(summary.recent_tasks[0].created_at, at(7, 12));
        assert_eq!(summary.recent_tasks[4].created_at, at(3, 12));
        assert_eq!(summary.counts.total_tasks, 7);
    }

    #[test]
    fn test_summary_serializes_flat() {
        let summary = TaskSummary::from_tasks(&[task(TaskPriority::Low, true, at(1, 1))]);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["totalTasks"], 1);
        assert_eq!(value["completionRate"], 100);
        assert_eq!(value["priorityStats"]["low"], 1);
        assert_eq!(value["recentTasks"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_trend_covers_window_oldest_first() {
        let mut done = task(TaskPriority::Medium, true, at(8, 9));
        done.updated_at = at(10, 9);
        let tasks = vec![
            task(TaskPriority::Medium, false, at(10, 8)),
            task(TaskPriority::Low, false, at(1, 8)),
            done,
        ];

        let analytics = TaskAnalytics::compute(&tasks, AnalyticsWindow::Week, at(10, 20));

        assert_eq!(analytics.trend.len(), 7);
        assert_eq!(analytics.trend[0].date, at(4, 0).date_naive());
        let today = analytics.trend.last().unwrap();
        assert_eq!(today.date, at(10, 0).date_naive());
        assert_eq!(today.created, 1);
        assert_eq!(today.completed, 1);
        assert_eq!(analytics.trend[4].created, 1);

        let month = TaskAnalytics::compute(&tasks, AnalyticsWindow::Month, at(10, 20));
        assert_eq!(month.trend.len(), 30);
    }

    #[test]
    fn test_productivity_and_completion_days() {
        let mut quick = task(TaskPriority::High, true, at(1, 0));
        quick.updated_at = at(2, 0);
        let mut slow = task(TaskPriority::Low, true, at(1, 0));
        slow.updated_at = at(3, 12);
        let tasks = vec![quick, slow, task(TaskPriority::High, false, at(1, 0))];

        let analytics = TaskAnalytics::compute(&tasks, AnalyticsWindow::Week, at(4, 0));

        assert_eq!(analytics.productivity_score, 50);
        assert_eq!(analytics.average_completion_days, Some(1.8));
    }

    #[test]
    fn test_no_completed_tasks_has_no_average() {
        let tasks = vec![task(TaskPriority::Low, false, at(1, 0))];
        let analytics = TaskAnalytics::compute(&tasks, AnalyticsWindow::Week, at(2, 0));
        assert_eq!(analytics.average_completion_days, None);
        assert_eq!(analytics.productivity_score, 0);
    }

    #[test]
    fn test_recommendations_thresholds() {
        let empty = TaskAnalytics::compute(&[], AnalyticsWindow::Week, at(1, 0));
        assert_eq!(empty.recommendations.len(), 1);
        assert!(empty.recommendations[0].contains("first task"));

        let backlog: Vec<Task> = (0..4)
            .map(|_| task(TaskPriority::High, false, at(1, 0)))
            .collect();
        let hints = TaskAnalytics::compute(&backlog, AnalyticsWindow::Week, at(2, 0)).recommendations;
        assert!(hints.iter().any(|h| h.contains("4 pending high-priority")));
        assert!(hints.iter().any(|h| h.contains("below 50%")));

        let finished: Vec<Task> = (0..5)
            .map(|_| task(TaskPriority::Low, true, at(1, 0)))
            .collect();
        let hints = TaskAnalytics::compute(&finished, AnalyticsWindow::Week, at(2, 0)).recommendations;
        assert_eq!(hints, ["Great job! You are completing most of your tasks.".to_string()]);
    }

    #[test]
    fn test_window_parse() {
        assert_eq!(AnalyticsWindow::parse("30d"), AnalyticsWindow::Month);
        assert_eq!(AnalyticsWindow::parse("month"), AnalyticsWindow::Month);
        assert_eq!(AnalyticsWindow::parse("7"), AnalyticsWindow::Week);
        assert_eq!(AnalyticsWindow::parse("fortnight"), AnalyticsWindow::Week);
        assert_eq!(
            serde_json::to_value(AnalyticsWindow::Month).unwrap(),
            serde_json::json!("30d")
        );
    }
}
