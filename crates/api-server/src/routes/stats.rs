//! Aggregate task statistics

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use tracktodo_core::task::{AnalyticsWindow, TaskAnalytics, TaskSummary};

use super::response::{store_error, ApiResponse, RouteError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsParams {
    #[serde(default)]
    pub period: Option<String>,
}

/// GET /api/tasks/stats/summary - Counts plus the newest tasks
async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TaskSummary>>, RouteError> {
    let summary = state
        .task_store()
        .summary()
        .await
        .map_err(|e| store_error(e, "Failed to fetch statistics"))?;

    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/tasks/stats/analytics?period=7d|30d - Trend and recommendations
async fn get_analytics(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<ApiResponse<TaskAnalytics>>, RouteError> {
    let window = params
        .period
        .as_deref()
        .map(AnalyticsWindow::parse)
        .unwrap_or_default();

    let analytics = state
        .task_store()
        .analytics(window)
        .await
        .map_err(|e| store_error(e, "Failed to fetch analytics"))?;

    Ok(Json(ApiResponse::ok(analytics)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks/stats/summary", get(get_summary))
        .route("/api/tasks/stats/analytics", get(get_analytics))
        .route("/api/stats", get(get_summary))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;
    use tracktodo_core::task::{TaskInput, TaskPriority};

    use crate::routes::test_support::memory_state;
    use crate::state::AppState;

    async fn get_json(state: &AppState, uri: &str) -> (StatusCode, Value) {
        let response = super::router()
            .with_state(state.clone())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn seed(state: &AppState) {
        let store = state.task_store();
        for (title, priority, completed) in [
            ("Write report", TaskPriority::High, true),
            ("Review PR", TaskPriority::High, false),
            ("Water plants", TaskPriority::Low, false),
        ] {
            store
                .create(
                    &TaskInput::new(title)
                        .with_priority(priority)
                        .with_completed(completed),
                )
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn summary_counts_tasks() {
        let state = memory_state();
        seed(&state).await;

        for uri in ["/api/tasks/stats/summary", "/api/stats"] {
            let (status, body) = get_json(&state, uri).await;
            assert_eq!(status, StatusCode::OK);
            let data = &body["data"];
            assert_eq!(data["totalTasks"], 3);
            assert_eq!(data["completedTasks"], 1);
            assert_eq!(data["pendingTasks"], 2);
            assert_eq!(data["completionRate"], 33);
            assert_eq!(data["priorityStats"]["high"], 2);
            assert_eq!(data["priorityStats"]["medium"], 0);
            assert_eq!(data["priorityStats"]["low"], 1);
            assert_eq!(data["recentTasks"].as_array().unwrap().len(), 3);
        }
    }

    #[tokio::test]
    async fn summary_of_empty_store() {
        let state = memory_state();
        let (status, body) = get_json(&state, "/api/stats").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["totalTasks"], 0);
        assert_eq!(body["data"]["completionRate"], 0);
        assert!(body["data"]["recentTasks"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn analytics_honours_period() {
        let state = memory_state();
        seed(&state).await;

        let (status, week) = get_json(&state, "/api/tasks/stats/analytics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(week["data"]["period"], "7d");
        assert_eq!(week["data"]["trend"].as_array().unwrap().len(), 7);
        assert_eq!(week["data"]["productivityScore"], 50);

        let (_, month) = get_json(&state, "/api/tasks/stats/analytics?period=30d").await;
        assert_eq!(month["data"]["period"], "30d");
        assert_eq!(month["data"]["trend"].as_array().unwrap().len(), 30);

        let (_, fallback) = get_json(&state, "/api/tasks/stats/analytics?period=year").await;
        assert_eq!(fallback["data"]["period"], "7d");
    }
}
