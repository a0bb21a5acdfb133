//! Task API endpoints
//!
//! RESTful API for task CRUD operations.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};

use tracktodo_core::task::{QueryParams, Task, TaskInput};

use super::response::{route_error, store_error, ApiResponse, Pagination, RouteError};
use crate::state::AppState;

type TaskResponse = Json<ApiResponse<Task>>;

/// Unwrap a JSON body, reporting malformed payloads in the common envelope
fn json_body(payload: Result<Json<TaskInput>, JsonRejection>) -> Result<TaskInput, RouteError> {
    match payload {
        Ok(Json(input)) => Ok(input),
        Err(rejection) => {
            let (status, Json(mut body)) = route_error(rejection.status(), "Invalid request body");
            body.message = Some(rejection.body_text());
            Err((status, Json(body)))
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks - List tasks with filter, search, sort and pagination
async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<ApiResponse<Vec<Task>>>, RouteError> {
    let result = state
        .task_store()
        .query(&params)
        .await
        .map_err(|e| store_error(e, "Failed to fetch tasks"))?;

    let pagination = Pagination {
        offset: result.offset,
        limit: result.effective_limit(),
        total: result.total,
    };

    let mut response = ApiResponse::ok(result.tasks);
    response.count = Some(result.total);
    response.pagination = Some(pagination);
    Ok(Json(response))
}

/// GET /api/tasks/{id} - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<TaskResponse, RouteError> {
    let task = state
        .task_store()
        .get_by_id(&id)
        .await
        .map_err(|e| store_error(e, "Failed to fetch task"))?;

    Ok(Json(ApiResponse::ok(task)))
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<(StatusCode, TaskResponse), RouteError> {
    let input = json_body(payload)?;

    let created = state
        .task_store()
        .create(&input)
        .await
        .map_err(|e| store_error(e, "Failed to save task"))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(created).with_message("Task created successfully")),
    ))
}

/// PUT|PATCH /api/tasks/{id} - Update a task
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<TaskResponse, RouteError> {
    let patch = json_body(payload)?;

    let updated = state
        .task_store()
        .update(&id, &patch)
        .await
        .map_err(|e| store_error(e, "Failed to update task"))?;

    Ok(Json(
        ApiResponse::ok(updated).with_message("Task updated successfully"),
    ))
}

/// PATCH /api/tasks/{id}/toggle - Flip completion
async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<TaskResponse, RouteError> {
    let toggled = state
        .task_store()
        .toggle(&id)
        .await
        .map_err(|e| store_error(e, "Failed to toggle task"))?;

    Ok(Json(
        ApiResponse::ok(toggled).with_message("Task toggled successfully"),
    ))
}

/// DELETE /api/tasks/{id} - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<TaskResponse, RouteError> {
    let removed = state
        .task_store()
        .delete(&id)
        .await
        .map_err(|e| store_error(e, "Failed to delete task"))?;

    Ok(Json(
        ApiResponse::ok(removed).with_message("Task deleted successfully"),
    ))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task)
                .put(update_task)
                .patch(update_task)
                .delete(delete_task),
        )
        .route("/api/tasks/{id}/toggle", patch(toggle_task))
}
