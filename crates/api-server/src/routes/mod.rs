//! Route handlers

pub mod health;
pub mod response;
pub mod stats;
pub mod task;

use axum::{
    http::{Method, Uri},
    Json, Router,
};

use self::response::{not_found, RouteError};
use crate::state::AppState;

/// Every API route plus the JSON 404 fallback
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(stats::router())
        .merge(task::router())
        .fallback(route_not_found)
}

async fn route_not_found(method: Method, uri: Uri) -> RouteError {
    let (status, Json(mut body)) = not_found("Route not found");
    body.message = Some(format!("Cannot {} {}", method, uri.path()));
    (status, Json(body))
}
