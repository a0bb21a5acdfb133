//! `{ success, ... }` response envelopes shared by every endpoint

use axum::{http::StatusCode, Json};
use serde::Serialize;
use tracktodo_core::{Error, ErrorKind};

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            count: None,
            pagination: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub type RouteError = (StatusCode, Json<ErrorResponse>);

pub fn route_error(status: StatusCode, error: impl Into<String>) -> RouteError {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.into(),
            details: Vec::new(),
            message: None,
        }),
    )
}

pub fn bad_request(error: impl Into<String>, details: Vec<String>) -> RouteError {
    let (status, Json(mut body)) = route_error(StatusCode::BAD_REQUEST, error);
    body.details = details;
    (status, Json(body))
}

pub fn not_found(error: impl Into<String>) -> RouteError {
    route_error(StatusCode::NOT_FOUND, error)
}

/// Map a core failure onto one of the three outward signals.
///
/// Persistence failures are logged here and reported as `failure` only.
pub fn store_error(err: Error, failure: &str) -> RouteError {
    match err.kind() {
        ErrorKind::Validation => {
            let error = match err {
                Error::InvalidQuery(_) => "Invalid query parameters",
                _ => "Validation failed",
            };
            bad_request(error, err.details().to_vec())
        }
        ErrorKind::NotFound => not_found("Task not found"),
        ErrorKind::Persistence => {
            tracing::error!("{}: {}", failure, err);
            route_error(StatusCode::INTERNAL_SERVER_ERROR, failure)
        }
    }
}
