//! REST API handlers.
//!
//! Each handler delegates to `EmployeeService` and returns JSON responses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::warn;

use roster_core::EmployeeId;
use roster_expand::ExpandError;

use crate::query::EmployeeQuery;
use crate::ApiState;

/// Envelope shared by every employee endpoint: `data` on success, `error`
/// otherwise.
#[derive(serde::Serialize)]
struct ApiResponse<T: serde::Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: serde::Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

impl ApiResponse<()> {
    fn failure(msg: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        })
    }
}

fn error_response(msg: impl Into<String>, status: StatusCode) -> axum::response::Response {
    (status, ApiResponse::failure(msg)).into_response()
}

/// Map an engine failure onto a status: upstream trouble is a bad gateway,
/// a dangling reference is ours.
fn expand_error_response(err: &ExpandError) -> axum::response::Response {
    let status = match err {
        ExpandError::Unresolved { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        ExpandError::Directory(_) => StatusCode::BAD_GATEWAY,
    };
    warn!(error = %err, %status, "employee request failed");
    error_response(err.to_string(), status)
}

// ── Employees ──────────────────────────────────────────────────

/// GET /employees
pub async fn list_employees(
    State(state): State<ApiState>,
    Query(params): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let query = match EmployeeQuery::parse(&params, &state.defaults) {
        Ok(query) => query,
        Err(msg) => {
            return error_response(msg, StatusCode::UNPROCESSABLE_ENTITY);
        }
    };

    match state.service.list_employees(query.window, &query.expand).await {
        Ok(employees) => ApiResponse::ok(employees).into_response(),
        Err(e) => expand_error_response(&e),
    }
}

/// GET /employees/:id
pub async fn get_employee(
    State(state): State<ApiState>,
    Path(raw_id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let Ok(id) = raw_id.parse::<EmployeeId>() else {
        return error_response(
            format!("employee id must be an integer, got {raw_id:?}"),
            StatusCode::UNPROCESSABLE_ENTITY,
        );
    };

    let query = match EmployeeQuery::parse(&params, &state.defaults) {
        Ok(query) => query,
        Err(msg) => {
            return error_response(msg, StatusCode::UNPROCESSABLE_ENTITY);
        }
    };

    match state.service.get_employee(id, &query.expand).await {
        Ok(Some(employee)) => ApiResponse::ok(employee).into_response(),
        Ok(None) => error_response(format!("employee {id} not found"), StatusCode::NOT_FOUND),
        Err(e) => expand_error_response(&e),
    }
}

// ── Health ─────────────────────────────────────────────────────

/// GET /healthz
pub async fn healthz() -> impl IntoResponse {
    ApiResponse::ok("ok")
}
