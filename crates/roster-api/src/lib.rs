//! roster-api — REST API for Roster.
//!
//! Provides axum route handlers that serve employee records from the
//! upstream directory with their relations expanded on request.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/employees?limit=&offset=&expand=` | List a page of employees |
//! | GET | `/employees/{id}?expand=` | Get one employee |
//! | GET | `/healthz` | Liveness probe |
//!
//! `expand` may be repeated, e.g. `?expand=manager.office&expand=department`.

pub mod handlers;
pub mod query;

use axum::routing::get;
use axum::Router;
use roster_core::config::DefaultsConfig;
use roster_expand::EmployeeService;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub service: EmployeeService,
    pub defaults: DefaultsConfig,
}

/// Build the complete API router.
pub fn build_router(service: EmployeeService, defaults: DefaultsConfig) -> Router {
    let state = ApiState { service, defaults };

    Router::new()
        .route("/employees", get(handlers::list_employees))
        .route("/employees/{id}", get(handlers::get_employee))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
