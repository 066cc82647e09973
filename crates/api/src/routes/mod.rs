pub mod computers;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /computers                      create, list all
/// /computers/{mac}                get, update, delete
/// /employees/{abbr}/computers     list computers owned by an employee
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/computers", computers::router())
        .route(
            "/employees/{abbr}/computers",
            get(handlers::computers::list_computers_for_employee),
        )
}
