//! Route definitions for computer records.
//!
//! Mounted at `/computers` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::computers;
use crate::state::AppState;

/// Computer routes.
///
/// ```text
/// POST   /          -> create_computer
/// GET    /          -> list_computers
/// GET    /{mac}     -> get_computer
/// PUT    /{mac}     -> update_computer
/// DELETE /{mac}     -> delete_computer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(computers::create_computer).get(computers::list_computers),
        )
        .route(
            "/{mac}",
            get(computers::get_computer)
                .put(computers::update_computer)
                .delete(computers::delete_computer),
        )
}
