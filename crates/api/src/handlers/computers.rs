//! Handlers for computer records.
//!
//! Create and update hand the owning employee to the threshold monitor after
//! the store write succeeds. The monitor runs detached, so its outcome never
//! reaches the response.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use computer_manager_core::computer;
use computer_manager_db::models::computer::Computer;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::PrettyJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /computers
// ---------------------------------------------------------------------------

/// Create a computer.
pub async fn create_computer(
    State(state): State<AppState>,
    AppJson(input): AppJson<Computer>,
) -> AppResult<Json<Computer>> {
    computer::validate_new_computer(&input.mac_addr, &input.computer_name, &input.ip_addr)?;

    let created = state.store.create(&input).await?;

    tracing::info!(
        mac_addr = %created.mac_addr,
        employee_abbr = %created.employee_abbr,
        "Computer created",
    );

    state.monitor.on_write(&created.employee_abbr);

    Ok(Json(created))
}

// ---------------------------------------------------------------------------
// GET /computers/{mac}
// ---------------------------------------------------------------------------

/// Get a single computer by MAC address.
pub async fn get_computer(
    State(state): State<AppState>,
    Path(mac_addr): Path<String>,
) -> AppResult<Json<Computer>> {
    let found = state.store.read(&mac_addr).await?;
    Ok(Json(found))
}

// ---------------------------------------------------------------------------
// PUT /computers/{mac}
// ---------------------------------------------------------------------------

/// Replace a computer's fields.
///
/// The MAC address comes from the path. A body MAC is only accepted if it is
/// empty or identical, so the primary key can never change.
pub async fn update_computer(
    State(state): State<AppState>,
    Path(mac_addr): Path<String>,
    AppJson(mut input): AppJson<Computer>,
) -> AppResult<Json<Computer>> {
    computer::ensure_mac_unchanged(&mac_addr, &input.mac_addr)?;
    input.mac_addr = mac_addr;
    computer::validate_computer_fields(&input.computer_name, &input.ip_addr)?;

    let updated = state.store.update(&input).await?;

    tracing::info!(
        mac_addr = %updated.mac_addr,
        employee_abbr = %updated.employee_abbr,
        "Computer updated",
    );

    state.monitor.on_write(&updated.employee_abbr);

    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// DELETE /computers/{mac}
// ---------------------------------------------------------------------------

/// Delete a computer. Deleting a missing MAC address is an error.
pub async fn delete_computer(
    State(state): State<AppState>,
    Path(mac_addr): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.store.delete(&mac_addr).await?;

    tracing::info!(mac_addr = %mac_addr, "Computer deleted");

    Ok((StatusCode::OK, "entry deleted"))
}

// ---------------------------------------------------------------------------
// GET /computers
// ---------------------------------------------------------------------------

/// List every computer, pretty-printed.
pub async fn list_computers(
    State(state): State<AppState>,
) -> AppResult<PrettyJson<Vec<Computer>>> {
    let computers = state.store.read_all().await?;
    Ok(PrettyJson(computers))
}

// ---------------------------------------------------------------------------
// GET /employees/{abbr}/computers
// ---------------------------------------------------------------------------

/// List the computers owned by one employee.
pub async fn list_computers_for_employee(
    State(state): State<AppState>,
    Path(employee_abbr): Path<String>,
) -> AppResult<Json<Vec<Computer>>> {
    let computers = state.store.read_all_for_employee(&employee_abbr).await?;
    Ok(Json(computers))
}
