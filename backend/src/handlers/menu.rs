//! HTTP handlers for menu reconciliation and wine checks

use axum::{extract::State, Json};
use shared::WineRecord;

use crate::{
    error::AppResult,
    services::menu::{
        MenuDiffInput, MenuDiffResponse, MenuOperationsInput, MenuOperationsResponse,
        WineCheckResponse,
    },
    AppState,
};

/// Diff an extracted wine list against the stored one
pub async fn diff_menu(
    State(state): State<AppState>,
    Json(input): Json<MenuDiffInput>,
) -> AppResult<Json<MenuDiffResponse>> {
    let response = state.menu.diff(input)?;
    Ok(Json(response))
}

/// Turn a reviewed diff into storage operations
pub async fn menu_operations(
    State(state): State<AppState>,
    Json(input): Json<MenuOperationsInput>,
) -> AppResult<Json<MenuOperationsResponse>> {
    let response = state.menu.operations(input)?;
    Ok(Json(response))
}

/// Sanitize and validate a single wine record
pub async fn validate_wine(
    State(state): State<AppState>,
    Json(wine): Json<WineRecord>,
) -> AppResult<Json<WineCheckResponse>> {
    let response = state.menu.check_wine(wine)?;
    Ok(Json(response))
}
