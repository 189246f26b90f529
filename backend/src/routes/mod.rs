//! Route definitions for the Wine Discovery Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/pairings", pairing_routes())
        .nest("/quiz", quiz_routes())
        .nest("/menus", menu_routes())
        .route("/wines/validate", post(handlers::validate_wine))
}

/// Wine pairing routes
fn pairing_routes() -> Router<AppState> {
    Router::new()
        .route("/find", post(handlers::find_pairings))
        .route("/score", post(handlers::score_wine))
}

/// Taste quiz routes
fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/questions", get(handlers::list_quiz_questions))
        .route("/profiles", get(handlers::list_quiz_profiles))
        .route("/profiles/:profile_id", get(handlers::get_quiz_profile))
        .route("/submit", post(handlers::submit_quiz))
}

/// Menu reconciliation routes
fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/diff", post(handlers::diff_menu))
        .route("/operations", post(handlers::menu_operations))
}
