//! HTTP handlers for wine pairing

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    services::matching::{FindPairingsInput, PairingsResponse, ScoreResponse, ScoreWineInput},
    AppState,
};

/// Rank a wine list against the diner's preferences
pub async fn find_pairings(
    State(state): State<AppState>,
    Json(input): Json<FindPairingsInput>,
) -> AppResult<Json<PairingsResponse>> {
    let response = state.matching.find_pairings(input)?;
    Ok(Json(response))
}

/// Score a single wine
pub async fn score_wine(
    State(state): State<AppState>,
    Json(input): Json<ScoreWineInput>,
) -> AppResult<Json<ScoreResponse>> {
    let score = state.matching.score_wine(input)?;
    Ok(Json(score))
}
