//! HTTP handlers for the taste quiz

use axum::{
    extract::{Path, State},
    Json,
};
use shared::QuizProfile;

use crate::{
    error::AppResult,
    services::quiz::{QuestionSummary, QuizResult, SubmitQuizInput},
    AppState,
};

/// List quiz questions
pub async fn list_quiz_questions(State(state): State<AppState>) -> Json<Vec<QuestionSummary>> {
    Json(state.quiz.questions())
}

/// List taste archetypes
pub async fn list_quiz_profiles(State(state): State<AppState>) -> Json<Vec<QuizProfile>> {
    Json(state.quiz.profiles().to_vec())
}

/// Get one taste archetype
pub async fn get_quiz_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> AppResult<Json<QuizProfile>> {
    let profile = state.quiz.get_profile(&profile_id)?;
    Ok(Json(profile))
}

/// Submit a completed answer sheet
pub async fn submit_quiz(
    State(state): State<AppState>,
    Json(input): Json<SubmitQuizInput>,
) -> AppResult<Json<QuizResult>> {
    let result = state.quiz.submit(input)?;
    Ok(Json(result))
}
