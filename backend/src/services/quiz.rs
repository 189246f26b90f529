//! Taste quiz service
//!
//! Serves the quiz questions and turns a completed answer sheet into a
//! taste archetype with saved preferences.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    PriceRange, ProfileCharacteristics, QuizCatalog, QuizClassifier, QuizProfile,
    RandomTieBreaker, SavedPreferences, TieBreaker, WineType,
};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Quiz service holding the loaded catalog
#[derive(Clone)]
pub struct QuizService {
    catalog: Arc<QuizCatalog>,
    price_range: PriceRange,
}

/// A completed answer sheet
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizInput {
    #[validate(length(min = 1, max = 128))]
    pub user_id: Option<String>,
    /// 0-based choice per question, in question order
    pub answers: Vec<i64>,
}

/// A question as shown to the diner: number, topic and how many options
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub number: usize,
    pub topic: String,
    pub options: usize,
}

/// Quiz outcome
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Display name of the archetype
    pub profile: String,
    pub profile_id: String,
    pub wine_type: WineType,
    pub characteristics: ProfileCharacteristics,
    pub preferences: SavedPreferences,
    pub completed_at: DateTime<Utc>,
}

impl QuizService {
    pub fn new(catalog: Arc<QuizCatalog>, price_range: PriceRange) -> Self {
        Self {
            catalog,
            price_range,
        }
    }

    pub fn questions(&self) -> Vec<QuestionSummary> {
        self.catalog
            .questions()
            .iter()
            .map(|q| QuestionSummary {
                number: q.number,
                topic: q.topic.clone(),
                options: q.option_count(),
            })
            .collect()
    }

    pub fn profiles(&self) -> &[QuizProfile] {
        self.catalog.profiles()
    }

    pub fn get_profile(&self, id: &str) -> AppResult<QuizProfile> {
        self.catalog
            .profile(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Profile {}", id)))
    }

    /// Classify an answer sheet, breaking ties at random
    pub fn submit(&self, input: SubmitQuizInput) -> AppResult<QuizResult> {
        self.submit_with(input, &mut RandomTieBreaker(rand::thread_rng()))
    }

    /// Classify an answer sheet with the given tie breaker
    pub fn submit_with<T: TieBreaker>(
        &self,
        input: SubmitQuizInput,
        tie_breaker: &mut T,
    ) -> AppResult<QuizResult> {
        input.validate()?;

        let profile = QuizClassifier::new(&self.catalog).classify(&input.answers, tie_breaker)?;
        tracing::info!(
            "Quiz completed for {}: {}",
            input.user_id.as_deref().unwrap_or("anonymous"),
            profile.id
        );

        Ok(QuizResult {
            user_id: input.user_id,
            preferences: profile.saved_preferences(self.price_range),
            profile: profile.name,
            profile_id: profile.id,
            wine_type: profile.wine_type,
            characteristics: profile.characteristics,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{FixedTieBreaker, QuizError, WineTypeFilter};

    fn service() -> QuizService {
        QuizService::new(
            Arc::new(QuizCatalog::standard().unwrap()),
            PriceRange::new(Decimal::from(20), Decimal::from(100)),
        )
    }

    fn sheet(answers: Vec<i64>) -> SubmitQuizInput {
        SubmitQuizInput {
            user_id: Some("user-1".to_string()),
            answers,
        }
    }

    #[test]
    fn test_questions_summary() {
        let questions = service().questions();
        assert_eq!(questions.len(), 15);
        assert_eq!(questions[0].number, 1);
        assert!(questions[..14].iter().all(|q| q.options == 3));
        assert_eq!(questions[14].options, 4);
    }

    #[test]
    fn test_submit_all_first_choices() {
        let result = service()
            .submit_with(sheet(vec![0; 15]), &mut FixedTieBreaker(0))
            .unwrap();
        assert_eq!(result.profile_id, "full-bodied-red-enthusiast");
        assert_eq!(result.wine_type, WineType::Red);
        assert_eq!(
            result.preferences.preferences.wine_type,
            WineTypeFilter::Only(WineType::Red)
        );
        assert_eq!(
            result.preferences.preferences.price_range,
            Some(PriceRange::new(Decimal::from(20), Decimal::from(100)))
        );
        assert_eq!(result.user_id.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_submit_rejects_short_sheet() {
        let err = service()
            .submit_with(sheet(vec![0; 3]), &mut FixedTieBreaker(0))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidQuizAnswers(QuizError::WrongAnswerCount {
                expected: 15,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_submit_rejects_out_of_range_answer() {
        let mut answers = vec![0; 15];
        answers[4] = 7;
        let err = service()
            .submit_with(sheet(answers), &mut FixedTieBreaker(0))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidQuizAnswers(QuizError::AnswerOutOfRange { question: 5, .. })
        ));
    }

    #[test]
    fn test_submit_rejects_unoffered_fourth_choice() {
        let mut answers = vec![0; 15];
        answers[0] = 3;
        let err = service()
            .submit_with(sheet(answers), &mut FixedTieBreaker(0))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidQuizAnswers(QuizError::AnswerOutOfRange {
                question: 1,
                answer: 3,
                options: 3
            })
        ));
    }

    #[test]
    fn test_submit_random_tie_breaker_yields_known_profile() {
        let service = service();
        let result = service.submit(sheet(vec![2; 15])).unwrap();
        assert!(service.get_profile(&result.profile_id).is_ok());
    }

    #[test]
    fn test_get_unknown_profile() {
        assert!(matches!(
            service().get_profile("orange-wine"),
            Err(AppError::NotFound(_))
        ));
    }
}
