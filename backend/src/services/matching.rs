//! Wine pairing service
//!
//! Scores a restaurant's wine list against a diner's preferences.

use serde::{Deserialize, Serialize};
use shared::{MatchScorer, MatchingConfig, PreferenceVector, RankedMatches, WineRecord};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Pairing service for ranking wine lists
#[derive(Clone)]
pub struct MatchingService {
    scorer: MatchScorer,
    max_catalog_size: usize,
}

/// Input for finding pairings on a wine list
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindPairingsInput {
    #[validate(length(min = 1, max = 200))]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub user_preferences: PreferenceVector,
    #[serde(default)]
    pub wines: Vec<WineRecord>,
}

/// Input for scoring a single wine
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWineInput {
    #[serde(default, alias = "userPreferences")]
    pub preferences: PreferenceVector,
    pub wine: WineRecord,
}

/// Ranked pairings for one restaurant
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    pub user_preferences: PreferenceVector,
    #[serde(flatten)]
    pub ranked: RankedMatches,
}

/// Score of a single wine
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub match_score: f64,
    /// Number of preference dimensions that were scored
    pub dimensions: usize,
    pub inconclusive: bool,
}

impl MatchingService {
    pub fn new(config: MatchingConfig, max_catalog_size: usize) -> Self {
        Self {
            scorer: MatchScorer::new(config),
            max_catalog_size,
        }
    }

    /// Rank a wine list against the diner's preferences
    pub fn find_pairings(&self, input: FindPairingsInput) -> AppResult<PairingsResponse> {
        input.validate()?;
        if input.wines.len() > self.max_catalog_size {
            return Err(AppError::Validation {
                field: "wines".to_string(),
                message: format!(
                    "Wine list holds {} wines, the limit is {}",
                    input.wines.len(),
                    self.max_catalog_size
                ),
            });
        }

        let ranked = self.scorer.rank(&input.user_preferences, &input.wines);
        if ranked.inconclusive {
            tracing::warn!("Preferences name no dimension; every wine scores zero");
        }
        tracing::info!(
            "Ranked {} wines for {}: {} matches",
            input.wines.len(),
            input.restaurant_id.as_deref().unwrap_or("unknown restaurant"),
            ranked.total_matches
        );

        Ok(PairingsResponse {
            restaurant_id: input.restaurant_id,
            user_preferences: input.user_preferences,
            ranked,
        })
    }

    /// Score one wine without filtering, with per-dimension detail
    pub fn score_wine(&self, input: ScoreWineInput) -> AppResult<ScoreResponse> {
        let score = self.scorer.score_wine(&input.preferences, &input.wine);
        tracing::debug!("Scored {}: {:.3}", input.wine.display_name(), score.value);
        Ok(ScoreResponse {
            match_score: score.value,
            dimensions: score.dimensions,
            inconclusive: score.is_inconclusive(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{TasteLevel, WineType, WineTypeFilter};

    fn service() -> MatchingService {
        MatchingService::new(MatchingConfig::default(), 3)
    }

    fn red(producer: &str) -> WineRecord {
        WineRecord {
            acidity: TasteLevel::High,
            ..WineRecord::new(producer, "Pinot Noir", WineType::Red, Decimal::from(40))
        }
    }

    #[test]
    fn test_find_pairings_filters_by_type() {
        let input = FindPairingsInput {
            restaurant_id: Some("r-1".to_string()),
            user_preferences: PreferenceVector {
                wine_type: WineTypeFilter::Only(WineType::White),
                acidity: Some(TasteLevel::High),
                ..PreferenceVector::default()
            },
            wines: vec![red("Domaine A")],
        };
        let response = service().find_pairings(input).unwrap();
        assert_eq!(response.ranked.total_matches, 0);
        assert_eq!(response.restaurant_id.as_deref(), Some("r-1"));
    }

    #[test]
    fn test_find_pairings_rejects_oversized_list() {
        let input = FindPairingsInput {
            restaurant_id: None,
            user_preferences: PreferenceVector::default(),
            wines: (0..4).map(|i| red(&format!("Producer {}", i))).collect(),
        };
        let err = service().find_pairings(input).unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "wines"));
    }

    #[test]
    fn test_find_pairings_rejects_blank_restaurant_id() {
        let input = FindPairingsInput {
            restaurant_id: Some(String::new()),
            user_preferences: PreferenceVector::default(),
            wines: Vec::new(),
        };
        assert!(matches!(
            service().find_pairings(input),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_empty_preferences_are_inconclusive() {
        let input = FindPairingsInput {
            restaurant_id: None,
            user_preferences: PreferenceVector::default(),
            wines: vec![red("Domaine A")],
        };
        let response = service().find_pairings(input).unwrap();
        assert!(response.ranked.inconclusive);
        assert!(response.ranked.matches.is_empty());
    }

    #[test]
    fn test_malformed_range_and_blank_notes_are_skipped() {
        let input: FindPairingsInput = serde_json::from_value(serde_json::json!({
            "userPreferences": {
                "acidity": "high",
                "flavorNotes": [" "],
                "priceRange": { "min": 30, "max": 10 }
            },
            "wines": [
                { "producer": "Domaine A", "varietal": "Pinot Noir", "type": "red",
                  "price": 40, "acidity": "high" }
            ]
        }))
        .unwrap();
        let response = service().find_pairings(input).unwrap();
        assert_eq!(response.user_preferences.dimension_count(), 1);
        assert_eq!(response.ranked.total_matches, 1);
        assert_eq!(response.ranked.matches[0].match_score, 1.0);
    }

    #[test]
    fn test_score_wine_skips_inverted_range() {
        let input: ScoreWineInput = serde_json::from_value(serde_json::json!({
            "preferences": { "acidity": "high", "priceRange": { "min": 50, "max": 5 } },
            "wine": { "producer": "Domaine A", "varietal": "Pinot Noir", "type": "red",
                      "price": 40, "acidity": "high" }
        }))
        .unwrap();
        let score = service().score_wine(input).unwrap();
        assert_eq!(score.dimensions, 1);
        assert_eq!(score.match_score, 1.0);
    }

    #[test]
    fn test_score_wine_reports_dimensions() {
        let input = ScoreWineInput {
            preferences: PreferenceVector {
                acidity: Some(TasteLevel::High),
                ..PreferenceVector::default()
            },
            wine: red("Domaine A"),
        };
        let score = service().score_wine(input).unwrap();
        assert_eq!(score.match_score, 1.0);
        assert_eq!(score.dimensions, 1);
        assert!(!score.inconclusive);
    }
}
