//! Wine / preference match scoring.
//!
//! Each dimension present in the preferences contributes a score in
//! `[0, 1]`; the match score is their mean. Categorical near-misses earn
//! partial credit, a wine type mismatch earns nothing.

use serde::{Deserialize, Serialize};

use crate::defaults::{ACCEPTANCE_THRESHOLD, PARTIAL_CREDIT, RESULT_CAP};
use crate::models::{PreferenceVector, WineRecord, WineTypeFilter};

/// Tunable matching constants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatchingConfig {
    /// Wines scoring below this are dropped from ranked results
    pub acceptance_threshold: f64,
    /// Maximum number of ranked results
    pub result_cap: usize,
    /// Score for a categorical dimension that does not match exactly
    pub partial_credit: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: ACCEPTANCE_THRESHOLD,
            result_cap: RESULT_CAP,
            partial_credit: PARTIAL_CREDIT,
        }
    }
}

impl MatchingConfig {
    /// Validate that the constants keep scores inside `[0, 1]`
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(0.0..=1.0).contains(&self.partial_credit) {
            return Err("Partial credit must be between 0 and 1");
        }
        if !(0.0..=1.0).contains(&self.acceptance_threshold) {
            return Err("Acceptance threshold must be between 0 and 1");
        }
        Ok(())
    }
}

/// Mean per-dimension score together with how many dimensions produced it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatchScore {
    pub value: f64,
    pub dimensions: usize,
}

impl MatchScore {
    /// No dimension was specified, so the zero score says nothing about fit
    pub fn is_inconclusive(&self) -> bool {
        self.dimensions == 0
    }
}

/// A catalog wine annotated with its match score
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredWine {
    #[serde(flatten)]
    pub wine: WineRecord,
    pub match_score: f64,
}

/// Filtered, ordered and capped matches
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedMatches {
    pub matches: Vec<ScoredWine>,
    pub total_matches: usize,
    /// The preferences named no dimension at all
    pub inconclusive: bool,
}

/// Scores wines against a preference vector
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    config: MatchingConfig,
}

impl MatchScorer {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Match score in `[0, 1]`; 0 when no dimension is specified
    pub fn score(&self, preferences: &PreferenceVector, wine: &WineRecord) -> f64 {
        self.score_wine(preferences, wine).value
    }

    /// Match score with the number of contributing dimensions
    pub fn score_wine(&self, preferences: &PreferenceVector, wine: &WineRecord) -> MatchScore {
        let mut total = 0.0;
        let mut dimensions = 0;
        let mut add = |score: f64| {
            total += score;
            dimensions += 1;
        };

        if let Some(acidity) = preferences.acidity {
            add(self.categorical(acidity == wine.acidity));
        }
        if let Some(tannins) = preferences.tannins {
            add(self.categorical(tannins == wine.tannins));
        }
        if let Some(body) = preferences.body_weight {
            add(self.categorical(body == wine.body_weight));
        }
        if !preferences.flavor_notes.is_empty() {
            add(flavor_overlap(&preferences.flavor_notes, wine));
        }
        if let Some(sweetness) = preferences.sweetness {
            add(self.categorical(sweetness == wine.sweetness_level));
        }
        if let Some(range) = preferences.price_range {
            add(self.categorical(range.contains(wine.price)));
        }
        if let WineTypeFilter::Only(wanted) = preferences.wine_type {
            add(if wine.wine_type == Some(wanted) { 1.0 } else { 0.0 });
        }

        MatchScore {
            value: if dimensions > 0 {
                total / dimensions as f64
            } else {
                0.0
            },
            dimensions,
        }
    }

    /// Rank a catalog: hard-filter by wine type, score, drop anything under
    /// the acceptance threshold, sort best first (stable on ties) and cap.
    pub fn rank(&self, preferences: &PreferenceVector, catalog: &[WineRecord]) -> RankedMatches {
        let mut matches: Vec<ScoredWine> = catalog
            .iter()
            .filter(|wine| preferences.wine_type.admits(wine.wine_type))
            .map(|wine| ScoredWine {
                match_score: self.score(preferences, wine),
                wine: wine.clone(),
            })
            .filter(|scored| scored.match_score >= self.config.acceptance_threshold)
            .collect();

        matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        matches.truncate(self.config.result_cap);

        RankedMatches {
            total_matches: matches.len(),
            matches,
            inconclusive: preferences.is_empty(),
        }
    }

    fn categorical(&self, exact: bool) -> f64 {
        if exact {
            1.0
        } else {
            self.config.partial_credit
        }
    }
}

/// Fraction of the requested flavors the wine carries. Extra wine flavors
/// neither help nor hurt.
fn flavor_overlap(requested: &[String], wine: &WineRecord) -> f64 {
    let found = requested.iter().filter(|note| wine.has_flavor(note)).count();
    found as f64 / requested.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyWeight, PriceRange, SweetnessLevel, TasteLevel, WineType};
    use rust_decimal::Decimal;

    fn white(price: i64) -> WineRecord {
        WineRecord {
            acidity: TasteLevel::High,
            flavor_profile: vec!["citrus".into(), "pear".into(), "floral".into()],
            ..WineRecord::new("Dr. Loosen", "Riesling", WineType::White, Decimal::from(price))
        }
    }

    #[test]
    fn test_perfect_three_dimension_match() {
        let prefs = PreferenceVector {
            acidity: Some(TasteLevel::High),
            wine_type: WineTypeFilter::Only(WineType::White),
            price_range: Some(PriceRange::new(Decimal::from(10), Decimal::from(30))),
            ..PreferenceVector::default()
        };
        let score = MatchScorer::default().score_wine(&prefs, &white(20));
        assert_eq!(score.value, 1.0);
        assert_eq!(score.dimensions, 3);
    }

    #[test]
    fn test_categorical_partial_credit() {
        let prefs = PreferenceVector {
            acidity: Some(TasteLevel::Low),
            body_weight: Some(BodyWeight::Medium),
            sweetness: Some(SweetnessLevel::Sweet),
            ..PreferenceVector::default()
        };
        // acidity miss 0.5, body hit 1.0, sweetness miss 0.5
        let score = MatchScorer::default().score(&prefs, &white(20));
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_type_mismatch_earns_nothing() {
        let prefs = PreferenceVector {
            wine_type: WineTypeFilter::Only(WineType::Red),
            ..PreferenceVector::default()
        };
        assert_eq!(MatchScorer::default().score(&prefs, &white(20)), 0.0);
    }

    #[test]
    fn test_flavor_overlap_is_asymmetric() {
        let prefs = PreferenceVector {
            flavor_notes: vec!["citrus".into(), "oak".into()],
            ..PreferenceVector::default()
        };
        assert_eq!(MatchScorer::default().score(&prefs, &white(20)), 0.5);
    }

    #[test]
    fn test_price_outside_range() {
        let prefs = PreferenceVector {
            price_range: Some(PriceRange::new(Decimal::from(10), Decimal::from(30))),
            ..PreferenceVector::default()
        };
        assert_eq!(MatchScorer::default().score(&prefs, &white(45)), 0.5);
    }

    #[test]
    fn test_empty_preferences_are_inconclusive() {
        let prefs = PreferenceVector::default();
        let score = MatchScorer::default().score_wine(&prefs, &white(20));
        assert_eq!(score.value, 0.0);
        assert!(score.is_inconclusive());

        let ranked = MatchScorer::default().rank(&prefs, &[white(20)]);
        assert!(ranked.matches.is_empty());
        assert!(ranked.inconclusive);
    }

    #[test]
    fn test_rank_hard_filters_type_and_threshold() {
        let mut red = WineRecord::new("Ridge", "Zinfandel", WineType::Red, Decimal::from(20));
        red.acidity = TasteLevel::High;
        let prefs = PreferenceVector {
            wine_type: WineTypeFilter::Only(WineType::White),
            acidity: Some(TasteLevel::High),
            ..PreferenceVector::default()
        };
        let ranked = MatchScorer::default().rank(&prefs, &[red, white(20)]);
        assert_eq!(ranked.total_matches, 1);
        assert_eq!(ranked.matches[0].wine.wine_type, Some(WineType::White));
    }

    #[test]
    fn test_rank_is_stable_and_capped() {
        let catalog: Vec<WineRecord> = (0..12)
            .map(|i| WineRecord {
                id: Some(format!("w{}", i)),
                ..white(20)
            })
            .collect();
        let prefs = PreferenceVector {
            acidity: Some(TasteLevel::High),
            ..PreferenceVector::default()
        };
        let ranked = MatchScorer::default().rank(&prefs, &catalog);
        assert_eq!(ranked.matches.len(), RESULT_CAP);
        let ids: Vec<_> = ranked
            .matches
            .iter()
            .map(|m| m.wine.id.clone().unwrap())
            .collect();
        assert_eq!(ids[0], "w0");
        assert_eq!(ids[7], "w7");
    }

    #[test]
    fn test_custom_config_is_honoured() {
        let scorer = MatchScorer::new(MatchingConfig {
            acceptance_threshold: 0.9,
            result_cap: 2,
            partial_credit: 0.25,
        });
        let prefs = PreferenceVector {
            acidity: Some(TasteLevel::Low),
            ..PreferenceVector::default()
        };
        assert_eq!(scorer.score(&prefs, &white(20)), 0.25);
        assert!(scorer.rank(&prefs, &[white(20)]).matches.is_empty());
    }

    #[test]
    fn test_config_validation() {
        assert!(MatchingConfig::default().validate().is_ok());
        let bad = MatchingConfig {
            partial_credit: 1.5,
            ..MatchingConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}
