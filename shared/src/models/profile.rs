//! Taste archetypes and quiz questions

use serde::{Deserialize, Serialize};

use super::{
    BodyWeight, PreferenceVector, PriceRange, SweetnessLevel, TasteLevel, WineType, WineTypeFilter,
};

/// Sensory characteristics of an archetype
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCharacteristics {
    pub acidity: TasteLevel,
    pub tannins: TasteLevel,
    pub body_weight: BodyWeight,
    pub sweetness: SweetnessLevel,
    pub flavor_notes: Vec<String>,
}

/// Display axes on a 0-100 scale. Not used for scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileDimensions {
    pub acidity: u8,
    pub tannins: u8,
    pub body: u8,
    pub sweetness: u8,
    pub intensity: u8,
}

/// One of the named taste archetypes a quiz resolves to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizProfile {
    pub id: String,
    pub name: String,
    pub wine_type: WineType,
    pub characteristics: ProfileCharacteristics,
    pub dimensions: ProfileDimensions,
}

impl QuizProfile {
    /// The archetype as a preference vector, restricted to its wine type
    pub fn preferences(&self) -> PreferenceVector {
        PreferenceVector {
            wine_type: WineTypeFilter::Only(self.wine_type),
            acidity: Some(self.characteristics.acidity),
            tannins: Some(self.characteristics.tannins),
            body_weight: Some(self.characteristics.body_weight),
            sweetness: Some(self.characteristics.sweetness),
            flavor_notes: self.characteristics.flavor_notes.clone(),
            price_range: None,
        }
    }

    /// Preferences as stored on a user after the quiz, with a starting price band
    pub fn saved_preferences(&self, price_range: PriceRange) -> SavedPreferences {
        SavedPreferences {
            preferences: PreferenceVector {
                price_range: Some(price_range),
                ..self.preferences()
            },
            dimensions: self.dimensions,
        }
    }
}

/// Preference vector plus the archetype's display axes
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SavedPreferences {
    #[serde(flatten)]
    pub preferences: PreferenceVector,
    pub dimensions: ProfileDimensions,
}

/// Points awarded to a profile when a choice is selected
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub profile_id: String,
    pub points: u8,
}

impl Award {
    pub fn new(profile_id: &str, points: u8) -> Self {
        Self {
            profile_id: profile_id.to_string(),
            points,
        }
    }
}

/// A quiz question: one row of the scoring matrix
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// 1-based position in the quiz
    pub number: usize,
    pub topic: String,
    /// Awards per answer choice, indexed by the 0-based choice
    pub choices: Vec<Vec<Award>>,
    /// How many of the leading choices the diner is shown. A matrix row may
    /// carry more awards than the question offers.
    pub offered: usize,
}

impl QuizQuestion {
    /// A question offering every choice in its row
    pub fn new(number: usize, topic: &str, choices: Vec<Vec<Award>>) -> Self {
        Self {
            number,
            topic: topic.to_string(),
            offered: choices.len(),
            choices,
        }
    }

    /// Limit the question to its first `offered` choices
    pub fn offering(self, offered: usize) -> Self {
        Self { offered, ..self }
    }

    /// Number of answers a submission may pick from
    pub fn option_count(&self) -> usize {
        self.offered.min(self.choices.len())
    }

    /// Awards for the choices actually offered
    pub fn offered_choices(&self) -> &[Vec<Award>] {
        &self.choices[..self.option_count()]
    }
}
