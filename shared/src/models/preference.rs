//! Diner taste preferences

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;
use super::{BodyWeight, SweetnessLevel, TasteLevel, WineType};
use crate::validation::validate_price_range;

/// Wine type restriction on a preference vector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum WineTypeFilter {
    #[default]
    Any,
    Only(WineType),
}

impl WineTypeFilter {
    pub fn admits(&self, wine_type: Option<WineType>) -> bool {
        match self {
            WineTypeFilter::Any => true,
            WineTypeFilter::Only(wanted) => wine_type == Some(*wanted),
        }
    }
}

impl TryFrom<String> for WineTypeFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "any" {
            return Ok(WineTypeFilter::Any);
        }
        value.parse().map(WineTypeFilter::Only)
    }
}

impl From<WineTypeFilter> for String {
    fn from(filter: WineTypeFilter) -> Self {
        match filter {
            WineTypeFilter::Any => "any".to_string(),
            WineTypeFilter::Only(t) => t.as_str().to_string(),
        }
    }
}

impl From<WineType> for WineTypeFilter {
    fn from(wine_type: WineType) -> Self {
        WineTypeFilter::Only(wine_type)
    }
}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Desired sensory profile. Every dimension is optional; an absent
/// dimension is simply not scored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceVector {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub wine_type: WineTypeFilter,
    #[serde(
        default,
        deserialize_with = "lenient::or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub acidity: Option<TasteLevel>,
    #[serde(
        default,
        deserialize_with = "lenient::or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub tannins: Option<TasteLevel>,
    #[serde(
        default,
        deserialize_with = "lenient::or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub body_weight: Option<BodyWeight>,
    #[serde(
        default,
        deserialize_with = "lenient::or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub sweetness: Option<SweetnessLevel>,
    #[serde(
        default,
        deserialize_with = "lenient::non_blank_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub flavor_notes: Vec<String>,
    #[serde(
        default,
        deserialize_with = "ordered_range",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_range: Option<PriceRange>,
}

/// A price range with a negative or inverted band is treated as absent
fn ordered_range<'de, D>(deserializer: D) -> Result<Option<PriceRange>, D::Error>
where
    D: Deserializer<'de>,
{
    let range: Option<PriceRange> = lenient::or_none(deserializer)?;
    Ok(range.filter(|r| validate_price_range(r).is_ok()))
}

impl PreferenceVector {
    /// Number of dimensions that will contribute to a match score
    pub fn dimension_count(&self) -> usize {
        [
            self.acidity.is_some(),
            self.tannins.is_some(),
            self.body_weight.is_some(),
            self.sweetness.is_some(),
            !self.flavor_notes.is_empty(),
            self.price_range.is_some(),
            self.wine_type != WineTypeFilter::Any,
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.dimension_count() == 0
    }
}
