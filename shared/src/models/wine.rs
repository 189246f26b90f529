//! Wine list records and their sensory attributes

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Wine style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WineType {
    Red,
    White,
    #[serde(rename = "rosé", alias = "rose")]
    Rose,
    Sparkling,
    Dessert,
}

impl WineType {
    pub const ALL: [WineType; 5] = [
        WineType::Red,
        WineType::White,
        WineType::Rose,
        WineType::Sparkling,
        WineType::Dessert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WineType::Red => "red",
            WineType::White => "white",
            WineType::Rose => "rosé",
            WineType::Sparkling => "sparkling",
            WineType::Dessert => "dessert",
        }
    }
}

impl std::fmt::Display for WineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WineType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(WineType::Red),
            "white" => Ok(WineType::White),
            "rosé" | "rose" => Ok(WineType::Rose),
            "sparkling" => Ok(WineType::Sparkling),
            "dessert" => Ok(WineType::Dessert),
            other => Err(format!("unknown wine type \"{}\"", other)),
        }
    }
}

/// Three-step scale used for acidity and tannins
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TasteLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl TasteLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TasteLevel::Low => "low",
            TasteLevel::Medium => "medium",
            TasteLevel::High => "high",
        }
    }
}

/// Body weight
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyWeight {
    Light,
    #[default]
    Medium,
    Full,
}

impl BodyWeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyWeight::Light => "light",
            BodyWeight::Medium => "medium",
            BodyWeight::Full => "full",
        }
    }
}

/// Residual sweetness
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SweetnessLevel {
    #[default]
    Dry,
    Medium,
    Sweet,
}

impl SweetnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SweetnessLevel::Dry => "dry",
            SweetnessLevel::Medium => "medium",
            SweetnessLevel::Sweet => "sweet",
        }
    }
}

/// A wine on a restaurant's list.
///
/// Descriptive fields come in two shapes: the structured
/// producer/varietal/region triple, or a single legacy `name`.
/// Sensory attributes that are missing or unrecognised fall back to the
/// store defaults (medium acidity, medium tannins, medium body, dry).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WineRecord {
    #[serde(rename = "wineId", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_like",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub varietal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Legacy single-string descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub wine_type: Option<WineType>,
    /// Cleared or unparsable prices read as zero
    #[serde(default, deserialize_with = "lenient::price")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub acidity: TasteLevel,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub tannins: TasteLevel,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub body_weight: BodyWeight,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub sweetness_level: SweetnessLevel,
    #[serde(default, deserialize_with = "lenient::non_blank_strings")]
    pub flavor_profile: Vec<String>,
    /// Field names the estimator flagged as uncertain. Carried, never interpreted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub low_confidence: Vec<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl WineRecord {
    /// Build a structured record with default sensory attributes
    pub fn new(producer: &str, varietal: &str, wine_type: WineType, price: Decimal) -> Self {
        Self {
            producer: Some(producer.to_string()),
            varietal: Some(varietal.to_string()),
            wine_type: Some(wine_type),
            price,
            ..Self::default()
        }
    }

    /// True when exactly one descriptor shape is filled in: the full
    /// producer/varietal/region triple, or a legacy name alone.
    pub(crate) fn has_valid_descriptor(&self) -> bool {
        let structured = [&self.producer, &self.varietal, &self.region].map(non_blank);
        match non_blank(&self.name) {
            Some(_) => structured.iter().all(Option::is_none),
            None => structured.iter().all(Option::is_some),
        }
    }

    /// Human readable label, e.g. "Ridge Zinfandel 2019"
    pub fn display_name(&self) -> String {
        if let Some(name) = non_blank(&self.name) {
            return name.to_string();
        }
        [
            non_blank(&self.producer),
            non_blank(&self.varietal),
            non_blank(&self.year),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn has_flavor(&self, note: &str) -> bool {
        self.flavor_profile.iter().any(|f| f == note)
    }
}
