//! Validation and sanitisation for wine records and price bands

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::defaults::{approved_flavors, CONFIDENCE_FIELDS};
use crate::models::{PriceRange, WineRecord};

// ============================================================================
// Flavor Vocabulary
// ============================================================================

/// The set of flavor terms wine records may carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorVocabulary {
    terms: Vec<String>,
    lookup: HashSet<String>,
}

impl FlavorVocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lookup = HashSet::new();
        let terms = terms
            .into_iter()
            .map(|t| t.into().trim().to_lowercase())
            .filter(|t| !t.is_empty() && lookup.insert(t.clone()))
            .collect();
        Self { terms, lookup }
    }

    /// The fourteen approved terms
    pub fn standard() -> Self {
        Self::new(approved_flavors())
    }

    pub fn contains(&self, term: &str) -> bool {
        self.lookup.contains(term)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for FlavorVocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Wine Records
// ============================================================================

/// Drop flavor terms outside the vocabulary and low-confidence flags that do
/// not name a sensory field. Returns a new record.
pub fn sanitize_wine(wine: &WineRecord, vocabulary: &FlavorVocabulary) -> WineRecord {
    let mut seen = HashSet::new();
    WineRecord {
        flavor_profile: wine
            .flavor_profile
            .iter()
            .filter(|f| vocabulary.contains(f) && seen.insert(f.as_str()))
            .cloned()
            .collect(),
        low_confidence: wine
            .low_confidence
            .iter()
            .filter(|f| CONFIDENCE_FIELDS.contains(&f.as_str()))
            .cloned()
            .collect(),
        ..wine.clone()
    }
}

/// Validate a wine record before it is stored
pub fn validate_wine(wine: &WineRecord) -> Result<(), &'static str> {
    if !wine.has_valid_descriptor() {
        return Err("Wine needs either producer, varietal and region, or a single name");
    }
    if wine.wine_type.is_none() {
        return Err("Wine type is required");
    }
    validate_price(wine.price)
}

/// Validate price is non-negative
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price must be a non-negative number");
    }
    Ok(())
}

// ============================================================================
// Price Bands
// ============================================================================

/// Validate a price range has ordered, non-negative bounds
pub fn validate_price_range(range: &PriceRange) -> Result<(), &'static str> {
    validate_price(range.min)?;
    if range.max < range.min {
        return Err("Price range maximum must not be below the minimum");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WineType;

    fn ridge() -> WineRecord {
        WineRecord {
            region: Some("Sonoma".into()),
            ..WineRecord::new("Ridge", "Zinfandel", WineType::Red, Decimal::from(45))
        }
    }

    // ========================================================================
    // Vocabulary
    // ========================================================================

    #[test]
    fn test_standard_vocabulary() {
        let vocab = FlavorVocabulary::standard();
        assert_eq!(vocab.len(), 14);
        assert!(vocab.contains("biscuit"));
        assert!(!vocab.contains("butter"));
    }

    #[test]
    fn test_vocabulary_normalizes_and_dedupes() {
        let vocab = FlavorVocabulary::new(["Oak", " oak ", "", "smoke"]);
        assert_eq!(vocab.terms(), &["oak".to_string(), "smoke".to_string()]);
    }

    // ========================================================================
    // Wine Records
    // ========================================================================

    #[test]
    fn test_sanitize_filters_unapproved_terms() {
        let mut wine = ridge();
        wine.flavor_profile = vec!["berry".into(), "jammy".into(), "spice".into(), "berry".into()];
        wine.low_confidence = vec!["tannins".into(), "price".into()];

        let clean = sanitize_wine(&wine, &FlavorVocabulary::standard());
        assert_eq!(clean.flavor_profile, vec!["berry", "spice"]);
        assert_eq!(clean.low_confidence, vec!["tannins"]);
        assert_eq!(wine.flavor_profile.len(), 4);
    }

    #[test]
    fn test_validate_wine_valid() {
        assert!(validate_wine(&ridge()).is_ok());
        let legacy = WineRecord {
            name: Some("House Red".into()),
            wine_type: Some(WineType::Red),
            ..WineRecord::default()
        };
        assert!(validate_wine(&legacy).is_ok());
    }

    #[test]
    fn test_validate_wine_rejects_mixed_descriptors() {
        let mut wine = ridge();
        wine.name = Some("Ridge Zin".into());
        assert!(validate_wine(&wine).is_err());
    }

    #[test]
    fn test_validate_wine_requires_type() {
        let mut wine = ridge();
        wine.wine_type = None;
        assert!(validate_wine(&wine).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::from(-1)).is_err());
    }

    // ========================================================================
    // Price Bands
    // ========================================================================

    #[test]
    fn test_validate_price_range() {
        assert!(validate_price_range(&PriceRange::new(Decimal::from(10), Decimal::from(30))).is_ok());
        assert!(validate_price_range(&PriceRange::new(Decimal::from(30), Decimal::from(10))).is_err());
        assert!(validate_price_range(&PriceRange::new(Decimal::from(-5), Decimal::from(10))).is_err());
    }
}
