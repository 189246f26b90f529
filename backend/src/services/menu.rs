//! Menu reconciliation service
//!
//! Compares a freshly extracted wine list with the stored one and turns the
//! reviewer's selection into storage operations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{
    is_low_specificity_key, sanitize_wine, validate_wine, wine_key, DiffSelection, DiffSummary,
    FlavorVocabulary, MenuDiff, MenuOperation, MenuReconciler, ReconcileConfig, WineRecord,
};

use crate::error::{AppError, AppResult};

/// Menu service for diffing and applying wine list updates
#[derive(Clone)]
pub struct MenuService {
    reconciler: MenuReconciler,
    vocabulary: Arc<FlavorVocabulary>,
    max_wines: usize,
}

/// Stored and freshly extracted wine lists
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDiffInput {
    #[serde(default)]
    pub existing_wines: Vec<WineRecord>,
    #[serde(default)]
    pub new_wines: Vec<WineRecord>,
}

/// Wine lists plus the reviewer's selection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOperationsInput {
    #[serde(default)]
    pub existing_wines: Vec<WineRecord>,
    #[serde(default)]
    pub new_wines: Vec<WineRecord>,
    /// Missing selection accepts every entry
    pub selection: Option<DiffSelection>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDiffResponse {
    #[serde(flatten)]
    pub diff: MenuDiff,
    pub summary: DiffSummary,
    pub has_changes: bool,
}

#[derive(Debug, Serialize)]
pub struct MenuOperationsResponse {
    pub operations: Vec<MenuOperation>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct WineCheckResponse {
    pub valid: bool,
    pub wine: WineRecord,
}

impl MenuService {
    pub fn new(config: ReconcileConfig, vocabulary: Arc<FlavorVocabulary>, max_wines: usize) -> Self {
        Self {
            reconciler: MenuReconciler::new(config),
            vocabulary,
            max_wines,
        }
    }

    /// Classify every wine of both lists as added, removed, changed or unchanged
    pub fn diff(&self, input: MenuDiffInput) -> AppResult<MenuDiffResponse> {
        let diff = self.reconcile(&input.existing_wines, &input.new_wines)?;
        let summary = diff.summary();
        tracing::info!(
            "Menu diff: {} added, {} removed, {} changed, {} unchanged",
            summary.added,
            summary.removed,
            summary.changed,
            summary.unchanged
        );

        Ok(MenuDiffResponse {
            has_changes: diff.has_changes(),
            summary,
            diff,
        })
    }

    /// Storage operations for the selected diff entries
    pub fn operations(&self, input: MenuOperationsInput) -> AppResult<MenuOperationsResponse> {
        let diff = self.reconcile(&input.existing_wines, &input.new_wines)?;
        let selection = input
            .selection
            .unwrap_or_else(|| DiffSelection::all(&diff));

        let operations = diff.operations(&selection);
        tracing::info!("Prepared {} menu operations", operations.len());

        Ok(MenuOperationsResponse {
            count: operations.len(),
            operations,
        })
    }

    /// Sanitize a single wine record and check it can be stored
    pub fn check_wine(&self, wine: WineRecord) -> AppResult<WineCheckResponse> {
        let wine = sanitize_wine(&wine, &self.vocabulary);
        validate_wine(&wine).map_err(|msg| AppError::Validation {
            field: "wine".to_string(),
            message: msg.to_string(),
        })?;
        Ok(WineCheckResponse { valid: true, wine })
    }

    fn reconcile(&self, existing: &[WineRecord], incoming: &[WineRecord]) -> AppResult<MenuDiff> {
        for (field, len) in [("existingWines", existing.len()), ("newWines", incoming.len())] {
            if len > self.max_wines {
                return Err(AppError::Validation {
                    field: field.to_string(),
                    message: format!("List holds {} wines, the limit is {}", len, self.max_wines),
                });
            }
        }

        let incoming: Vec<WineRecord> = incoming
            .iter()
            .map(|wine| sanitize_wine(wine, &self.vocabulary))
            .collect();

        for wine in &incoming {
            let key = wine_key(wine);
            if is_low_specificity_key(&key) {
                tracing::warn!(
                    "Wine {:?} has a low-specificity key {:?}; it may collide with others",
                    wine.display_name(),
                    key
                );
            }
        }

        Ok(self.reconciler.reconcile(existing, &incoming))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{DiffCategory, WineType};

    fn service() -> MenuService {
        MenuService::new(
            ReconcileConfig::default(),
            Arc::new(FlavorVocabulary::standard()),
            10,
        )
    }

    fn ridge(price: i64) -> WineRecord {
        WineRecord {
            region: Some("Sonoma".into()),
            year: Some("2019".into()),
            ..WineRecord::new("Ridge", "Zinfandel", WineType::Red, Decimal::from(price))
        }
    }

    fn riesling() -> WineRecord {
        WineRecord::new("Trimbach", "Riesling", WineType::White, Decimal::from(38))
    }

    #[test]
    fn test_diff_detects_price_change() {
        let response = service()
            .diff(MenuDiffInput {
                existing_wines: vec![ridge(45)],
                new_wines: vec![ridge(50), riesling()],
            })
            .unwrap();
        assert!(response.has_changes);
        assert_eq!(response.summary.changed, 1);
        assert_eq!(response.summary.added, 1);
        assert_eq!(response.summary.removed, 0);
    }

    #[test]
    fn test_diff_sanitizes_incoming_flavors() {
        let mut incoming = riesling();
        incoming.flavor_profile = vec!["citrus".into(), "petrol".into()];
        let response = service()
            .diff(MenuDiffInput {
                existing_wines: Vec::new(),
                new_wines: vec![incoming],
            })
            .unwrap();
        assert_eq!(response.diff.added[0].wine().flavor_profile, vec!["citrus"]);
    }

    #[test]
    fn test_operations_follow_selection() {
        let existing = vec![ridge(45), WineRecord::new("Old", "Merlot", WineType::Red, Decimal::from(20))];
        let incoming = vec![ridge(50), riesling()];

        let diff = service()
            .diff(MenuDiffInput {
                existing_wines: existing.clone(),
                new_wines: incoming.clone(),
            })
            .unwrap()
            .diff;
        let mut selection = DiffSelection::all(&diff);
        selection.toggle(DiffCategory::Removed, 0);

        let response = service()
            .operations(MenuOperationsInput {
                existing_wines: existing,
                new_wines: incoming,
                selection: Some(selection),
            })
            .unwrap();
        assert_eq!(response.count, 2);
        assert!(matches!(response.operations[0], MenuOperation::Add { .. }));
        assert!(matches!(response.operations[1], MenuOperation::Update { .. }));
    }

    #[test]
    fn test_operations_default_to_everything() {
        let response = service()
            .operations(MenuOperationsInput {
                existing_wines: vec![WineRecord::new("Old", "Merlot", WineType::Red, Decimal::from(20))],
                new_wines: vec![riesling()],
                selection: None,
            })
            .unwrap();
        assert_eq!(response.count, 2);
    }

    #[test]
    fn test_reconcile_rejects_oversized_list() {
        let err = service()
            .diff(MenuDiffInput {
                existing_wines: vec![riesling(); 11],
                new_wines: Vec::new(),
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "existingWines"));
    }

    #[test]
    fn test_check_wine() {
        let response = service().check_wine(ridge(45)).unwrap();
        assert!(response.valid);

        let untyped = WineRecord {
            wine_type: None,
            ..ridge(45)
        };
        assert!(service().check_wine(untyped).is_err());
    }
}
