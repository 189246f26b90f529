//! Menu reconciliation: classify an incoming wine list against the stored
//! one as added, changed, unchanged or removed.
//!
//! Wines are paired by a fuzzy key built from producer, varietal and type.
//! Two vintages of the same wine share a key and collapse into a single
//! "changed" entry.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::defaults::COMPARED_FIELDS;
use crate::models::{ComparedField, DiffEntry, FieldChange, MenuDiff, WineRecord};

/// Which factual fields count as a change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReconcileConfig {
    pub compared_fields: Vec<ComparedField>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            compared_fields: COMPARED_FIELDS.to_vec(),
        }
    }
}

/// Lowercase and keep only ASCII letters and digits
pub fn normalize_segment(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Identity key used to pair wines across uploads
pub fn wine_key(wine: &WineRecord) -> String {
    let segment = |value: Option<&str>| normalize_segment(value.unwrap_or_default());
    format!(
        "{}|{}|{}",
        segment(wine.producer.as_deref()),
        segment(wine.varietal.as_deref()),
        segment(wine.wine_type.map(|t| t.as_str())),
    )
}

/// Whether a key was built without producer or varietal and is likely to
/// collide with other under-specified wines
pub fn is_low_specificity_key(key: &str) -> bool {
    key.split('|').take(2).any(str::is_empty)
}

/// Diffs wine lists
#[derive(Debug, Clone, Default)]
pub struct MenuReconciler {
    config: ReconcileConfig,
}

impl MenuReconciler {
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Field-level differences between a stored wine and its incoming match
    pub fn field_changes(&self, existing: &WineRecord, incoming: &WineRecord) -> Vec<FieldChange> {
        self.config
            .compared_fields
            .iter()
            .filter_map(|field| {
                let old_val = field.value_of(existing);
                let new_val = field.value_of(incoming);
                (old_val != new_val).then_some(FieldChange {
                    field: *field,
                    old_val,
                    new_val,
                })
            })
            .collect()
    }

    /// Classify every incoming wine against `existing`, then report stored
    /// wines no incoming wine matched as removed. When several stored wines
    /// share a key the last one wins as the match target.
    pub fn reconcile(&self, existing: &[WineRecord], incoming: &[WineRecord]) -> MenuDiff {
        let existing_by_key: HashMap<String, &WineRecord> =
            existing.iter().map(|w| (wine_key(w), w)).collect();
        let incoming_keys: HashSet<String> = incoming.iter().map(wine_key).collect();

        let mut diff = MenuDiff::default();

        for wine in incoming {
            match existing_by_key.get(&wine_key(wine)) {
                None => diff.added.push(DiffEntry::Added { wine: wine.clone() }),
                Some(stored) => {
                    let field_changes = self.field_changes(stored, wine);
                    if field_changes.is_empty() {
                        diff.unchanged.push(DiffEntry::Unchanged {
                            wine: wine.clone(),
                            existing_wine: (*stored).clone(),
                        });
                    } else {
                        diff.changed.push(DiffEntry::Changed {
                            wine: wine.clone(),
                            existing_wine: (*stored).clone(),
                            field_changes,
                        });
                    }
                }
            }
        }

        diff.removed = existing
            .iter()
            .filter(|w| !incoming_keys.contains(&wine_key(w)))
            .map(|w| DiffEntry::Removed { wine: w.clone() })
            .collect();

        diff
    }
}
