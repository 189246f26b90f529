//! Menu reconciliation results

use serde::{Deserialize, Serialize};

use super::WineRecord;

/// Factual wine fields compared when reconciling two menus
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ComparedField {
    Year,
    Region,
    Price,
    Type,
}

impl ComparedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparedField::Year => "year",
            ComparedField::Region => "region",
            ComparedField::Price => "price",
            ComparedField::Type => "type",
        }
    }

    /// String form of the field used for comparison. Absent values render
    /// as the empty string; prices drop trailing zeros so `45.00` equals `45`.
    pub fn value_of(&self, wine: &WineRecord) -> String {
        match self {
            ComparedField::Year => wine.year.clone().unwrap_or_default(),
            ComparedField::Region => wine.region.clone().unwrap_or_default(),
            ComparedField::Price => wine.price.normalize().to_string(),
            ComparedField::Type => wine
                .wine_type
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for ComparedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComparedField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(ComparedField::Year),
            "region" => Ok(ComparedField::Region),
            "price" => Ok(ComparedField::Price),
            "type" => Ok(ComparedField::Type),
            other => Err(format!("\"{}\" is not a comparable wine field", other)),
        }
    }
}

/// A single field-level difference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: ComparedField,
    pub old_val: String,
    pub new_val: String,
}

/// Classification of one wine across two menu snapshots
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DiffEntry {
    Added {
        wine: WineRecord,
    },
    Removed {
        wine: WineRecord,
    },
    #[serde(rename_all = "camelCase")]
    Changed {
        wine: WineRecord,
        existing_wine: WineRecord,
        field_changes: Vec<FieldChange>,
    },
    #[serde(rename_all = "camelCase")]
    Unchanged {
        wine: WineRecord,
        existing_wine: WineRecord,
    },
}

impl DiffEntry {
    /// The wine this entry is about (the incoming one when both exist)
    pub fn wine(&self) -> &WineRecord {
        match self {
            DiffEntry::Added { wine }
            | DiffEntry::Removed { wine }
            | DiffEntry::Changed { wine, .. }
            | DiffEntry::Unchanged { wine, .. } => wine,
        }
    }

    pub fn existing_wine(&self) -> Option<&WineRecord> {
        match self {
            DiffEntry::Removed { wine } => Some(wine),
            DiffEntry::Changed { existing_wine, .. } | DiffEntry::Unchanged { existing_wine, .. } => {
                Some(existing_wine)
            }
            DiffEntry::Added { .. } => None,
        }
    }
}

/// Full reconciliation of an incoming menu against the stored one
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MenuDiff {
    pub added: Vec<DiffEntry>,
    pub removed: Vec<DiffEntry>,
    pub changed: Vec<DiffEntry>,
    pub unchanged: Vec<DiffEntry>,
}

/// Entry counts per category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub unchanged: usize,
}

impl MenuDiff {
    /// Whether applying the diff would modify the stored list
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty())
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            added: self.added.len(),
            removed: self.removed.len(),
            changed: self.changed.len(),
            unchanged: self.unchanged.len(),
        }
    }

    /// Turn the selected entries into store operations, in the order
    /// adds, updates, deletes. Unchanged entries never produce operations.
    pub fn operations(&self, selection: &DiffSelection) -> Vec<MenuOperation> {
        let mut operations = Vec::new();

        for (entry, _) in self
            .added
            .iter()
            .zip(selection.added_flags(self.added.len()))
            .filter(|(_, included)| *included)
        {
            operations.push(MenuOperation::Add {
                wine: entry.wine().clone(),
            });
        }

        for (entry, _) in self
            .changed
            .iter()
            .zip(selection.changed_flags(self.changed.len()))
            .filter(|(_, included)| *included)
        {
            operations.push(MenuOperation::Update {
                wine_id: entry.existing_wine().and_then(|w| w.id.clone()),
                wine: entry.wine().clone(),
            });
        }

        for (entry, _) in self
            .removed
            .iter()
            .zip(selection.removed_flags(self.removed.len()))
            .filter(|(_, included)| *included)
        {
            operations.push(MenuOperation::Delete {
                wine_id: entry.wine().id.clone(),
            });
        }

        operations
    }
}

/// Per-entry inclusion toggles for the actionable categories.
///
/// Missing flags count as included, so an empty selection applies
/// everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffSelection {
    #[serde(default)]
    pub added: Vec<bool>,
    #[serde(default)]
    pub changed: Vec<bool>,
    #[serde(default)]
    pub removed: Vec<bool>,
}

/// Actionable diff categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiffCategory {
    Added,
    Changed,
    Removed,
}

impl DiffSelection {
    /// Everything included
    pub fn all(diff: &MenuDiff) -> Self {
        Self {
            added: vec![true; diff.added.len()],
            changed: vec![true; diff.changed.len()],
            removed: vec![true; diff.removed.len()],
        }
    }

    /// Flip one entry. Out-of-range indexes are ignored.
    pub fn toggle(&mut self, category: DiffCategory, index: usize) {
        let flags = match category {
            DiffCategory::Added => &mut self.added,
            DiffCategory::Changed => &mut self.changed,
            DiffCategory::Removed => &mut self.removed,
        };
        if let Some(flag) = flags.get_mut(index) {
            *flag = !*flag;
        }
    }

    pub fn selected_count(&self) -> usize {
        self.added
            .iter()
            .chain(&self.changed)
            .chain(&self.removed)
            .filter(|included| **included)
            .count()
    }

    fn added_flags(&self, len: usize) -> impl Iterator<Item = bool> + '_ {
        padded(&self.added, len)
    }

    fn changed_flags(&self, len: usize) -> impl Iterator<Item = bool> + '_ {
        padded(&self.changed, len)
    }

    fn removed_flags(&self, len: usize) -> impl Iterator<Item = bool> + '_ {
        padded(&self.removed, len)
    }
}

fn padded(flags: &[bool], len: usize) -> impl Iterator<Item = bool> + '_ {
    flags.iter().copied().chain(std::iter::repeat(true)).take(len)
}

/// A store write proposed by reconciliation, applied by the caller
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum MenuOperation {
    Add {
        wine: WineRecord,
    },
    #[serde(rename_all = "camelCase")]
    Update {
        wine_id: Option<String>,
        wine: WineRecord,
    },
    #[serde(rename_all = "camelCase")]
    Delete {
        wine_id: Option<String>,
    },
}
