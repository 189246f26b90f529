//! WebAssembly module for the Wine Discovery Platform
//!
//! Provides client-side computation for:
//! - Match scores while a diner edits preferences
//! - Quiz classification
//! - Menu diff preview before upload
//!
//! Every entry point takes and returns JSON strings.

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use shared::{
    DiffSelection, MatchScorer, MenuReconciler, PreferenceVector, QuizCatalog, QuizClassifier,
    RandomTieBreaker, WineRecord,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MenuLists {
    #[serde(default)]
    existing_wines: Vec<WineRecord>,
    #[serde(default)]
    new_wines: Vec<WineRecord>,
    selection: Option<DiffSelection>,
}

/// Score one wine against a preference vector (0.0 to 1.0)
#[wasm_bindgen]
pub fn score_wine(preferences_json: &str, wine_json: &str) -> Result<f64, JsValue> {
    score_wine_impl(preferences_json, wine_json).map_err(|e| JsValue::from_str(&e))
}

/// Rank a wine list; returns `{matches, totalMatches, inconclusive}`
#[wasm_bindgen]
pub fn rank_wines(preferences_json: &str, wines_json: &str) -> Result<String, JsValue> {
    rank_wines_impl(preferences_json, wines_json).map_err(|e| JsValue::from_str(&e))
}

/// Classify quiz answers; ties are broken by an RNG seeded with `seed`
#[wasm_bindgen]
pub fn classify_quiz(answers_json: &str, seed: u64) -> Result<String, JsValue> {
    classify_quiz_impl(answers_json, seed).map_err(|e| JsValue::from_str(&e))
}

/// Diff two wine lists; returns the diff as JSON
#[wasm_bindgen]
pub fn reconcile_menus(lists_json: &str) -> Result<String, JsValue> {
    reconcile_menus_impl(lists_json).map_err(|e| JsValue::from_str(&e))
}

/// Operations for the selected diff entries
#[wasm_bindgen]
pub fn menu_operations(lists_json: &str) -> Result<String, JsValue> {
    menu_operations_impl(lists_json).map_err(|e| JsValue::from_str(&e))
}

fn parse<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn score_wine_impl(preferences_json: &str, wine_json: &str) -> Result<f64, String> {
    let preferences: PreferenceVector = parse(preferences_json, "preferences")?;
    let wine: WineRecord = parse(wine_json, "wine")?;
    Ok(MatchScorer::default().score(&preferences, &wine))
}

fn rank_wines_impl(preferences_json: &str, wines_json: &str) -> Result<String, String> {
    let preferences: PreferenceVector = parse(preferences_json, "preferences")?;
    let wines: Vec<WineRecord> = parse(wines_json, "wines")?;
    to_json(&MatchScorer::default().rank(&preferences, &wines))
}

fn classify_quiz_impl(answers_json: &str, seed: u64) -> Result<String, String> {
    let answers: Vec<i64> = parse(answers_json, "answers")?;
    let catalog = QuizCatalog::standard().map_err(|e| e.to_string())?;
    let mut tie_breaker = RandomTieBreaker(StdRng::seed_from_u64(seed));
    let profile = QuizClassifier::new(&catalog)
        .classify(&answers, &mut tie_breaker)
        .map_err(|e| e.to_string())?;
    to_json(&profile)
}

fn reconcile_menus_impl(lists_json: &str) -> Result<String, String> {
    let lists: MenuLists = parse(lists_json, "menu")?;
    to_json(&MenuReconciler::default().reconcile(&lists.existing_wines, &lists.new_wines))
}

fn menu_operations_impl(lists_json: &str) -> Result<String, String> {
    let lists: MenuLists = parse(lists_json, "menu")?;
    let diff = MenuReconciler::default().reconcile(&lists.existing_wines, &lists.new_wines);
    let selection = lists
        .selection
        .unwrap_or_else(|| DiffSelection::all(&diff));
    to_json(&diff.operations(&selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const RIESLING: &str = r#"{"producer":"Trimbach","varietal":"Riesling","type":"white","price":38,"acidity":"high","flavorProfile":["citrus","mineral"]}"#;

    #[test]
    fn test_score_wine() {
        let score = score_wine_impl(r#"{"acidity":"high","flavorNotes":["citrus"]}"#, RIESLING).unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_wine_bad_json() {
        assert!(score_wine_impl("{", RIESLING).is_err());
    }

    #[test]
    fn test_rank_wines() {
        let json = rank_wines_impl(r#"{"wineType":"red","acidity":"high"}"#, &format!("[{}]", RIESLING)).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalMatches"], 0);
    }

    #[test]
    fn test_classify_quiz_is_seeded() {
        let answers = serde_json::to_string(&vec![2; 15]).unwrap();
        let first = classify_quiz_impl(&answers, 42).unwrap();
        let second = classify_quiz_impl(&answers, 42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_quiz_rejects_short_sheet() {
        let err = classify_quiz_impl("[0, 1]", 1).unwrap_err();
        assert!(err.contains("15"));
    }

    #[test]
    fn test_classify_quiz_rejects_unoffered_choice() {
        let mut answers = vec![0; 15];
        answers[0] = 3;
        let err = classify_quiz_impl(&serde_json::to_string(&answers).unwrap(), 1).unwrap_err();
        assert!(err.contains("question 1"));
    }

    #[test]
    fn test_reconcile_and_operations() {
        let lists = format!(r#"{{"existingWines":[],"newWines":[{}]}}"#, RIESLING);
        let diff: Value = serde_json::from_str(&reconcile_menus_impl(&lists).unwrap()).unwrap();
        assert_eq!(diff["added"].as_array().map(Vec::len), Some(1));

        let ops: Value = serde_json::from_str(&menu_operations_impl(&lists).unwrap()).unwrap();
        assert_eq!(ops[0]["action"], "add");
    }
}
