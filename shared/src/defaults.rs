//! Built-in configuration tables: flavor vocabulary, matching constants,
//! the ten taste archetypes and the quiz scoring matrix.

use crate::models::{
    Award, BodyWeight, ComparedField, ProfileCharacteristics, ProfileDimensions, QuizProfile,
    QuizQuestion, SweetnessLevel, TasteLevel, WineType,
};

/// Flavor terms a wine's flavor profile may use
pub const APPROVED_FLAVORS: [&str; 14] = [
    "oak",
    "cherry",
    "citrus",
    "berry",
    "vanilla",
    "spice",
    "floral",
    "chocolate",
    "earthy",
    "tropical",
    "herbal",
    "honey",
    "pear",
    "biscuit",
];

/// Fields the estimator may flag as low confidence
pub const CONFIDENCE_FIELDS: [&str; 5] = [
    "acidity",
    "tannins",
    "bodyWeight",
    "sweetnessLevel",
    "flavorProfile",
];

/// Minimum score for a wine to be offered as a match
pub const ACCEPTANCE_THRESHOLD: f64 = 0.6;

/// Maximum number of ranked matches returned
pub const RESULT_CAP: usize = 8;

/// Credit given to a categorical near-miss
pub const PARTIAL_CREDIT: f64 = 0.5;

/// Factual fields compared during menu reconciliation. Sensory fields are
/// re-estimated on every upload and are left out.
pub const COMPARED_FIELDS: [ComparedField; 4] = [
    ComparedField::Year,
    ComparedField::Region,
    ComparedField::Price,
    ComparedField::Type,
];

/// Starting price band saved alongside quiz-derived preferences
pub const QUIZ_PRICE_RANGE: (i64, i64) = (20, 100);

pub const QUESTION_COUNT: usize = 15;

type ProfileRow = (
    &'static str,
    &'static str,
    WineType,
    (TasteLevel, TasteLevel, BodyWeight, SweetnessLevel),
    &'static [&'static str],
    [u8; 5],
);

const PROFILES: [ProfileRow; 10] = {
    use BodyWeight as B;
    use SweetnessLevel as S;
    use TasteLevel as L;
    [
        (
            "full-bodied-red-enthusiast",
            "Full-Bodied Red Enthusiast",
            WineType::Red,
            (L::Medium, L::High, B::Full, S::Dry),
            &["oak", "spice", "cherry"],
            [45, 90, 90, 15, 75],
        ),
        (
            "medium-bodied-red-aficionado",
            "Medium-Bodied Red Aficionado",
            WineType::Red,
            (L::Medium, L::Low, B::Medium, S::Medium),
            &["cherry", "berry", "vanilla"],
            [60, 30, 45, 30, 60],
        ),
        (
            "spiced-red-connoisseur",
            "Spiced Red Connoisseur",
            WineType::Red,
            (L::Medium, L::Medium, B::Full, S::Dry),
            &["spice", "cherry", "oak"],
            [45, 75, 90, 15, 75],
        ),
        (
            "light-bodied-red-devotee",
            "Light-Bodied Red Devotee",
            WineType::Red,
            (L::High, L::Low, B::Light, S::Dry),
            &["berry", "floral", "citrus"],
            [75, 30, 30, 15, 45],
        ),
        (
            "crisp-acidic-white-enthusiast",
            "Crisp & Acidic White Enthusiast",
            WineType::White,
            (L::High, L::Low, B::Light, S::Dry),
            &["citrus", "floral"],
            [90, 15, 30, 15, 75],
        ),
        (
            "full-bodied-white-aficionado",
            "Full-Bodied White Aficionado",
            WineType::White,
            (L::Low, L::Low, B::Full, S::Dry),
            &["oak", "vanilla", "butter"],
            [45, 15, 90, 15, 75],
        ),
        (
            "aromatic-white-connoisseur",
            "Aromatic White Connoisseur",
            WineType::White,
            (L::Medium, L::Low, B::Medium, S::Medium),
            &["floral", "citrus", "spice"],
            [60, 15, 45, 60, 60],
        ),
        (
            "fruit-forward-white-devotee",
            "Fruit-Forward White Devotee",
            WineType::White,
            (L::Medium, L::Low, B::Medium, S::Medium),
            &["citrus", "berry"],
            [45, 15, 45, 60, 45],
        ),
        (
            "sparkling-wine-enthusiast",
            "Sparkling Wine Enthusiast",
            WineType::Sparkling,
            (L::High, L::Low, B::Light, S::Dry),
            &["citrus", "floral"],
            [75, 15, 30, 15, 45],
        ),
        (
            "dessert-wine-aficionado",
            "Dessert Wine Aficionado",
            WineType::Dessert,
            (L::Low, L::Low, B::Medium, S::Sweet),
            &["berry", "vanilla"],
            [45, 45, 60, 90, 75],
        ),
    ]
};

const FBR: &str = "full-bodied-red-enthusiast";
const MBR: &str = "medium-bodied-red-aficionado";
const SPR: &str = "spiced-red-connoisseur";
const LBR: &str = "light-bodied-red-devotee";
const CAW: &str = "crisp-acidic-white-enthusiast";
const FBW: &str = "full-bodied-white-aficionado";
const ARW: &str = "aromatic-white-connoisseur";
const FFW: &str = "fruit-forward-white-devotee";
const SPK: &str = "sparkling-wine-enthusiast";
const DST: &str = "dessert-wine-aficionado";

/// One (profile, points) award per choice. Strong correlations score 3,
/// standard ones 2, weak ones 1.
const MATRIX: [(&str, [(&str, u8); 4]); QUESTION_COUNT] = [
    ("Coffee", [(FBR, 3), (MBR, 2), (LBR, 2), (FFW, 2)]),
    ("Chocolate", [(SPR, 3), (FBW, 2), (ARW, 2), (DST, 2)]),
    ("Tea", [(FBR, 2), (LBR, 3), (FFW, 2), (ARW, 2)]),
    ("Acidity", [(CAW, 3), (FFW, 2), (MBR, 2), (FBW, 2)]),
    ("Salad Dressing", [(CAW, 2), (SPK, 2), (SPR, 2), (FBW, 3)]),
    ("Morning Drink", [(SPK, 2), (FFW, 3), (ARW, 3), (DST, 2)]),
    ("Meal", [(FBR, 3), (SPR, 2), (LBR, 2), (FBW, 2)]),
    ("Soup", [(CAW, 2), (MBR, 3), (LBR, 2), (ARW, 2)]),
    ("Pasta Sauce", [(FBR, 2), (MBR, 2), (SPR, 3), (CAW, 2)]),
    ("Dessert", [(DST, 2), (ARW, 2), (SPK, 1), (FBW, 2)]),
    ("Drink Sweetness", [(DST, 2), (FFW, 2), (LBR, 2), (SPK, 2)]),
    ("Spice", [(SPR, 2), (MBR, 2), (CAW, 3), (FBR, 2)]),
    ("Flavor Profile", [(ARW, 2), (SPK, 1), (FFW, 2), (FBR, 2)]),
    ("Fruit Type", [(SPR, 2), (DST, 1), (LBR, 3), (CAW, 2)]),
    ("Dining Scenario", [(SPK, 2), (FBW, 2), (MBR, 3), (DST, 1)]),
];

/// The ten built-in taste archetypes, in table order
pub fn standard_profiles() -> Vec<QuizProfile> {
    PROFILES
        .iter()
        .map(
            |&(id, name, wine_type, (acidity, tannins, body_weight, sweetness), notes, dims)| {
                QuizProfile {
                    id: id.to_string(),
                    name: name.to_string(),
                    wine_type,
                    characteristics: ProfileCharacteristics {
                        acidity,
                        tannins,
                        body_weight,
                        sweetness,
                        flavor_notes: notes.iter().map(|n| n.to_string()).collect(),
                    },
                    dimensions: ProfileDimensions {
                        acidity: dims[0],
                        tannins: dims[1],
                        body: dims[2],
                        sweetness: dims[3],
                        intensity: dims[4],
                    },
                }
            },
        )
        .collect()
}

/// Answers shown per question. Only the last question offers the fourth
/// column of its matrix row.
const OFFERED: [usize; QUESTION_COUNT] = [3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 4];

/// The fifteen built-in quiz questions with their scoring rows
pub fn standard_questions() -> Vec<QuizQuestion> {
    MATRIX
        .iter()
        .zip(OFFERED)
        .enumerate()
        .map(|(i, ((topic, choices), offered))| {
            let choices = choices
                .iter()
                .map(|&(profile_id, points)| vec![Award::new(profile_id, points)])
                .collect();
            QuizQuestion::new(i + 1, topic, choices).offering(offered)
        })
        .collect()
}

pub fn approved_flavors() -> Vec<String> {
    APPROVED_FLAVORS.iter().map(|f| f.to_string()).collect()
}
