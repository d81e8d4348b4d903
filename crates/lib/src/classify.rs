//! # Heuristic Classifiers
//!
//! Keyword tables and the pure functions that read them. The tables are plain,
//! ordered data so the matching strategy can be replaced without touching the
//! extraction or dispatch code.

use crate::sanitize::round_non_negative;
use crate::types::{MealType, WorkoutType};

/// Meal keywords, scanned in order. The first meal with a substring hit wins.
pub const MEAL_KEYWORDS: &[(MealType, &[&str])] = &[
    (
        MealType::Breakfast,
        &[
            "breakfast",
            "morning",
            "cereal",
            "eggs",
            "toast",
            "oatmeal",
            "pancakes",
        ],
    ),
    (
        MealType::Lunch,
        &["lunch", "noon", "midday", "sandwich", "salad"],
    ),
    (MealType::Dinner, &["dinner", "evening", "supper", "night"]),
    (MealType::Snack, &["snack", "between", "quick", "bite"]),
];

/// Calorie burn per minute by activity.
pub const WORKOUT_CALORIE_RATES: &[(&str, f64)] = &[
    ("running", 10.0),
    ("walking", 4.0),
    ("cycling", 8.0),
    ("swimming", 11.0),
    ("weight training", 6.0),
    ("yoga", 3.0),
    ("hiit", 12.0),
];

/// Rate used for any activity missing from [`WORKOUT_CALORIE_RATES`].
pub const DEFAULT_CALORIES_PER_MINUTE: f64 = 5.0;

/// Keywords that map a workout description onto a rated activity.
///
/// A keyword only hits at the start of a word, so "run" matches "running"
/// but not "crunches".
pub const ACTIVITY_KEYWORDS: &[(&str, &[&str])] = &[
    ("running", &["run", "ran ", "jog", "sprint"]),
    ("walking", &["walk", "hike", "hiking"]),
    ("cycling", &["cycl", "bike", "biking", "spin ", "spinning"]),
    ("swimming", &["swim", "laps"]),
    ("weight training", &["weight", "lift", "squat", "bench", "deadlift"]),
    ("yoga", &["yoga", "pilates"]),
    ("hiit", &["hiit", "interval", "crossfit", "circuit"]),
];

/// Provided workout calories at or above this are treated as implausible.
pub const MAX_PLAUSIBLE_WORKOUT_CALORIES: f64 = 2000.0;

/// Resolves the meal type for a food item.
///
/// A declared meal that is exactly one of the four wire values is used
/// verbatim. Otherwise the lower-cased `"{name} {description}"` is scanned
/// against [`MEAL_KEYWORDS`]; with no hit the item is a snack.
pub fn determine_meal_type(declared: Option<&str>, name: &str, description: &str) -> MealType {
    if let Some(meal) = declared.and_then(MealType::from_wire) {
        return meal;
    }

    let text = format!("{name} {description}").to_lowercase();
    MEAL_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(meal, _)| *meal)
        .unwrap_or(MealType::Snack)
}

/// Validates a workout type against the closed vocabulary; anything else is `other`.
pub fn validate_workout_type(raw: Option<&str>) -> WorkoutType {
    raw.and_then(WorkoutType::from_wire)
        .unwrap_or(WorkoutType::Other)
}

/// Calories burned per minute for an activity key.
pub fn calories_per_minute(activity: &str) -> f64 {
    let activity = activity.trim().to_lowercase();
    WORKOUT_CALORIE_RATES
        .iter()
        .find(|(name, _)| *name == activity)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_CALORIES_PER_MINUTE)
}

/// Picks the activity key used for the calorie table.
///
/// The raw type is used when it already names a rated activity. Otherwise the
/// first [`ACTIVITY_KEYWORDS`] word-start hit in `"{raw_type} {name}"` wins, and failing
/// that the raw type is returned unchanged (which rates at the default).
pub fn resolve_activity(raw_type: &str, name: &str) -> String {
    let raw = raw_type.trim().to_lowercase();
    if WORKOUT_CALORIE_RATES.iter().any(|(activity, _)| *activity == raw) {
        return raw;
    }

    let text = format!("{raw} {} ", name.to_lowercase());
    ACTIVITY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| starts_word(&text, keyword)))
        .map(|(activity, _)| (*activity).to_string())
        .unwrap_or(raw)
}

/// True when `keyword` occurs in `text` at the start of a word.
fn starts_word(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(at, _)| {
        text[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

/// Estimates calories burned by a workout.
///
/// A provided value strictly between 0 and 2000 is kept (rounded); otherwise
/// the estimate is `duration * calories_per_minute(activity)`, rounded.
pub fn calculate_workout_calories(activity: &str, duration: u32, provided: Option<f64>) -> u32 {
    match provided {
        Some(calories) if calories > 0.0 && calories < MAX_PLAUSIBLE_WORKOUT_CALORIES => {
            round_non_negative(calories)
        }
        _ => round_non_negative(f64::from(duration) * calories_per_minute(activity)),
    }
}
