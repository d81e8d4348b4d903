//! # Classifier Tests
//!
//! Covers meal-type inference, workout-type validation, activity resolution and
//! the workout calorie estimate.

use vitalog::classify::{
    calculate_workout_calories, calories_per_minute, determine_meal_type, resolve_activity,
    validate_workout_type, DEFAULT_CALORIES_PER_MINUTE,
};
use vitalog::types::{MealType, WorkoutType};

/// Tests that breakfast keywords in the name classify an undeclared meal.
#[test]
fn test_meal_from_keywords() {
    assert_eq!(
        determine_meal_type(None, "eggs and toast", ""),
        MealType::Breakfast
    );
    assert_eq!(
        determine_meal_type(None, "Chicken", "grilled chicken salad"),
        MealType::Lunch
    );
    assert_eq!(
        determine_meal_type(None, "Steak", "Steak for supper"),
        MealType::Dinner
    );
}

/// Tests that a valid declared meal wins over any keyword.
#[test]
fn test_declared_meal_wins() {
    assert_eq!(
        determine_meal_type(Some("lunch"), "pizza", ""),
        MealType::Lunch
    );
    assert_eq!(
        determine_meal_type(Some("dinner"), "breakfast burrito", ""),
        MealType::Dinner
    );
}

/// Tests that invalid declarations fall back to keywords, and no keyword means snack.
#[test]
fn test_meal_fallbacks() {
    // Declared values are matched exactly; "Brunch" is not a meal type.
    assert_eq!(
        determine_meal_type(Some("Brunch"), "pancakes", ""),
        MealType::Breakfast
    );
    assert_eq!(determine_meal_type(None, "apple", ""), MealType::Snack);
    assert_eq!(determine_meal_type(Some(""), "", ""), MealType::Snack);
}

/// Tests that breakfast keywords are checked before later meals.
#[test]
fn test_meal_keyword_order() {
    // "morning" (breakfast) and "sandwich" (lunch) both hit; breakfast is scanned first.
    assert_eq!(
        determine_meal_type(None, "sandwich", "eaten in the morning"),
        MealType::Breakfast
    );
}

#[test]
fn test_validate_workout_type() {
    assert_eq!(validate_workout_type(Some("cardio")), WorkoutType::Cardio);
    assert_eq!(validate_workout_type(Some("strength")), WorkoutType::Strength);
    assert_eq!(validate_workout_type(Some("Cardio")), WorkoutType::Other);
    assert_eq!(validate_workout_type(Some("dance")), WorkoutType::Other);
    assert_eq!(validate_workout_type(None), WorkoutType::Other);
}

/// Tests that the activity key comes from the type first, then from keywords in the name.
#[test]
fn test_resolve_activity() {
    assert_eq!(resolve_activity("yoga", "Morning flow"), "yoga");
    assert_eq!(resolve_activity("cardio", "Running"), "running");
    assert_eq!(resolve_activity("cardio", "Evening bike ride"), "cycling");
    assert_eq!(resolve_activity("strength", "Deadlifts"), "weight training");
    assert_eq!(resolve_activity("sports", "Tennis"), "sports");
    assert_eq!(resolve_activity("", ""), "");

    // Keywords only match at word starts.
    assert_eq!(resolve_activity("strength", "Ab crunches"), "strength");
    assert_eq!(resolve_activity("flexibility", "Spine stretch"), "flexibility");
    assert_eq!(resolve_activity("cardio", "Spinning class"), "cycling");
    assert_eq!(resolve_activity("cardio", "Spin class"), "cycling");
    assert_eq!(resolve_activity("cardio", "Treadmill, ran 5k"), "running");
}

#[test]
fn test_calories_per_minute() {
    assert_eq!(calories_per_minute("running"), 10.0);
    assert_eq!(calories_per_minute("HIIT"), 12.0);
    assert_eq!(calories_per_minute("tennis"), DEFAULT_CALORIES_PER_MINUTE);
}

/// Tests that plausible provided calories are kept and everything else is estimated.
#[test]
fn test_workout_calories() {
    // Plausible value is used, rounded.
    assert_eq!(calculate_workout_calories("running", 30, Some(250.4)), 250);

    // Zero, negative and implausibly large values are replaced by the estimate.
    assert_eq!(calculate_workout_calories("running", 30, Some(0.0)), 300);
    assert_eq!(calculate_workout_calories("running", 30, Some(-50.0)), 300);
    assert_eq!(calculate_workout_calories("running", 30, Some(2000.0)), 300);
    assert_eq!(calculate_workout_calories("running", 30, None), 300);

    // Unknown activities use the default rate.
    assert_eq!(calculate_workout_calories("tennis", 45, None), 225);
    assert_eq!(calculate_workout_calories("yoga", 1, None), 3);
}
