//! # In-Memory Store Tests

use serde_json::json;
use std::collections::HashSet;
use vitalog::store::{FoodStore, HabitStore, InMemoryStore, WorkoutStore};
use vitalog::types::{
    HabitCatalogEntry, MealType, ParsedFoodItem, ParsedWorkoutItem, WorkoutType,
};

fn oatmeal() -> ParsedFoodItem {
    ParsedFoodItem {
        name: "Oatmeal".to_string(),
        meal: MealType::Breakfast,
        calories: 150,
        protein: 5,
        description: "Oatmeal with berries".to_string(),
        confidence: 0.8,
        components: None,
    }
}

fn run() -> ParsedWorkoutItem {
    ParsedWorkoutItem {
        name: "Running".to_string(),
        workout_type: WorkoutType::Cardio,
        duration: 30,
        calories: 300,
        notes: None,
    }
}

/// Tests that batch creation assigns unique ids and keeps the parsed values.
#[tokio::test]
async fn test_creates_records_with_ids() {
    let store = InMemoryStore::new();

    let foods = store
        .create_food_entries("user-1", &[oatmeal(), oatmeal()])
        .await
        .unwrap();
    let mut with_components = oatmeal();
    with_components.components = json!({"oats": {"calories": 110, "fiber": 4}})
        .as_object()
        .cloned();
    let breakdown = store
        .create_food_entries("user-3", &[with_components.clone()])
        .await
        .unwrap();
    assert_eq!(breakdown[0].nutrition_breakdown, with_components.components);

    let workouts = store.create_workouts("user-1", &[run()]).await.unwrap();

    assert_eq!(foods.len(), 2);
    assert_ne!(foods[0].id, foods[1].id);
    assert_eq!(foods[0].user_id, "user-1");
    assert_eq!(foods[0].analysis_confidence, Some(0.8));
    assert_eq!(foods[0].description.as_deref(), Some("Oatmeal with berries"));

    assert_eq!(workouts.len(), 1);
    assert!(workouts[0].completed);
    assert_eq!(workouts[0].calories, 300);

    assert_eq!(store.food_entries("user-1").await.len(), 2);
    assert!(store.food_entries("user-2").await.is_empty());
    assert_eq!(store.workouts("user-1").await, workouts);
}

/// Tests that only active habits of the requested user are listed.
#[tokio::test]
async fn test_active_habits_per_user() {
    let store = InMemoryStore::new();
    let water = store.add_habit("user-1", "Drink water").await;
    store.add_habit("user-2", "Meditation").await;

    assert_eq!(store.active_habits("user-1").await.unwrap(), vec![water.clone()]);
    assert!(store.active_habits("nobody").await.unwrap().is_empty());

    store
        .set_habits(
            "user-1",
            vec![
                water.clone(),
                HabitCatalogEntry {
                    id: "old".to_string(),
                    name: "Old habit".to_string(),
                    active: false,
                },
            ],
        )
        .await;
    assert_eq!(store.active_habits("user-1").await.unwrap(), vec![water]);
}

/// Tests that a habit is completed at most once per day.
#[tokio::test]
async fn test_completions_once_per_day() {
    let store = InMemoryStore::new();
    let water = store.add_habit("user-1", "Drink water").await;
    let vitamins = store.add_habit("user-1", "Vitamins").await;

    let first = store
        .complete_habits("user-1", &[water.id.clone(), water.id.clone()])
        .await
        .unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].habit_id, water.id);
    assert_eq!(first[0].date, first[0].completed_at.date_naive());

    let second = store
        .complete_habits("user-1", &[water.id.clone(), vitamins.id.clone()])
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].habit_id, vitamins.id);

    // Another user completing the same habit id is tracked separately.
    let other = store.complete_habits("user-2", &[water.id.clone()]).await.unwrap();
    assert_eq!(other.len(), 1);

    let ids: HashSet<_> = store
        .completions("user-1")
        .await
        .into_iter()
        .map(|c| c.habit_id)
        .collect();
    assert_eq!(ids, HashSet::from([water.id, vitamins.id]));
}
