use crate::{
    errors::StoreError,
    store::{FoodStore, HabitStore, WorkoutStore},
    types::{
        FoodEntry, HabitCatalogEntry, HabitCompletion, HabitId, ParsedFoodItem,
        ParsedWorkoutItem, Workout,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    food_entries: Vec<FoodEntry>,
    workouts: Vec<Workout>,
    habits: HashMap<String, Vec<HabitCatalogEntry>>,
    completions: Vec<HabitCompletion>,
}

/// A process-local store implementing every persistence collaborator.
///
/// Cloning shares the underlying tables. Used by the CLI and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an active habit to a user's catalog and returns it.
    pub async fn add_habit(&self, user_id: &str, name: &str) -> HabitCatalogEntry {
        let habit = HabitCatalogEntry {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            active: true,
        };
        self.tables
            .write()
            .await
            .habits
            .entry(user_id.to_string())
            .or_default()
            .push(habit.clone());
        habit
    }

    /// Replaces a user's catalog.
    pub async fn set_habits(&self, user_id: &str, habits: Vec<HabitCatalogEntry>) {
        self.tables
            .write()
            .await
            .habits
            .insert(user_id.to_string(), habits);
    }

    pub async fn food_entries(&self, user_id: &str) -> Vec<FoodEntry> {
        let tables = self.tables.read().await;
        tables
            .food_entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn workouts(&self, user_id: &str) -> Vec<Workout> {
        let tables = self.tables.read().await;
        tables
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn completions(&self, user_id: &str) -> Vec<HabitCompletion> {
        let tables = self.tables.read().await;
        tables
            .completions
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl FoodStore for InMemoryStore {
    async fn create_food_entries(
        &self,
        user_id: &str,
        items: &[ParsedFoodItem],
    ) -> Result<Vec<FoodEntry>, StoreError> {
        let timestamp = Utc::now();
        let entries: Vec<FoodEntry> = items
            .iter()
            .map(|item| FoodEntry {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                name: item.name.clone(),
                calories: item.calories,
                protein: item.protein,
                meal: item.meal,
                description: Some(item.description.clone()).filter(|d| !d.is_empty()),
                analysis_confidence: Some(item.confidence),
                nutrition_breakdown: item.components.clone(),
                timestamp,
            })
            .collect();

        self.tables
            .write()
            .await
            .food_entries
            .extend(entries.iter().cloned());
        info!(user_id, count = entries.len(), "Stored food entries");
        Ok(entries)
    }
}

#[async_trait]
impl WorkoutStore for InMemoryStore {
    async fn create_workouts(
        &self,
        user_id: &str,
        items: &[ParsedWorkoutItem],
    ) -> Result<Vec<Workout>, StoreError> {
        let timestamp = Utc::now();
        let workouts: Vec<Workout> = items
            .iter()
            .map(|item| Workout {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                name: item.name.clone(),
                workout_type: item.workout_type,
                duration: item.duration,
                calories: item.calories,
                completed: true,
                notes: item.notes.clone(),
                timestamp,
            })
            .collect();

        self.tables
            .write()
            .await
            .workouts
            .extend(workouts.iter().cloned());
        info!(user_id, count = workouts.len(), "Stored workouts");
        Ok(workouts)
    }
}

#[async_trait]
impl HabitStore for InMemoryStore {
    async fn active_habits(&self, user_id: &str) -> Result<Vec<HabitCatalogEntry>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .habits
            .get(user_id)
            .map(|habits| habits.iter().filter(|h| h.active).cloned().collect())
            .unwrap_or_default())
    }

    async fn complete_habits(
        &self,
        user_id: &str,
        habit_ids: &[HabitId],
    ) -> Result<Vec<HabitCompletion>, StoreError> {
        let completed_at = Utc::now();
        let date = completed_at.date_naive();
        let mut tables = self.tables.write().await;

        let mut created = Vec::new();
        for habit_id in habit_ids {
            let already_done = tables
                .completions
                .iter()
                .chain(created.iter())
                .any(|c| c.user_id == user_id && &c.habit_id == habit_id && c.date == date);
            if already_done {
                continue;
            }
            created.push(HabitCompletion {
                id: Uuid::new_v4().to_string(),
                habit_id: habit_id.clone(),
                user_id: user_id.to_string(),
                completed_at,
                date,
            });
        }

        tables.completions.extend(created.iter().cloned());
        info!(user_id, count = created.len(), "Stored habit completions");
        Ok(created)
    }
}
