//! # Persistence Collaborators
//!
//! The pipeline writes through these traits and never sees the storage schema.
//! Errors are returned as [`StoreError`] and passed to the caller untouched.

pub mod memory;

use crate::{
    errors::StoreError,
    types::{
        FoodEntry, HabitCatalogEntry, HabitCompletion, HabitId, ParsedFoodItem,
        ParsedWorkoutItem, Workout,
    },
};
use async_trait::async_trait;
use std::fmt::Debug;

pub use memory::InMemoryStore;

/// Batch creation of food entries.
#[async_trait]
pub trait FoodStore: Send + Sync + Debug {
    /// Persists the items in order and returns the stored records.
    async fn create_food_entries(
        &self,
        user_id: &str,
        items: &[ParsedFoodItem],
    ) -> Result<Vec<FoodEntry>, StoreError>;
}

/// Batch creation of workouts.
#[async_trait]
pub trait WorkoutStore: Send + Sync + Debug {
    /// Persists the items in order as completed workouts and returns the stored records.
    async fn create_workouts(
        &self,
        user_id: &str,
        items: &[ParsedWorkoutItem],
    ) -> Result<Vec<Workout>, StoreError>;
}

/// Read access to the habit catalog plus completion writes.
#[async_trait]
pub trait HabitStore: Send + Sync + Debug {
    /// The user's active habits, in catalog order.
    async fn active_habits(&self, user_id: &str) -> Result<Vec<HabitCatalogEntry>, StoreError>;

    /// Marks habits completed for today.
    ///
    /// Returns only the completions that were newly created; habits already
    /// completed today are skipped.
    async fn complete_habits(
        &self,
        user_id: &str,
        habit_ids: &[HabitId],
    ) -> Result<Vec<HabitCompletion>, StoreError>;
}
