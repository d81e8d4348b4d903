//! # Domain Types
//!
//! The normalized shapes produced by the extraction engine and the records
//! returned by the persistence collaborators. All types serialize with
//! camelCase field names so they line up with the JSON the product exposes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of a habit in the user's catalog.
pub type HabitId = String;

// --- Enumerations ---

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Exact, case-sensitive match against the four wire values.
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|meal| meal.as_str() == value)
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Cardio,
    Strength,
    Flexibility,
    Sports,
    Other,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 5] = [
        WorkoutType::Cardio,
        WorkoutType::Strength,
        WorkoutType::Flexibility,
        WorkoutType::Sports,
        WorkoutType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Cardio => "cardio",
            WorkoutType::Strength => "strength",
            WorkoutType::Flexibility => "flexibility",
            WorkoutType::Sports => "sports",
            WorkoutType::Other => "other",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse confidence signal over a whole extraction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParseQuality {
    Low,
    Medium,
    High,
}

impl ParseQuality {
    /// `low` for no items, `high` for three or more, `medium` otherwise.
    pub fn from_item_count(count: usize) -> Self {
        match count {
            0 => ParseQuality::Low,
            1 | 2 => ParseQuality::Medium,
            _ => ParseQuality::High,
        }
    }
}

// --- Extraction output ---

/// Per-component nutrition, exactly as the completion reported it.
pub type NutrientBreakdown = Map<String, Value>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFoodItem {
    pub name: String,
    pub meal: MealType,
    pub calories: u32,
    pub protein: u32,
    pub description: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<NutrientBreakdown>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedWorkoutItem {
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub duration: u32,
    pub calories: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ParsedHabitMention {
    pub name: String,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionMetadata {
    pub total_calories_consumed: u64,
    pub total_protein: u64,
    pub total_calories_burned: u64,
    pub parse_quality: ParseQuality,
}

/// The normalized result of one extraction call.
///
/// The metadata is always derived from the three item lists; construct values
/// through [`ExtractionResult::new`] so it cannot drift.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub food_entries: Vec<ParsedFoodItem>,
    pub workouts: Vec<ParsedWorkoutItem>,
    pub habits: Vec<ParsedHabitMention>,
    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    pub fn new(
        food_entries: Vec<ParsedFoodItem>,
        workouts: Vec<ParsedWorkoutItem>,
        habits: Vec<ParsedHabitMention>,
    ) -> Self {
        let item_count = food_entries.len() + workouts.len() + habits.len();
        let metadata = ExtractionMetadata {
            total_calories_consumed: food_entries.iter().map(|f| u64::from(f.calories)).sum(),
            total_protein: food_entries.iter().map(|f| u64::from(f.protein)).sum(),
            total_calories_burned: workouts.iter().map(|w| u64::from(w.calories)).sum(),
            parse_quality: ParseQuality::from_item_count(item_count),
        };
        Self {
            food_entries,
            workouts,
            habits,
            metadata,
        }
    }

    pub fn item_count(&self) -> usize {
        self.food_entries.len() + self.workouts.len() + self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

// --- Collaborator records ---

/// A habit as stored by the habit collaborator. Read-only to the pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HabitCatalogEntry {
    pub id: HabitId,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    pub meal: MealType,
    pub description: Option<String>,
    pub analysis_confidence: Option<f64>,
    pub nutrition_breakdown: Option<NutrientBreakdown>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub duration: u32,
    pub calories: u32,
    pub completed: bool,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HabitCompletion {
    pub id: String,
    pub habit_id: HabitId,
    pub user_id: String,
    pub completed_at: DateTime<Utc>,
    pub date: NaiveDate,
}
