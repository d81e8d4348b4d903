//! # Extraction Engine
//!
//! Turns a free-form health narrative into an [`ExtractionResult`]:
//!
//! 1.  **Prompting**: the fixed template plus the user's text, sent in exactly
//!     one completion call.
//! 2.  **Parsing**: the first JSON object is recovered from the raw completion.
//! 3.  **Normalization**: every item is sanitized, classified and scored. This
//!     step is total; a missing or malformed field takes its default instead of
//!     failing the extraction.
//!
//! Any failure in steps 1–2 is reported as an AI processing error tagged with
//! the completion service. Retries are the caller's concern.

use crate::{
    classify::{
        calculate_workout_calories, determine_meal_type, resolve_activity, validate_workout_type,
    },
    completion::parse_completion,
    errors::{AiFailure, AiService, PipelineError},
    prompts::build_extraction_prompt,
    providers::ai::{CompletionProvider, CompletionRequest, ContentBlock},
    sanitize::{as_number, round_non_negative, sanitize_optional, sanitize_value},
    types::{
        ExtractionResult, NutrientBreakdown, ParsedFoodItem, ParsedHabitMention,
        ParsedWorkoutItem,
    },
};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

/// Confidence assigned to a food item that does not report one.
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

/// Duration, in minutes, assigned to a workout that does not report one.
pub const DEFAULT_WORKOUT_MINUTES: u32 = 30;

/// Sampling limits for the extraction call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            temperature: 0.2,
        }
    }
}

/// Runs extraction calls against a completion provider.
#[derive(Debug, Clone)]
pub struct ExtractionEngine {
    provider: Box<dyn CompletionProvider>,
    options: ExtractionOptions,
}

impl ExtractionEngine {
    pub fn new(provider: Box<dyn CompletionProvider>) -> Self {
        Self::with_options(provider, ExtractionOptions::default())
    }

    pub fn with_options(provider: Box<dyn CompletionProvider>, options: ExtractionOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> ExtractionOptions {
        self.options
    }

    /// Extracts food, workout and habit items from `text`.
    ///
    /// Makes exactly one completion call. Blank input is rejected before the call.
    pub async fn parse_health_data(&self, text: &str) -> Result<ExtractionResult, PipelineError> {
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let request = CompletionRequest {
            prompt: build_extraction_prompt(text),
            max_tokens: self.options.max_tokens,
            temperature: self.options.temperature,
        };

        debug!(chars = text.len(), "--> Sending extraction prompt to completion provider");
        let raw = self.request_text(&request).await.map_err(|e| {
            error!(error = %e, "AI parsing error");
            PipelineError::ai(AiService::Completion, e)
        })?;
        debug!("<-- Completion from provider: {}", raw);

        let parsed = parse_completion(&raw).map_err(|e| {
            error!(error = %e, "Failed to parse completion response");
            PipelineError::ai(AiService::Completion, e)
        })?;

        let result = normalize(&parsed);
        info!(
            foods = result.food_entries.len(),
            workouts = result.workouts.len(),
            habits = result.habits.len(),
            quality = ?result.metadata.parse_quality,
            "Extracted health data"
        );
        Ok(result)
    }

    /// Issues the completion call and returns the text of its first content block.
    async fn request_text(&self, request: &CompletionRequest) -> Result<String, AiFailure> {
        let completion = self.provider.complete(request).await?;
        match completion.content.into_iter().next() {
            Some(ContentBlock::Text(text)) => Ok(text),
            Some(other) => Err(AiFailure::UnexpectedResponseType(other.kind().to_string())),
            None => Err(AiFailure::UnexpectedResponseType("empty".to_string())),
        }
    }
}

/// Normalizes a parsed completion object into an [`ExtractionResult`].
///
/// Missing or non-array item lists are treated as empty, and non-object items
/// are skipped. Metadata is recomputed from the normalized lists.
pub fn normalize(raw: &Map<String, Value>) -> ExtractionResult {
    let food_entries = items(raw, "foodEntries").map(normalize_food).collect();
    let workouts = items(raw, "workouts").map(normalize_workout).collect();
    let habits = items(raw, "habits").map(normalize_habit).collect();
    ExtractionResult::new(food_entries, workouts, habits)
}

fn items<'a>(
    raw: &'a Map<String, Value>,
    key: &'static str,
) -> impl Iterator<Item = &'a Map<String, Value>> {
    raw.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(move |item| {
            let object = item.as_object();
            if object.is_none() {
                warn!(field = key, "Skipping non-object item in completion");
            }
            object
        })
}

fn normalize_food(entry: &Map<String, Value>) -> ParsedFoodItem {
    let name = sanitize_value(entry.get("name"));
    let description = match sanitize_optional(entry.get("description")) {
        Some(description) => description,
        None => name.clone(),
    };
    let meal = determine_meal_type(
        entry.get("meal").and_then(Value::as_str),
        &name,
        &description,
    );

    ParsedFoodItem {
        meal,
        calories: round_non_negative(as_number(entry.get("calories")).unwrap_or(0.0)),
        protein: round_non_negative(as_number(entry.get("protein")).unwrap_or(0.0)),
        confidence: as_number(entry.get("confidence"))
            .map(|c| c.clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_CONFIDENCE),
        components: components(entry.get("components")),
        name,
        description,
    }
}

fn components(value: Option<&Value>) -> Option<NutrientBreakdown> {
    match value? {
        Value::Object(components) => Some(components.clone()),
        Value::Null => None,
        other => {
            debug!(kind = ?other, "Dropping non-object food components");
            None
        }
    }
}

fn normalize_workout(workout: &Map<String, Value>) -> ParsedWorkoutItem {
    let name = sanitize_value(workout.get("name"));
    let raw_type = workout.get("type").and_then(Value::as_str);

    // Zero and unparseable durations both fall back to the default.
    let duration = match as_number(workout.get("duration")) {
        Some(minutes) if minutes != 0.0 => round_non_negative(minutes).max(1),
        _ => DEFAULT_WORKOUT_MINUTES,
    };

    let activity = resolve_activity(raw_type.unwrap_or_default(), &name);
    let calories =
        calculate_workout_calories(&activity, duration, as_number(workout.get("calories")));

    ParsedWorkoutItem {
        workout_type: validate_workout_type(raw_type),
        duration,
        calories,
        notes: sanitize_optional(workout.get("notes")),
        name,
    }
}

fn normalize_habit(habit: &Map<String, Value>) -> ParsedHabitMention {
    ParsedHabitMention {
        name: sanitize_value(habit.get("name")),
        completed: matches!(habit.get("completed"), Some(Value::Bool(true))),
    }
}
