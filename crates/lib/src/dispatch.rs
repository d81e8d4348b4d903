//! # Dispatch Orchestrator
//!
//! The public pipeline surface. [`Dispatcher::transcribe_and_extract`] turns a
//! voice note into a context-shaped view of the extraction, and
//! [`Dispatcher::process_text_input`] extracts from text and optionally writes
//! the results through the store collaborators.
//!
//! Steps run strictly in sequence: transcription, extraction, reconciliation,
//! then creation (food, workouts, habits). Writes are not transactional; a
//! failing habit write leaves earlier food and workout writes in place.

use crate::{
    audio::validate_audio,
    errors::{AiFailure, AiService, PipelineError, StoreError},
    extraction::ExtractionEngine,
    providers::transcription::TranscriptionProvider,
    reconcile::reconcile_habits,
    store::{FoodStore, HabitStore, WorkoutStore},
    types::{
        ExtractionResult, FoodEntry, HabitCompletion, ParsedFoodItem, ParsedHabitMention,
        ParsedWorkoutItem, Workout,
    },
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Confidence reported for a suggested workout.
pub const WORKOUT_SUGGESTION_CONFIDENCE: f64 = 0.9;

/// Message returned when extraction runs without persisting anything.
pub const PREVIEW_MESSAGE: &str = "Text analyzed successfully";

/// Message returned when an auto-create request stored nothing.
pub const NO_DATA_MESSAGE: &str = "No health data detected in your input";

// --- Request context ---

/// Which kind of entry the caller is expecting from a voice note.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionContext {
    Food,
    Workout,
    #[default]
    General,
}

impl FromStr for ExtractionContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(ExtractionContext::Food),
            "workout" => Ok(ExtractionContext::Workout),
            "general" => Ok(ExtractionContext::General),
            other => Err(format!(
                "Unknown context '{other}'. Expected one of: food, workout, general"
            )),
        }
    }
}

impl fmt::Display for ExtractionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExtractionContext::Food => "food",
            ExtractionContext::Workout => "workout",
            ExtractionContext::General => "general",
        })
    }
}

// --- Voice extraction view ---

/// The extraction, shaped for the caller's context.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExtractedView {
    Food {
        confidence: f64,
        #[serde(rename = "suggestedEntry")]
        suggested_entry: ParsedFoodItem,
    },
    Workout {
        confidence: f64,
        #[serde(rename = "suggestedEntry")]
        suggested_entry: ParsedWorkoutItem,
    },
    Mixed {
        #[serde(rename = "foodCount")]
        food_count: usize,
        #[serde(rename = "workoutCount")]
        workout_count: usize,
        #[serde(rename = "habitCount")]
        habit_count: usize,
        data: ExtractionResult,
    },
}

/// A runner-up to the suggested entry, of the same kind.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Alternative {
    Food(ParsedFoodItem),
    Workout(ParsedWorkoutItem),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceExtraction {
    pub transcription: String,
    pub extracted_data: ExtractedView,
    pub alternatives: Vec<Alternative>,
}

/// Builds the context view over an extraction.
///
/// A food or workout context with at least one item of that kind suggests the
/// first item and lists the rest as alternatives. Every other case returns the
/// whole result with per-kind counts.
pub fn shape_extraction(
    result: ExtractionResult,
    context: ExtractionContext,
) -> (ExtractedView, Vec<Alternative>) {
    match context {
        ExtractionContext::Food if !result.food_entries.is_empty() => {
            let mut foods = result.food_entries;
            let first = foods.remove(0);
            (
                ExtractedView::Food {
                    confidence: first.confidence,
                    suggested_entry: first,
                },
                foods.into_iter().map(Alternative::Food).collect(),
            )
        }
        ExtractionContext::Workout if !result.workouts.is_empty() => {
            let mut workouts = result.workouts;
            let first = workouts.remove(0);
            (
                ExtractedView::Workout {
                    confidence: WORKOUT_SUGGESTION_CONFIDENCE,
                    suggested_entry: first,
                },
                workouts.into_iter().map(Alternative::Workout).collect(),
            )
        }
        _ => (mixed_view(result), Vec::new()),
    }
}

fn mixed_view(result: ExtractionResult) -> ExtractedView {
    ExtractedView::Mixed {
        food_count: result.food_entries.len(),
        workout_count: result.workouts.len(),
        habit_count: result.habits.len(),
        data: result,
    }
}

// --- Text input outcome ---

/// A record written by an auto-create request.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum StoredEntry {
    Food(FoodEntry),
    Workout(Workout),
    Habit(HabitCompletion),
}

/// An item detected by a preview request. Nothing was written.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum PreviewEntry {
    Food(ParsedFoodItem),
    Workout(ParsedWorkoutItem),
    Habit(ParsedHabitMention),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum OutcomeEntry {
    Stored(StoredEntry),
    Preview(PreviewEntry),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextInputOutcome {
    pub created_entries: Vec<OutcomeEntry>,
    pub message: String,
}

/// Lists detected items in preview order: foods, workouts, then completed habits.
pub fn summarize_parsed(result: &ExtractionResult) -> Vec<PreviewEntry> {
    let foods = result.food_entries.iter().cloned().map(PreviewEntry::Food);
    let workouts = result.workouts.iter().cloned().map(PreviewEntry::Workout);
    let habits = result
        .habits
        .iter()
        .filter(|h| h.completed)
        .cloned()
        .map(PreviewEntry::Habit);
    foods.chain(workouts).chain(habits).collect()
}

/// Summarizes what an auto-create request stored.
///
/// `"Created 1 food entry and 2 workouts from your voice note"`; a single kind
/// reads `"from your input"`. Nothing stored yields [`NO_DATA_MESSAGE`].
pub fn creation_message(foods: usize, workouts: usize, habits: usize) -> String {
    let mut parts = Vec::new();
    if foods > 0 {
        parts.push(count_noun(foods, "food entry", "food entries"));
    }
    if workouts > 0 {
        parts.push(count_noun(workouts, "workout", "workouts"));
    }
    if habits > 0 {
        parts.push(count_noun(habits, "habit", "habits"));
    }

    let source = if parts.len() > 1 { "voice note" } else { "input" };
    match parts.as_slice() {
        [] => NO_DATA_MESSAGE.to_string(),
        [only] => format!("Created {only} from your {source}"),
        [head @ .., last] => format!("Created {} and {last} from your {source}", head.join(", ")),
    }
}

fn count_noun(count: usize, singular: &str, plural: &str) -> String {
    format!("{count} {}", if count == 1 { singular } else { plural })
}

// --- Orchestrator ---

/// Runs the extraction-and-dispatch pipeline against its collaborators.
///
/// Holds no per-request state; wrap it in an `Arc` to share across tasks.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    transcriber: Box<dyn TranscriptionProvider>,
    engine: ExtractionEngine,
    foods: Arc<dyn FoodStore>,
    workouts: Arc<dyn WorkoutStore>,
    habits: Arc<dyn HabitStore>,
}

impl Dispatcher {
    pub fn new(
        transcriber: Box<dyn TranscriptionProvider>,
        engine: ExtractionEngine,
        foods: Arc<dyn FoodStore>,
        workouts: Arc<dyn WorkoutStore>,
        habits: Arc<dyn HabitStore>,
    ) -> Self {
        Self {
            transcriber,
            engine,
            foods,
            workouts,
            habits,
        }
    }

    pub fn engine(&self) -> &ExtractionEngine {
        &self.engine
    }

    /// Validates and transcribes a voice note, then extracts and shapes the result.
    ///
    /// Invalid audio is rejected before any network call. Nothing is persisted.
    pub async fn transcribe_and_extract(
        &self,
        audio: &[u8],
        mime_type: &str,
        context: Option<ExtractionContext>,
    ) -> Result<VoiceExtraction, PipelineError> {
        validate_audio(audio, mime_type).map_err(|reason| {
            warn!(bytes = audio.len(), mime_type, %reason, "Rejected audio upload");
            PipelineError::InvalidAudio(reason)
        })?;

        debug!(bytes = audio.len(), mime_type, "--> Transcribing voice note");
        let transcription = self
            .transcriber
            .transcribe(audio, mime_type)
            .await
            .map_err(|e| PipelineError::ai(AiService::Transcription, e))?;
        let transcription = transcription.trim().to_string();
        if transcription.is_empty() {
            return Err(PipelineError::ai(
                AiService::Transcription,
                AiFailure::EmptyTranscription,
            ));
        }

        let result = self.engine.parse_health_data(&transcription).await?;

        let context = context.unwrap_or_default();
        let (extracted_data, alternatives) = shape_extraction(result, context);
        info!(%context, alternatives = alternatives.len(), "Processed voice input");

        Ok(VoiceExtraction {
            transcription,
            extracted_data,
            alternatives,
        })
    }

    /// Extracts health data from text and, when `auto_create` is set, stores it.
    ///
    /// Without `auto_create` the detected items are returned and no store is
    /// touched. With it, foods and workouts are written in batches and completed
    /// habit mentions are matched against a freshly read catalog; only matched
    /// habits not already completed today are written. A store failure aborts
    /// the request; earlier writes stay in place and are returned in
    /// [`PipelineError::PartialWrite`].
    pub async fn process_text_input(
        &self,
        user_id: &str,
        text: &str,
        auto_create: bool,
    ) -> Result<TextInputOutcome, PipelineError> {
        let parsed = self.engine.parse_health_data(text).await?;

        if !auto_create {
            let created_entries = summarize_parsed(&parsed)
                .into_iter()
                .map(OutcomeEntry::Preview)
                .collect();
            return Ok(TextInputOutcome {
                created_entries,
                message: PREVIEW_MESSAGE.to_string(),
            });
        }

        let mut created = Vec::new();
        if let Err(source) = self.write_entries(user_id, &parsed, &mut created).await {
            return Err(partial_write(user_id, created, source));
        }

        let food_count = created
            .iter()
            .filter(|e| matches!(e, StoredEntry::Food(_)))
            .count();
        let workout_count = created
            .iter()
            .filter(|e| matches!(e, StoredEntry::Workout(_)))
            .count();
        let habit_count = created
            .iter()
            .filter(|e| matches!(e, StoredEntry::Habit(_)))
            .count();

        let message = creation_message(food_count, workout_count, habit_count);
        info!(
            user_id,
            foods = food_count,
            workouts = workout_count,
            habits = habit_count,
            "Created entries from text input"
        );

        Ok(TextInputOutcome {
            created_entries: created.into_iter().map(OutcomeEntry::Stored).collect(),
            message,
        })
    }

    /// Writes foods, workouts and habit completions in that order, appending
    /// each batch to `created` as soon as it is stored.
    async fn write_entries(
        &self,
        user_id: &str,
        parsed: &ExtractionResult,
        created: &mut Vec<StoredEntry>,
    ) -> Result<(), StoreError> {
        if !parsed.food_entries.is_empty() {
            let foods = self
                .foods
                .create_food_entries(user_id, &parsed.food_entries)
                .await?;
            created.extend(foods.into_iter().map(StoredEntry::Food));
        }

        if !parsed.workouts.is_empty() {
            let workouts = self
                .workouts
                .create_workouts(user_id, &parsed.workouts)
                .await?;
            created.extend(workouts.into_iter().map(StoredEntry::Workout));
        }

        let completions = self.complete_habits(user_id, &parsed.habits).await?;
        created.extend(completions.into_iter().map(StoredEntry::Habit));
        Ok(())
    }

    async fn complete_habits(
        &self,
        user_id: &str,
        mentions: &[ParsedHabitMention],
    ) -> Result<Vec<HabitCompletion>, StoreError> {
        if !mentions.iter().any(|m| m.completed) {
            return Ok(Vec::new());
        }

        let catalog = self.habits.active_habits(user_id).await?;
        let habit_ids = reconcile_habits(mentions, &catalog);
        if habit_ids.is_empty() {
            debug!(user_id, mentions = mentions.len(), "No habit mentions matched the catalog");
            return Ok(Vec::new());
        }

        self.habits.complete_habits(user_id, &habit_ids).await
    }
}

/// Wraps a store failure, keeping whatever was already written.
fn partial_write(user_id: &str, created: Vec<StoredEntry>, source: StoreError) -> PipelineError {
    if created.is_empty() {
        return PipelineError::Store(source);
    }
    warn!(
        user_id,
        written = created.len(),
        error = %source,
        "Store failed after a partial write; earlier entries were kept"
    );
    PipelineError::PartialWrite { created, source }
}
