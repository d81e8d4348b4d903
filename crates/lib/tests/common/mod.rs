#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Scripted AI providers and recording stores shared by the integration tests,
//! so pipeline behavior can be checked without network or database access.

use async_trait::async_trait;
use dotenvy::dotenv;
use std::sync::{Arc, Once, RwLock};
use vitalog::{
    errors::{ProviderError, StoreError},
    extraction::ExtractionEngine,
    providers::{
        ai::{Completion, CompletionProvider, CompletionRequest},
        transcription::TranscriptionProvider,
    },
    store::{FoodStore, HabitStore, InMemoryStore, WorkoutStore},
    types::{
        FoodEntry, HabitCatalogEntry, HabitCompletion, HabitId, ParsedFoodItem,
        ParsedWorkoutItem, Workout,
    },
    Dispatcher,
};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        tracing_subscriber::fmt().with_test_writer().init();
    });
}

/// The completion the end-to-end tests script for
/// "had scrambled eggs for breakfast, ran for 30 minutes, and meditated".
pub const BREAKFAST_RUN_MEDITATE: &str = r#"Here is the extracted data:
```json
{
  "foodEntries": [
    {"name": "Scrambled eggs", "calories": 200, "protein": 14, "description": "Two scrambled eggs", "confidence": 0.85}
  ],
  "workouts": [
    {"name": "Running", "type": "cardio", "duration": 30}
  ],
  "habits": [
    {"name": "meditation", "completed": true}
  ]
}
```"#;

// --- Mock Completion Provider ---

#[derive(Clone, Debug)]
pub struct MockCompletionProvider {
    pub call_history: Arc<RwLock<Vec<CompletionRequest>>>,
    pub responses: Arc<RwLock<Vec<Result<Completion, ProviderError>>>>,
}

impl MockCompletionProvider {
    /// Replies with each text in order, then with an empty JSON object.
    pub fn new(responses: Vec<&str>) -> Self {
        Self::scripted(
            responses
                .into_iter()
                .map(|text| Ok(Completion::text(text)))
                .collect(),
        )
    }

    pub fn scripted(responses: Vec<Result<Completion, ProviderError>>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }

    pub fn calls(&self) -> usize {
        self.call_history.read().unwrap().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.call_history.read().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        self.call_history.write().unwrap().push(request.clone());
        self.responses
            .write()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok(Completion::text("{}")))
    }
}

// --- Mock Transcriber ---

#[derive(Clone, Debug)]
pub struct MockTranscriber {
    pub calls: Arc<RwLock<Vec<(usize, String)>>>,
    pub response: Arc<RwLock<Option<Result<String, ProviderError>>>>,
}

impl MockTranscriber {
    pub fn new(transcript: &str) -> Self {
        Self::replying(Ok(transcript.to_string()))
    }

    pub fn replying(response: Result<String, ProviderError>) -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
            response: Arc::new(RwLock::new(Some(response))),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl TranscriptionProvider for MockTranscriber {
    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<String, ProviderError> {
        self.calls
            .write()
            .unwrap()
            .push((audio.len(), mime_type.to_string()));
        self.response
            .write()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

// --- Recording Store ---

/// Wraps an [`InMemoryStore`], recording every call and optionally failing one operation.
#[derive(Clone, Debug)]
pub struct RecordingStore {
    pub inner: InMemoryStore,
    pub calls: Arc<RwLock<Vec<&'static str>>>,
    pub fail_on: Option<&'static str>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryStore::new(),
            calls: Arc::new(RwLock::new(Vec::new())),
            fail_on: None,
        }
    }

    /// A store whose `operation` always fails with [`StoreError::Unavailable`].
    pub fn failing_on(operation: &'static str) -> Self {
        Self {
            fail_on: Some(operation),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.read().unwrap().clone()
    }

    fn record(&self, operation: &'static str) -> Result<(), StoreError> {
        self.calls.write().unwrap().push(operation);
        if self.fail_on == Some(operation) {
            return Err(StoreError::Unavailable(format!("{operation} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl FoodStore for RecordingStore {
    async fn create_food_entries(
        &self,
        user_id: &str,
        items: &[ParsedFoodItem],
    ) -> Result<Vec<FoodEntry>, StoreError> {
        self.record("create_food_entries")?;
        self.inner.create_food_entries(user_id, items).await
    }
}

#[async_trait]
impl WorkoutStore for RecordingStore {
    async fn create_workouts(
        &self,
        user_id: &str,
        items: &[ParsedWorkoutItem],
    ) -> Result<Vec<Workout>, StoreError> {
        self.record("create_workouts")?;
        self.inner.create_workouts(user_id, items).await
    }
}

#[async_trait]
impl HabitStore for RecordingStore {
    async fn active_habits(&self, user_id: &str) -> Result<Vec<HabitCatalogEntry>, StoreError> {
        self.record("active_habits")?;
        self.inner.active_habits(user_id).await
    }

    async fn complete_habits(
        &self,
        user_id: &str,
        habit_ids: &[HabitId],
    ) -> Result<Vec<HabitCompletion>, StoreError> {
        self.record("complete_habits")?;
        self.inner.complete_habits(user_id, habit_ids).await
    }
}

/// Builds a dispatcher over mocks, using `store` for all three store roles.
pub fn dispatcher(
    transcriber: MockTranscriber,
    completions: MockCompletionProvider,
    store: RecordingStore,
) -> Dispatcher {
    let store = Arc::new(store);
    Dispatcher::new(
        Box::new(transcriber),
        ExtractionEngine::new(Box::new(completions)),
        store.clone(),
        store.clone(),
        store,
    )
}
