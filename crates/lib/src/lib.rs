//! # Vitalog
//!
//! This crate turns spoken or typed health narratives ("had oatmeal for breakfast,
//! ran 5k, took my vitamins") into typed food, workout and habit records.
//!
//! The pipeline has four stages:
//!
//! 1.  **Transcription** of a voice note through a [`TranscriptionProvider`].
//! 2.  **Extraction** of food, workout and habit items with one completion call
//!     ([`ExtractionEngine`]), followed by sanitization and heuristic
//!     classification of every item.
//! 3.  **Reconciliation** of habit mentions against the user's stored habits.
//! 4.  **Dispatch** of the results to the store collaborators ([`Dispatcher`]).
//!
//! The AI and storage collaborators are traits; reqwest-based providers and an
//! in-memory store ship with the crate.
//!
//! [`TranscriptionProvider`]: providers::transcription::TranscriptionProvider

pub mod audio;
pub mod classify;
pub mod completion;
pub mod dispatch;
pub mod errors;
pub mod extraction;
pub mod prompts;
pub mod providers;
pub mod reconcile;
pub mod sanitize;
pub mod store;
pub mod types;

pub use dispatch::{
    Dispatcher, ExtractedView, ExtractionContext, TextInputOutcome, VoiceExtraction,
};
pub use errors::{AiFailure, AiService, PipelineError, ProviderError, StoreError};
pub use extraction::{ExtractionEngine, ExtractionOptions};
pub use store::{FoodStore, HabitStore, InMemoryStore, WorkoutStore};
pub use types::{ExtractionResult, HabitCatalogEntry, MealType, ParseQuality, WorkoutType};
