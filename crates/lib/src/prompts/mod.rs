//! # Prompt Template Modules
//!
//! This module organizes the prompt templates used by the `vitalog` library.

pub mod extraction;

pub use extraction::{build_extraction_prompt, HEALTH_DATA_EXTRACTION_PROMPT};
