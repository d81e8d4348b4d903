//! # CLI Configuration
//!
//! Loads the `vitalog` configuration in layers:
//!
//! 1.  Programmatic defaults.
//! 2.  A YAML file (`config.yml` next to the crate, or `--config <path>`), with
//!     `${VAR}` placeholders substituted from the environment.
//! 3.  `VITALOG_` prefixed environment variables, using `__` for nesting
//!     (e.g. `VITALOG_COMPLETION__API_KEY`).

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use vitalog::providers::factory::{CompletionSettings, TranscriptionSettings};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    General(String),
    #[error("{0}")]
    NotFound(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// Goal values used when the user has not set their own.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GoalDefaults {
    #[serde(default = "default_calorie_goal")]
    pub calorie_goal: u32,
    #[serde(default = "default_protein_goal")]
    pub protein_goal: u32,
    #[serde(default = "default_workout_goal")]
    pub workout_goal: u32,
}

fn default_calorie_goal() -> u32 {
    2000
}

fn default_protein_goal() -> u32 {
    150
}

fn default_workout_goal() -> u32 {
    5
}

impl Default for GoalDefaults {
    fn default() -> Self {
        Self {
            calorie_goal: default_calorie_goal(),
            protein_goal: default_protein_goal(),
            workout_goal: default_workout_goal(),
        }
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The user id entries are recorded under when `--user` is not given.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub completion: CompletionSettings,
    #[serde(default)]
    pub transcription: TranscriptionSettings,
    /// Habit names seeded into the catalog at startup.
    #[serde(default)]
    pub habits: Vec<String>,
    #[serde(default)]
    pub defaults: GoalDefaults,
}

fn default_user_id() -> String {
    "local-user".to_string()
}

// Reads a file and substitutes `${VAR}` placeholders from the environment.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded.into_owned()))
}

/// Loads the configuration from defaults, an optional file and the environment.
///
/// An explicit `config_path_override` must exist; the default `config.yml` is
/// optional.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults.
        .set_default("user_id", default_user_id())?
        .set_default("completion.provider", "anthropic")?
        .set_default("transcription.model_name", "whisper-1")?;

    // Layer 2: The YAML file.
    match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?
                .ok_or_else(|| ConfigError::NotFound(format!("Config file not found at '{path}'.")))?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            let default_path = format!("{}/config.yml", env!("CARGO_MANIFEST_DIR"));
            if let Some(content) = read_and_substitute(&default_path)? {
                info!("Loading configuration from '{default_path}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            }
        }
    }

    // Layer 3: Prefixed environment variables.
    let settings = builder
        .add_source(
            Environment::with_prefix("VITALOG")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // Empty substitutions come through as empty strings; treat them as unset.
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    config.completion.api_key = non_empty(config.completion.api_key);
    config.completion.api_url = non_empty(config.completion.api_url);
    config.transcription.api_key = non_empty(config.transcription.api_key);
    config.transcription.api_url = non_empty(config.transcription.api_url);

    Ok(config)
}
