//! # Configuration Tests
//!
//! `vitalog-cli` is a binary crate, so the config module is included directly
//! from its source file.

#[path = "../src/config.rs"]
mod config;

use self::config::{get_config, ConfigError, GoalDefaults};
use std::env;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Environment variables are process-global; tests that touch them run one at a time.
static ENV_LOCK: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &[
    "VITALOG_USER_ID",
    "VITALOG_COMPLETION__PROVIDER",
    "VITALOG_COMPLETION__MODEL_NAME",
    "VITALOG_COMPLETION__TEMPERATURE",
    "VITALOG_DEFAULTS__CALORIE_GOAL",
    "VITALOG_TEST_COMPLETION_KEY",
    "ANTHROPIC_API_KEY",
    "OPENAI_API_KEY",
];

fn clear_env_vars() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp config");
    file
}

/// Verifies that an empty file yields every default.
#[test]
fn test_defaults_from_empty_file() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    let file = config_file("{}\n");
    let config = get_config(file.path().to_str()).expect("Config should load");

    assert_eq!(config.user_id, "local-user");
    assert_eq!(config.completion.provider, "anthropic");
    assert_eq!(config.completion.model_name, "claude-3-5-sonnet-20241022");
    assert_eq!(config.completion.max_tokens, 2000);
    assert_eq!(config.completion.timeout_secs, 30);
    assert_eq!(config.transcription.model_name, "whisper-1");
    assert_eq!(config.transcription.language, "en");
    assert!(config.habits.is_empty());
    assert_eq!(config.defaults, GoalDefaults::default());
    assert_eq!(config.defaults.calorie_goal, 2000);
}

/// Verifies `${VAR}` substitution and that empty substitutions read as unset.
#[test]
fn test_env_substitution() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("VITALOG_TEST_COMPLETION_KEY", "sk-test");

    let file = config_file(
        r#"
completion:
  provider: local
  api_url: http://localhost:11434/v1/chat/completions
  api_key: ${VITALOG_TEST_COMPLETION_KEY}
transcription:
  api_key: ${OPENAI_API_KEY}
habits:
  - Meditation
  - Drink water
defaults:
  protein_goal: 120
"#,
    );
    let config = get_config(file.path().to_str()).expect("Config should load");

    assert_eq!(config.completion.provider, "local");
    assert_eq!(config.completion.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.transcription.api_key, None);
    assert_eq!(config.habits, vec!["Meditation", "Drink water"]);
    assert_eq!(config.defaults.protein_goal, 120);
    assert_eq!(config.defaults.workout_goal, 5);

    clear_env_vars();
}

/// Verifies that prefixed environment variables override the file.
#[test]
fn test_environment_overrides() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("VITALOG_USER_ID", "alice");
    env::set_var("VITALOG_COMPLETION__MODEL_NAME", "claude-3-5-haiku-20241022");
    env::set_var("VITALOG_DEFAULTS__CALORIE_GOAL", "1800");

    let file = config_file(
        r#"
user_id: bob
completion:
  provider: anthropic
  model_name: claude-3-5-sonnet-20241022
"#,
    );
    let config = get_config(file.path().to_str()).expect("Config should load");

    assert_eq!(config.user_id, "alice");
    assert_eq!(config.completion.model_name, "claude-3-5-haiku-20241022");
    assert_eq!(config.defaults.calorie_goal, 1800);

    clear_env_vars();
}

/// Verifies that an explicit path that does not exist is an error.
#[test]
fn test_missing_explicit_file() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    let result = get_config(Some("/definitely/not/here/vitalog.yml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

/// Verifies that the bundled config.yml loads.
#[test]
fn test_bundled_config() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("ANTHROPIC_API_KEY", "sk-ant-test");

    let config = get_config(None).expect("Bundled config should load");

    assert_eq!(config.completion.api_key.as_deref(), Some("sk-ant-test"));
    assert!(config.habits.iter().any(|h| h == "Meditation"));

    clear_env_vars();
}
