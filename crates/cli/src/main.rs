//! # vitalog: log meals, workouts and habits from plain language
//!
//! This is the entry point for the `vitalog` command-line interface. Results are
//! printed to stdout as JSON; logs go to stderr (filtered by `RUST_LOG`).

mod config;

use self::config::{get_config, AppConfig, GoalDefaults};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vitalog::{
    audio::mime_from_path,
    dispatch::StoredEntry,
    providers::factory::{create_completion_provider, create_transcription_provider},
    Dispatcher, ExtractionContext, ExtractionEngine, ExtractionOptions, InMemoryStore,
    PipelineError,
};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a YAML config file (defaults to the bundled config.yml)
    #[arg(long, global = true, env = "VITALOG_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract entries from text and record them
    Text(TextArgs),
    /// Transcribe a voice note and show what it contains
    Audio(AudioArgs),
    /// Extract entries from text without recording anything
    Parse(ParseArgs),
}

#[derive(Parser, Debug)]
struct TextArgs {
    /// What you ate, did or completed, in your own words
    utterance: String,
    /// Record entries under this user id instead of the configured one
    #[arg(long)]
    user: Option<String>,
    /// Show what would be recorded without recording it
    #[arg(long)]
    preview: bool,
}

#[derive(Parser, Debug)]
struct AudioArgs {
    /// Path to the audio file
    file: PathBuf,
    /// Mime type of the audio; guessed from the extension when omitted
    #[arg(long)]
    mime: Option<String>,
    /// The kind of entry you expect: food, workout or general
    #[arg(long)]
    context: Option<ExtractionContext>,
}

#[derive(Parser, Debug)]
struct ParseArgs {
    /// The text to analyze
    utterance: String,
}

// --- Output ---

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct DailyProgress {
    calories_consumed: u64,
    calorie_goal: u32,
    protein_consumed: u64,
    protein_goal: u32,
    workouts_completed: usize,
    workout_goal: u32,
}

#[derive(Serialize, Debug)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {e}");
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let mut created: &[StoredEntry] = &[];
            let body = match e.downcast_ref::<PipelineError>() {
                Some(pipeline_error) => {
                    if let PipelineError::PartialWrite { created: written, .. } = pipeline_error {
                        created = written.as_slice();
                    }
                    ErrorBody {
                        code: pipeline_error.code(),
                        message: pipeline_error.to_string(),
                    }
                }
                None => ErrorBody {
                    code: "CLI_ERROR",
                    message: format!("{e:#}"),
                },
            };
            eprintln!(
                "{}",
                serde_json::json!({ "error": body, "createdEntries": created })
            );
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = get_config(cli.config.as_deref())?;
    let store = seeded_store(&config).await;
    let dispatcher = build_dispatcher(&config, store.clone())?;

    match cli.command {
        Commands::Text(args) => handle_text(&dispatcher, &store, &config, args).await,
        Commands::Audio(args) => handle_audio(&dispatcher, args).await,
        Commands::Parse(args) => {
            let result = dispatcher.engine().parse_health_data(&args.utterance).await?;
            print_json(&result)
        }
    }
}

/// Creates the store and seeds the configured habits for the configured user.
async fn seeded_store(config: &AppConfig) -> InMemoryStore {
    let store = InMemoryStore::new();
    for habit in &config.habits {
        store.add_habit(&config.user_id, habit).await;
    }
    info!(user_id = %config.user_id, habits = config.habits.len(), "Seeded habit catalog");
    store
}

fn build_dispatcher(config: &AppConfig, store: InMemoryStore) -> Result<Dispatcher> {
    let completion = create_completion_provider(&config.completion)
        .context("Failed to configure the completion provider")?;
    let transcription = create_transcription_provider(&config.transcription)
        .context("Failed to configure the transcription provider")?;

    let engine = ExtractionEngine::with_options(
        completion,
        ExtractionOptions {
            max_tokens: config.completion.max_tokens,
            temperature: config.completion.temperature,
        },
    );
    let store = Arc::new(store);
    Ok(Dispatcher::new(
        transcription,
        engine,
        store.clone(),
        store.clone(),
        store,
    ))
}

// --- Command Handlers ---

async fn handle_text(
    dispatcher: &Dispatcher,
    store: &InMemoryStore,
    config: &AppConfig,
    args: TextArgs,
) -> Result<()> {
    let user_id = args.user.unwrap_or_else(|| config.user_id.clone());
    if user_id != config.user_id {
        for habit in &config.habits {
            store.add_habit(&user_id, habit).await;
        }
    }

    let outcome = dispatcher
        .process_text_input(&user_id, &args.utterance, !args.preview)
        .await?;

    if args.preview {
        return print_json(&outcome);
    }

    let progress = daily_progress(store, &user_id, &config.defaults).await;
    print_json(&serde_json::json!({
        "createdEntries": outcome.created_entries,
        "message": outcome.message,
        "progress": progress,
    }))
}

async fn daily_progress(store: &InMemoryStore, user_id: &str, goals: &GoalDefaults) -> DailyProgress {
    let foods = store.food_entries(user_id).await;
    let workouts = store.workouts(user_id).await;
    DailyProgress {
        calories_consumed: foods.iter().map(|f| u64::from(f.calories)).sum(),
        calorie_goal: goals.calorie_goal,
        protein_consumed: foods.iter().map(|f| u64::from(f.protein)).sum(),
        protein_goal: goals.protein_goal,
        workouts_completed: workouts.iter().filter(|w| w.completed).count(),
        workout_goal: goals.workout_goal,
    }
}

async fn handle_audio(dispatcher: &Dispatcher, args: AudioArgs) -> Result<()> {
    let mime_type = match args.mime {
        Some(mime) => mime,
        None => mime_from_path(&args.file)
            .map(str::to_string)
            .ok_or_else(|| {
                anyhow!(
                    "Cannot guess the audio type of '{}'; pass --mime",
                    args.file.display()
                )
            })?,
    };
    let audio = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read '{}'", args.file.display()))?;

    let voice = dispatcher
        .transcribe_and_extract(&audio, &mime_type, args.context)
        .await?;
    print_json(&voice)
}
