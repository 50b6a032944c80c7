use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing::info;

use lingua_store::api::{Fixture, InMemoryApi, LearningApi};
use lingua_store::features::auth::select_is_authenticated;
use lingua_store::features::courses::{select_courses_data, select_courses_error, select_courses_loading};
use lingua_store::features::flashcards::{select_current_card, select_flashcards_data};
use lingua_store::features::lesson::{select_lesson_data, select_lesson_loading, select_lesson_vocabulary};
use lingua_store::features::progress::{select_lesson_completed, select_streak_days, select_xp};
use lingua_store::features::vocabulary::{select_vocabulary_matches, select_vocabulary_query};
use lingua_store::features::writing::{select_current_character, select_stroke_count, select_writing_score};
use lingua_store::features::{self, default_slices};
use lingua_store::{Action, ConfigError, StateTree, Store, StoreConfig, StoreError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON in {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Parser, Debug)]
#[command(name = "lingua-store", about = "Replay actions through the lingua state store")]
struct Cli {
    /// Read mismatched slices as defaults instead of failing.
    #[arg(long)]
    lax: bool,

    /// Override `LINGUA_EFFECT_QUEUE_CAPACITY`.
    #[arg(long)]
    queue_capacity: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dispatch a JSON array of actions and print a state summary.
    Replay {
        #[arg(long)]
        script: PathBuf,
        /// Backend content served to effects; empty when omitted.
        #[arg(long)]
        fixture: Option<PathBuf>,
    },
    /// Print every feature's default slice.
    Defaults,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = StoreConfig::from_env()?;
    if cli.lax {
        config.strict_slices = false;
    }
    if let Some(capacity) = cli.queue_capacity {
        config.effect_queue_capacity = capacity.max(1);
    }

    match cli.command {
        Command::Replay { script, fixture } => run_replay(config, &script, fixture.as_deref()).await,
        Command::Defaults => {
            println!("{}", serde_json::to_string_pretty(&default_slices()?)?);
            Ok(())
        }
    }
}

async fn run_replay(config: StoreConfig, script: &Path, fixture: Option<&Path>) -> Result<(), CliError> {
    let actions: Vec<Action> = read_json(script)?;
    let fixture: Fixture = match fixture {
        Some(path) => read_json(path)?,
        None => Fixture::default(),
    };
    let api: Arc<dyn LearningApi> = Arc::new(InMemoryApi::new(fixture));

    let store = Store::new(config);
    features::install_all(&store, api)?;
    let _queue = store.spawn_queue()?;

    info!(actions = actions.len(), "replaying script");
    for action in actions {
        store.dispatch(action)?;
        store.settled().await;
    }

    println!("{}", serde_json::to_string_pretty(&summary(&store.state()))?);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse { path: path.to_path_buf(), source })
}

fn summary(state: &StateTree) -> Value {
    let lesson = (*select_lesson_data(state)).clone();
    let current_card = (*select_current_card(state)).clone();
    let character = (*select_current_character(state)).clone();
    json!({
        "version": state.version(),
        "authenticated": *select_is_authenticated(state),
        "courses": {
            "count": select_courses_data(state).len(),
            "loading": *select_courses_loading(state),
            "error": *select_courses_error(state),
        },
        "lesson": {
            "title": lesson.map(|l| l.title),
            "vocabulary": select_lesson_vocabulary(state).len(),
            "loading": *select_lesson_loading(state),
            "completed": *select_lesson_completed(state),
        },
        "flashcards": {
            "sets": select_flashcards_data(state).iter().map(|s| s.name.clone()).collect::<Vec<_>>(),
            "current_card": current_card,
        },
        "vocabulary": {
            "query": *select_vocabulary_query(state),
            "matches": select_vocabulary_matches(state).len(),
        },
        "writing": {
            "character": character.map(|c| c.glyph),
            "strokes": *select_stroke_count(state),
            "score": *select_writing_score(state),
        },
        "progress": {
            "xp": *select_xp(state),
            "streak_days": *select_streak_days(state),
        },
    })
}
