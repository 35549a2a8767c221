pub mod audio;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod events;
pub mod session;
pub mod stats;
pub mod store;
pub mod trials;

pub use audio::{Haptics, Silent, Tone, ToneOutput};
pub use catalog::{RemoteTarget, Stimulus, Theme, REMOTE_TARGETS, STIMULI};
pub use config::{Args, LabConfig, MAX_TRIALS};
pub use events::LabEvent;
pub use session::{
    Collaborators, FeedbackView, LabSnapshot, NoteField, RemoteStep, Screen, SessionController,
    TileView, TrialOutcome, TrialRecord,
};
pub use stats::{Archetype, Rank, SessionStats, SessionSummary};
pub use store::{JsonBestStore, MemoryBestStore, PersonalBestStore};
pub use trials::{TrialGenerator, TILE_COUNT};

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

fn tone_output(config: &LabConfig) -> Arc<dyn ToneOutput> {
    if !config.sound {
        return Arc::new(Silent);
    }

    #[cfg(feature = "audio")]
    let output: Arc<dyn ToneOutput> = Arc::new(audio::AudioEngineHandle::new());

    #[cfg(not(feature = "audio"))]
    let output: Arc<dyn ToneOutput> = {
        log::info!("Built without the `audio` feature; tones are silent");
        Arc::new(Silent)
    };

    output
}

fn best_store(config: &LabConfig) -> Result<Arc<dyn PersonalBestStore>> {
    Ok(match config.best_path() {
        Some(path) => Arc::new(JsonBestStore::new(path)?),
        None => Arc::new(MemoryBestStore::default()),
    })
}

/// Warn by default, then any RUST_LOG directives; `--debug` has the last word.
fn logger(debug: bool, directives: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Warn);
    if let Some(directives) = directives {
        builder.parse_filters(directives);
    }
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder
}

pub fn run() -> Result<()> {
    let config = Args::parse().into_config();

    logger(config.debug, std::env::var("RUST_LOG").ok().as_deref()).init();

    log::info!("Intuition Lab starting up...");

    let collaborators = Collaborators {
        tones: tone_output(&config),
        haptics: Arc::new(cli::TerminalBell::new(config.sound)),
        best_store: best_store(&config)?,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let controller = SessionController::new(&config, collaborators);
        cli::run_terminal(controller).await
    })
}
