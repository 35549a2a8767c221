use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::catalog::Theme;

pub const MAX_TRIALS: usize = 24;

const DEFAULT_CALIBRATION_MS: u64 = 4000;
const BEST_FILE_NAME: &str = "personal_best.json";

/// Runtime settings for a lab session.
#[derive(Debug, Clone)]
pub struct LabConfig {
    /// Pause on the calibration screen before each trial
    pub calibration_delay: Duration,

    /// Choice-or-pass records that complete a session
    pub max_trials: usize,

    pub theme: Theme,

    /// Play chimes and the soundscape through the audio device
    pub sound: bool,

    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,

    /// Directory holding the personal best; `None` keeps it in memory only
    pub data_dir: Option<PathBuf>,

    pub debug: bool,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            calibration_delay: Duration::from_millis(DEFAULT_CALIBRATION_MS),
            max_trials: MAX_TRIALS,
            theme: Theme::Warm,
            sound: true,
            seed: None,
            data_dir: None,
            debug: false,
        }
    }
}

impl LabConfig {
    pub fn best_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join(BEST_FILE_NAME))
    }
}

/// Command-line flags for the terminal lab.
#[derive(Debug, Parser)]
#[command(name = "intuition-lab", version, about = "Intuition training in the terminal")]
pub struct Args {
    /// Where the personal best is kept
    #[arg(long, env = "INTUITION_LAB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep the personal best in memory only
    #[arg(long, conflicts_with = "data_dir")]
    pub ephemeral: bool,

    /// Wording theme: clinical or warm
    #[arg(long, default_value = "warm")]
    pub theme: Theme,

    /// Calibration pause before each trial, in milliseconds
    #[arg(long, default_value_t = DEFAULT_CALIBRATION_MS)]
    pub calibration_ms: u64,

    /// Seed for reproducible targets and coordinates
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable tones and the soundscape
    #[arg(long)]
    pub mute: bool,

    /// Verbose logging (also INTUITION_LAB_DEBUG=1)
    #[arg(long)]
    pub debug: bool,
}

fn debug_from_env() -> bool {
    std::env::var("INTUITION_LAB_DEBUG")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

impl Args {
    pub fn into_config(self) -> LabConfig {
        let data_dir = if self.ephemeral {
            None
        } else {
            Some(self.data_dir.unwrap_or_else(default_data_dir))
        };

        LabConfig {
            calibration_delay: Duration::from_millis(self.calibration_ms),
            max_trials: MAX_TRIALS,
            theme: self.theme,
            sound: !self.mute,
            seed: self.seed,
            data_dir,
            debug: self.debug || debug_from_env(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".intuition-lab")
}
