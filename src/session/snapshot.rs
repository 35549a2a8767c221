use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{RemoteTarget, Stimulus, Theme};
use crate::stats::{summarize, SessionSummary};
use crate::trials::TILE_COUNT;

use super::record::TrialRecord;
use super::remote::RemoteStep;
use super::state::{Screen, SessionState};

const DECOY_CUE_OPACITY: f64 = 0.15;
const STREAK_BADGE_FROM: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    pub cue_opacity: f64,
    pub streak_badge: Option<u32>,
    pub drifting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    pub correct: bool,
    pub target_index: usize,
    pub selected_index: Option<usize>,
    pub stimulus: Option<Stimulus>,
    /// The next step finalizes the session instead of starting another trial.
    pub session_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteViewingView {
    pub coordinate: String,
    pub step: RemoteStep,
    pub step_index: u8,
    pub sensory_notes: String,
    pub sound_notes: String,
    pub overlay_notes: String,
    pub target: Option<RemoteTarget>,
    pub started_at: DateTime<Utc>,
}

/// Read-only projection of the session for one render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabSnapshot {
    pub screen: Screen,
    pub theme: Theme,
    /// One-based number of the trial on screen.
    pub trial_number: usize,
    pub max_trials: usize,
    pub hits: u32,
    pub streak: u32,
    pub confidence: f64,
    pub personal_best: u32,
    pub milestone: Option<&'static str>,
    pub soundscape_enabled: bool,
    pub drift_enabled: bool,
    pub tiles: Option<[TileView; TILE_COUNT]>,
    pub feedback: Option<FeedbackView>,
    pub summary: Option<SessionSummary>,
    pub remote_viewing: Option<RemoteViewingView>,
    pub session_started_at: Option<DateTime<Utc>>,
    /// Set once the session reaches the summary.
    pub session_seconds: Option<i64>,
}

impl LabSnapshot {
    pub fn capture(state: &SessionState) -> Self {
        let tiles = (state.screen == Screen::Exercise).then(|| tile_views(state));
        let feedback = (state.screen == Screen::Feedback).then(|| feedback_view(state));
        let summary = (state.screen == Screen::Summary)
            .then(|| summarize(state.history.records(), state.max_trials));
        let remote_viewing = match (state.screen, state.remote.as_ref()) {
            (Screen::RemoteViewing, Some(remote)) => Some(RemoteViewingView {
                coordinate: remote.coordinate.clone(),
                step: remote.step,
                step_index: remote.step.index(),
                sensory_notes: remote.sensory_notes.clone(),
                sound_notes: remote.sound_notes.clone(),
                overlay_notes: remote.overlay_notes.clone(),
                target: remote.revealed_target().copied(),
                started_at: remote.started_at,
            }),
            _ => None,
        };

        Self {
            screen: state.screen,
            theme: state.theme,
            trial_number: (state.trial_index() + 1).min(state.max_trials),
            max_trials: state.max_trials,
            hits: state.hits,
            streak: state.streak,
            confidence: state.confidence,
            personal_best: state.personal_best,
            milestone: state.milestone,
            soundscape_enabled: state.soundscape_enabled,
            drift_enabled: state.drift_enabled,
            tiles,
            feedback,
            summary,
            remote_viewing,
            session_started_at: state.session_started_at,
            session_seconds: state.session_seconds(),
        }
    }
}

fn tile_views(state: &SessionState) -> [TileView; TILE_COUNT] {
    std::array::from_fn(|i| {
        let is_target = i == state.target_index;
        TileView {
            cue_opacity: if is_target {
                state.target_cue_opacity()
            } else {
                DECOY_CUE_OPACITY
            },
            streak_badge: (is_target && state.streak >= STREAK_BADGE_FROM).then_some(state.streak),
            drifting: state.drift_enabled,
        }
    })
}

fn feedback_view(state: &SessionState) -> FeedbackView {
    let stimulus = match state.history.last() {
        Some(TrialRecord::Choice { stimulus, .. }) => Some(**stimulus),
        _ => None,
    };
    FeedbackView {
        correct: state.selected_index == Some(state.target_index),
        target_index: state.target_index,
        selected_index: state.selected_index,
        stimulus,
        session_complete: state.is_complete(),
    }
}
