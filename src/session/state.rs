use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

use crate::catalog::{stimulus_for, Stimulus, Theme};
use crate::trials::TILE_COUNT;

use super::record::{History, TrialRecord};
use super::remote::RemoteViewingSession;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    Intro,
    Calibration,
    Exercise,
    Feedback,
    Summary,
    RemoteViewing,
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Intro
    }
}

/// What a tile selection did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialOutcome {
    pub correct: bool,
    pub target_index: usize,
    pub selected_index: usize,
    pub hits: u32,
    pub streak: u32,
    pub milestone: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub screen: Screen,
    pub theme: Theme,
    pub target_index: usize,
    pub selected_index: Option<usize>,
    pub confidence: f64,
    pub hits: u32,
    pub streak: u32,
    pub personal_best: u32,
    pub milestone: Option<&'static str>,
    pub soundscape_enabled: bool,
    pub drift_enabled: bool,
    pub max_trials: usize,
    pub history: History,
    pub session_started_at: Option<DateTime<Utc>>,
    pub session_finished_at: Option<DateTime<Utc>>,
    pub remote: Option<RemoteViewingSession>,
    /// Identity of the calibration timer allowed to open the next trial.
    pub pending_calibration: Option<Uuid>,
    pub trial_anchor: Option<Instant>,
    pub soundscape_playing: bool,
}

impl SessionState {
    /// A session always has room for at least one trial.
    pub fn new(max_trials: usize, theme: Theme, personal_best: u32) -> Self {
        Self {
            screen: Screen::Intro,
            theme,
            target_index: 0,
            selected_index: None,
            confidence: 0.5,
            hits: 0,
            streak: 0,
            personal_best,
            milestone: None,
            soundscape_enabled: false,
            drift_enabled: false,
            max_trials: max_trials.max(1),
            history: History::new(),
            session_started_at: None,
            session_finished_at: None,
            remote: None,
            pending_calibration: None,
            trial_anchor: None,
            soundscape_playing: false,
        }
    }

    /// Zero-based index of the trial being played; equals records so far.
    pub fn trial_index(&self) -> usize {
        self.history.len()
    }

    pub fn is_complete(&self) -> bool {
        self.history.len() >= self.max_trials
    }

    pub fn begin_calibration(&mut self, calibration_id: Uuid) {
        if self.session_started_at.is_none() {
            self.session_started_at = Some(Utc::now());
        }
        self.screen = Screen::Calibration;
        self.pending_calibration = Some(calibration_id);
        self.trial_anchor = None;
    }

    /// True when `calibration_id` is still the timer this screen is waiting on.
    pub fn awaits_calibration(&self, calibration_id: Uuid) -> bool {
        self.screen == Screen::Calibration && self.pending_calibration == Some(calibration_id)
    }

    pub fn begin_trial(&mut self, target_index: usize, now: Instant) {
        self.target_index = target_index;
        self.selected_index = None;
        self.pending_calibration = None;
        self.trial_anchor = Some(now);
        self.screen = Screen::Exercise;
    }

    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        self.trial_anchor
            .map(|anchor| now.saturating_duration_since(anchor).as_secs_f64())
            .unwrap_or(0.0)
    }

    pub fn current_stimulus(&self, catalog: &'static [Stimulus]) -> &'static Stimulus {
        stimulus_for(catalog, self.trial_index())
    }

    pub fn set_confidence(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            bail!("confidence must be a number between 0 and 1");
        }
        self.confidence = value.clamp(0.0, 1.0);
        Ok(())
    }

    pub fn record_choice(
        &mut self,
        selected_index: usize,
        now: Instant,
        catalog: &'static [Stimulus],
    ) -> Result<TrialOutcome> {
        if self.screen != Screen::Exercise {
            bail!("no trial is waiting for a selection");
        }
        if selected_index >= TILE_COUNT {
            bail!("tile {selected_index} does not exist (expected 0..{TILE_COUNT})");
        }

        let record = TrialRecord::choice(
            self.target_index,
            selected_index,
            self.confidence,
            self.elapsed_secs(now),
            self.current_stimulus(catalog),
        );
        let correct = record.is_hit();
        self.history.append(record);
        self.selected_index = Some(selected_index);
        self.trial_anchor = None;

        self.milestone = None;
        if correct {
            self.hits += 1;
            self.streak += 1;
            self.milestone = self.theme.copy().milestone(self.hits);
        } else {
            self.streak = 0;
        }
        self.screen = Screen::Feedback;

        Ok(TrialOutcome {
            correct,
            target_index: self.target_index,
            selected_index,
            hits: self.hits,
            streak: self.streak,
            milestone: self.milestone,
        })
    }

    /// Skips the trial; hits and streak are left alone.
    pub fn record_pass(&mut self, now: Instant) -> Result<()> {
        if self.screen != Screen::Exercise {
            bail!("no trial to pass on");
        }
        let latency = self.elapsed_secs(now);
        self.history.append(TrialRecord::pass(latency));
        self.trial_anchor = None;
        Ok(())
    }

    /// Moves to the summary. Returns the new personal best when this session beat it.
    pub fn finalize(&mut self) -> Option<u32> {
        self.milestone = None;
        self.pending_calibration = None;
        self.trial_anchor = None;
        self.session_finished_at = Some(Utc::now());
        self.screen = Screen::Summary;
        if self.hits > self.personal_best {
            self.personal_best = self.hits;
            Some(self.hits)
        } else {
            None
        }
    }

    /// Back to the intro with an empty session. Theme, toggles, confidence and the
    /// personal best carry over.
    pub fn reset(&mut self) {
        self.history.clear();
        self.hits = 0;
        self.streak = 0;
        self.milestone = None;
        self.selected_index = None;
        self.session_started_at = None;
        self.session_finished_at = None;
        self.pending_calibration = None;
        self.trial_anchor = None;
        self.remote = None;
        self.screen = Screen::Intro;
    }

    /// Whole seconds from the first calibration to the summary.
    pub fn session_seconds(&self) -> Option<i64> {
        match (self.session_started_at, self.session_finished_at) {
            (Some(start), Some(end)) => Some((end - start).num_seconds().max(0)),
            _ => None,
        }
    }

    pub fn soundscape_should_play(&self) -> bool {
        self.soundscape_enabled && self.screen == Screen::Exercise
    }

    /// Opacity of the target's cue; fades as the streak grows.
    pub fn target_cue_opacity(&self) -> f64 {
        (0.4 - self.streak as f64 * 0.1).max(0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::STIMULI;
    use std::time::Duration;

    fn exercising(target: usize) -> SessionState {
        let mut state = SessionState::new(24, Theme::Warm, 0);
        state.begin_calibration(Uuid::new_v4());
        state.begin_trial(target, Instant::now());
        state
    }

    fn play(state: &mut SessionState, selected: usize) -> TrialOutcome {
        let outcome = state
            .record_choice(selected, Instant::now(), &STIMULI)
            .unwrap();
        let id = Uuid::new_v4();
        state.begin_calibration(id);
        state.begin_trial(state.target_index, Instant::now());
        outcome
    }

    #[test]
    fn streak_follows_hits_and_resets_on_miss() {
        let mut state = exercising(1);
        let streaks: Vec<u32> = [1, 1, 0, 1]
            .into_iter()
            .map(|selected| play(&mut state, selected).streak)
            .collect();
        assert_eq!(streaks, vec![1, 2, 0, 1]);
        assert_eq!(state.hits, 3);
        assert_eq!(state.hits, state.history.hit_count());
    }

    #[test]
    fn pass_leaves_score_untouched() {
        let mut state = exercising(2);
        play(&mut state, 2);
        state.record_pass(Instant::now()).unwrap();
        assert_eq!(state.hits, 1);
        assert_eq!(state.streak, 1);
        assert_eq!(state.history.len(), 2);
        assert!(!state.history.records()[1].is_hit());
    }

    #[test]
    fn selection_outside_exercise_is_rejected() {
        let mut state = SessionState::new(24, Theme::Warm, 0);
        assert!(state.record_choice(0, Instant::now(), &STIMULI).is_err());
        assert!(state.record_pass(Instant::now()).is_err());

        let mut state = exercising(0);
        assert!(state.record_choice(4, Instant::now(), &STIMULI).is_err());
        assert!(state.history.is_empty());
    }

    #[test]
    fn latency_measures_from_trial_start() {
        let mut state = SessionState::new(24, Theme::Warm, 0);
        let start = Instant::now();
        state.begin_calibration(Uuid::new_v4());
        state.begin_trial(3, start);
        state
            .record_choice(3, start + Duration::from_millis(1500), &STIMULI)
            .unwrap();
        let latency = state.history.last().map(|r| r.latency_seconds());
        assert_eq!(latency, Some(1.5));
    }

    #[test]
    fn stale_calibration_is_not_awaited() {
        let mut state = SessionState::new(24, Theme::Warm, 0);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        state.begin_calibration(first);
        state.begin_calibration(second);
        assert!(!state.awaits_calibration(first));
        assert!(state.awaits_calibration(second));
        state.reset();
        assert!(!state.awaits_calibration(second));
    }

    #[test]
    fn milestone_banner_on_sixth_hit() {
        let mut state = exercising(0);
        for _ in 0..5 {
            assert_eq!(play(&mut state, 0).milestone, None);
        }
        let sixth = play(&mut state, 0);
        assert_eq!(sixth.milestone, Some("You're beginning to tune in."));
    }

    #[test]
    fn finalize_reports_only_a_beaten_best() {
        let mut state = SessionState::new(24, Theme::Warm, 5);
        state.hits = 5;
        assert_eq!(state.finalize(), None);
        assert_eq!(state.personal_best, 5);

        let mut state = SessionState::new(24, Theme::Warm, 5);
        state.hits = 7;
        assert_eq!(state.finalize(), Some(7));
        assert_eq!(state.personal_best, 7);
        assert_eq!(state.screen, Screen::Summary);
    }

    #[test]
    fn cue_fades_with_streak() {
        let mut state = SessionState::new(24, Theme::Warm, 0);
        assert!((state.target_cue_opacity() - 0.4).abs() < 1e-9);
        state.streak = 2;
        assert!((state.target_cue_opacity() - 0.2).abs() < 1e-9);
        state.streak = 9;
        assert!((state.target_cue_opacity() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn confidence_is_clamped() {
        let mut state = SessionState::new(24, Theme::Warm, 0);
        state.set_confidence(1.7).unwrap();
        assert_eq!(state.confidence, 1.0);
        state.set_confidence(-0.2).unwrap();
        assert_eq!(state.confidence, 0.0);
        assert!(state.set_confidence(f64::NAN).is_err());
    }

    #[test]
    fn zero_trial_sessions_still_hold_one_trial() {
        let mut state = SessionState::new(0, Theme::Warm, 0);
        assert_eq!(state.max_trials, 1);
        assert!(!state.is_complete());

        state.begin_calibration(Uuid::new_v4());
        state.begin_trial(0, Instant::now());
        state.record_choice(0, Instant::now(), &STIMULI).unwrap();
        assert!(state.is_complete());
        assert!(state.trial_index() <= state.max_trials);
    }

    #[test]
    fn session_length_spans_first_calibration_to_summary() {
        let mut state = exercising(0);
        assert_eq!(state.session_seconds(), None);

        let started = state.session_started_at.unwrap();
        state.session_started_at = Some(started - chrono::Duration::seconds(95));
        state.finalize();
        let seconds = state.session_seconds().unwrap();
        assert!((95..=96).contains(&seconds), "length was {seconds}");

        state.reset();
        assert_eq!(state.session_finished_at, None);
        assert_eq!(state.session_seconds(), None);
    }
}
