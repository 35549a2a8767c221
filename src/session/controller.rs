use std::{
    sync::{Arc, Mutex as StdMutex, PoisonError},
    time::Duration,
};

use anyhow::{bail, Result};
use log::{debug, info, warn};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    audio::{Haptics, Tone, ToneOutput, HIT_PULSE_MS},
    catalog::{Stimulus, Theme, REMOTE_TARGETS, STIMULI},
    config::LabConfig,
    events::LabEvent,
    stats::summarize,
    store::PersonalBestStore,
    trials::TrialGenerator,
};

use super::{
    remote::{NoteField, RemoteStep, RemoteViewingSession},
    snapshot::LabSnapshot,
    state::{Screen, SessionState, TrialOutcome},
};

const EVENT_CAPACITY: usize = 64;

/// External services the controller calls into.
#[derive(Clone)]
pub struct Collaborators {
    pub tones: Arc<dyn ToneOutput>,
    pub haptics: Arc<dyn Haptics>,
    pub best_store: Arc<dyn PersonalBestStore>,
}

struct PendingCalibration {
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

#[derive(Clone)]
pub struct SessionController {
    state: Arc<Mutex<SessionState>>,
    generator: Arc<StdMutex<TrialGenerator>>,
    collaborators: Collaborators,
    events: broadcast::Sender<LabEvent>,
    calibration: Arc<StdMutex<Option<PendingCalibration>>>,
    calibration_delay: Duration,
    stimuli: &'static [Stimulus],
}

impl SessionController {
    pub fn new(config: &LabConfig, collaborators: Collaborators) -> Self {
        let generator = match config.seed {
            Some(seed) => TrialGenerator::seeded(seed),
            None => TrialGenerator::new(),
        };
        Self::with_parts(config, collaborators, generator, &STIMULI)
    }

    /// Full control over randomness and the stimulus catalog.
    pub fn with_parts(
        config: &LabConfig,
        collaborators: Collaborators,
        generator: TrialGenerator,
        stimuli: &'static [Stimulus],
    ) -> Self {
        let personal_best = collaborators.best_store.load().unwrap_or_else(|err| {
            warn!("Could not read personal best, starting from 0: {err:#}");
            0
        });
        if config.max_trials == 0 {
            warn!("A session needs at least one trial; running with 1");
        }
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            state: Arc::new(Mutex::new(SessionState::new(
                config.max_trials,
                config.theme,
                personal_best,
            ))),
            generator: Arc::new(StdMutex::new(generator)),
            collaborators,
            events,
            calibration: Arc::new(StdMutex::new(None)),
            calibration_delay: config.calibration_delay,
            stimuli,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LabEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> LabSnapshot {
        let state = self.state.lock().await;
        LabSnapshot::capture(&state)
    }

    pub async fn screen(&self) -> Screen {
        self.state.lock().await.screen
    }

    pub async fn start_exercise(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.screen != Screen::Intro {
            bail!("a new exercise starts from the intro screen");
        }
        if state.is_complete() {
            bail!("this session already has all of its trials");
        }
        info!("Starting exercise session ({} trials)", state.max_trials);
        self.schedule_calibration(&mut state);
        Ok(())
    }

    pub async fn select_tile(&self, index: usize) -> Result<TrialOutcome> {
        let (outcome, record, trial_index) = {
            let mut state = self.state.lock().await;
            let outcome = state.record_choice(index, Instant::now(), self.stimuli)?;
            self.sync_soundscape(&mut state);
            let trial_index = state.history.len() - 1;
            (outcome, state.history.last().cloned(), trial_index)
        };

        if outcome.correct {
            self.best_effort("chime", self.collaborators.tones.play_tone(Tone::chime(outcome.streak)));
            self.best_effort("haptic pulse", self.collaborators.haptics.vibrate(&HIT_PULSE_MS));
        } else {
            self.best_effort("miss tone", self.collaborators.tones.play_tone(Tone::miss()));
        }

        info!(
            "Trial {} {}: hits {} streak {}",
            trial_index + 1,
            if outcome.correct { "hit" } else { "miss" },
            outcome.hits,
            outcome.streak
        );

        if let Some(record) = record {
            self.emit(LabEvent::TrialRecorded {
                trial_index,
                record,
            });
        }
        if let Some(message) = outcome.milestone {
            self.emit(LabEvent::Milestone {
                hits: outcome.hits,
                message,
            });
        }
        self.emit(LabEvent::ScreenChanged {
            screen: Screen::Feedback,
        });
        Ok(outcome)
    }

    pub async fn pass(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.record_pass(Instant::now())?;
        let trial_index = state.history.len() - 1;
        if let Some(record) = state.history.last().cloned() {
            self.emit(LabEvent::TrialRecorded {
                trial_index,
                record,
            });
        }
        debug!("Trial {} passed", trial_index + 1);

        if state.is_complete() {
            self.finalize(&mut state);
        } else {
            self.schedule_calibration(&mut state);
        }
        Ok(())
    }

    pub async fn next_trial(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.screen != Screen::Feedback {
            bail!("there is no feedback to continue from");
        }
        state.milestone = None;
        if state.is_complete() {
            self.finalize(&mut state);
        } else {
            self.schedule_calibration(&mut state);
        }
        Ok(())
    }

    pub async fn restart(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.screen != Screen::Summary {
            bail!("restart is offered on the summary screen");
        }
        self.reset_to_intro(&mut state);
        Ok(())
    }

    /// Leaves whatever flow is on screen and drops its progress.
    pub async fn return_to_lab(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.screen == Screen::Intro {
            return Ok(());
        }
        self.reset_to_intro(&mut state);
        Ok(())
    }

    pub async fn set_confidence(&self, value: f64) -> Result<()> {
        self.state.lock().await.set_confidence(value)
    }

    pub async fn toggle_soundscape(&self, enabled: bool) {
        let mut state = self.state.lock().await;
        state.soundscape_enabled = enabled;
        self.sync_soundscape(&mut state);
    }

    pub async fn toggle_drift(&self, enabled: bool) {
        self.state.lock().await.drift_enabled = enabled;
    }

    pub async fn set_theme(&self, theme: Theme) {
        let mut state = self.state.lock().await;
        if state.theme != theme {
            debug!("Theme switched to {}", theme.as_str());
        }
        state.theme = theme;
    }

    pub async fn start_remote_viewing(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.screen != Screen::Intro {
            bail!("remote viewing starts from the intro screen");
        }
        let (target, coordinate) = {
            let mut generator = self.generator.lock().unwrap_or_else(PoisonError::into_inner);
            let target = generator.pick_remote_target(&REMOTE_TARGETS);
            (target, generator.generate_coordinate())
        };
        info!("Remote viewing session on coordinate {coordinate}");
        state.remote = Some(RemoteViewingSession::new(target, coordinate));
        state.screen = Screen::RemoteViewing;
        self.emit(LabEvent::ScreenChanged {
            screen: Screen::RemoteViewing,
        });
        Ok(())
    }

    pub async fn advance_remote_viewing_step(&self) -> Result<RemoteStep> {
        let mut state = self.state.lock().await;
        let remote = match (state.screen, state.remote.as_mut()) {
            (Screen::RemoteViewing, Some(remote)) => remote,
            _ => bail!("no remote viewing session in progress"),
        };
        let step = remote.advance()?;
        self.emit(LabEvent::RemoteStepChanged { step });
        Ok(step)
    }

    pub async fn set_remote_notes(&self, field: NoteField, text: String) -> Result<()> {
        let mut state = self.state.lock().await;
        match (state.screen, state.remote.as_mut()) {
            (Screen::RemoteViewing, Some(remote)) => remote.set_notes(field, text),
            _ => bail!("no remote viewing session in progress"),
        }
    }

    /// Cancels pending work and releases the audio output.
    pub async fn shutdown(&self) {
        self.cancel_calibration();
        let mut state = self.state.lock().await;
        state.soundscape_enabled = false;
        self.sync_soundscape(&mut state);
        self.collaborators.tones.dispose();
    }

    fn schedule_calibration(&self, state: &mut SessionState) {
        let calibration_id = Uuid::new_v4();
        state.begin_calibration(calibration_id);
        self.sync_soundscape(state);
        self.emit(LabEvent::ScreenChanged {
            screen: Screen::Calibration,
        });

        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();
        let controller = self.clone();
        let delay = self.calibration_delay;

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Calibration {calibration_id} cancelled");
                }
                _ = time::sleep(delay) => {
                    controller.finish_calibration(calibration_id).await;
                }
            }
        });

        let mut slot = self.calibration.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.replace(PendingCalibration {
            handle,
            cancel_token,
        }) {
            previous.cancel_token.cancel();
        }
    }

    async fn finish_calibration(&self, calibration_id: Uuid) {
        let mut state = self.state.lock().await;
        if !state.awaits_calibration(calibration_id) {
            debug!("Calibration {calibration_id} fired after the screen moved on; ignoring");
            return;
        }
        let target_index = self
            .generator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pick_target_index();
        state.begin_trial(target_index, Instant::now());
        self.sync_soundscape(&mut state);
        debug!("Trial {} ready", state.trial_index() + 1);
        self.emit(LabEvent::ScreenChanged {
            screen: Screen::Exercise,
        });
    }

    fn cancel_calibration(&self) {
        let pending = self
            .calibration
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pending) = pending {
            pending.cancel_token.cancel();
            pending.handle.abort();
        }
    }

    fn finalize(&self, state: &mut SessionState) {
        let previous_best = state.personal_best;
        if let Some(best) = state.finalize() {
            info!("New personal best: {best} hits (was {previous_best})");
            if let Err(err) = self.collaborators.best_store.save(best) {
                warn!("Failed to persist personal best: {err:#}");
            }
            self.emit(LabEvent::PersonalBest { hits: best });
        }
        self.sync_soundscape(state);

        let summary = summarize(state.history.records(), state.max_trials);
        info!(
            "Session complete: {} hits over {} choices, correlation {}",
            summary.stats.hits, summary.stats.choices, summary.correlation
        );
        self.emit(LabEvent::SessionCompleted { summary });
        self.emit(LabEvent::ScreenChanged {
            screen: Screen::Summary,
        });
    }

    fn reset_to_intro(&self, state: &mut SessionState) {
        self.cancel_calibration();
        state.reset();
        self.sync_soundscape(state);
        self.emit(LabEvent::ScreenChanged {
            screen: Screen::Intro,
        });
    }

    fn sync_soundscape(&self, state: &mut SessionState) {
        let wanted = state.soundscape_should_play();
        if wanted == state.soundscape_playing {
            return;
        }
        state.soundscape_playing = wanted;
        self.best_effort("soundscape", self.collaborators.tones.set_soundscape(wanted));
    }

    fn best_effort(&self, what: &str, result: Result<()>) {
        if let Err(err) = result {
            debug!("{what} unavailable: {err:#}");
        }
    }

    fn emit(&self, event: LabEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
