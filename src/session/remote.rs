use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::RemoteTarget;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum RemoteStep {
    CoordinateHook,
    SensoryCapture,
    Sketch,
    AnalyticalOverlay,
    Reveal,
}

impl RemoteStep {
    pub fn index(&self) -> u8 {
        match self {
            RemoteStep::CoordinateHook => 0,
            RemoteStep::SensoryCapture => 1,
            RemoteStep::Sketch => 2,
            RemoteStep::AnalyticalOverlay => 3,
            RemoteStep::Reveal => 4,
        }
    }

    pub fn next(&self) -> Option<RemoteStep> {
        match self {
            RemoteStep::CoordinateHook => Some(RemoteStep::SensoryCapture),
            RemoteStep::SensoryCapture => Some(RemoteStep::Sketch),
            RemoteStep::Sketch => Some(RemoteStep::AnalyticalOverlay),
            RemoteStep::AnalyticalOverlay => Some(RemoteStep::Reveal),
            RemoteStep::Reveal => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RemoteStep::CoordinateHook => "Mental Coordinate Hook",
            RemoteStep::SensoryCapture => "Phase 1: Sensory Signal Capture",
            RemoteStep::Sketch => "Phase 2: The Ideogram (Spontaneous Sketching)",
            RemoteStep::AnalyticalOverlay => "Phase 3: Analytical Overlay (AOL)",
            RemoteStep::Reveal => "Target Revealed",
        }
    }

    /// Label of the button that leaves this step.
    pub fn action_label(&self) -> &'static str {
        match self {
            RemoteStep::CoordinateHook => "Acquire Sensories",
            RemoteStep::SensoryCapture => "Moving to Sketch",
            RemoteStep::Sketch => "Manage AOL",
            RemoteStep::AnalyticalOverlay => "The Reveal",
            RemoteStep::Reveal => "Return to Lab",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    /// Colors and textures.
    Sensory,
    /// Sounds and smells.
    Sounds,
    /// Analytical overlay: guesses written down to be discarded.
    Overlay,
}

impl NoteField {
    fn step(&self) -> RemoteStep {
        match self {
            NoteField::Sensory | NoteField::Sounds => RemoteStep::SensoryCapture,
            NoteField::Overlay => RemoteStep::AnalyticalOverlay,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoteViewingSession {
    target: &'static RemoteTarget,
    pub coordinate: String,
    pub step: RemoteStep,
    pub sensory_notes: String,
    pub sound_notes: String,
    pub overlay_notes: String,
    pub started_at: DateTime<Utc>,
}

impl RemoteViewingSession {
    pub fn new(target: &'static RemoteTarget, coordinate: String) -> Self {
        Self {
            target,
            coordinate,
            step: RemoteStep::CoordinateHook,
            sensory_notes: String::new(),
            sound_notes: String::new(),
            overlay_notes: String::new(),
            started_at: Utc::now(),
        }
    }

    pub fn advance(&mut self) -> Result<RemoteStep> {
        match self.step.next() {
            Some(step) => {
                self.step = step;
                Ok(step)
            }
            None => bail!("remote viewing is already at the reveal"),
        }
    }

    /// The target stays hidden until the reveal step.
    pub fn revealed_target(&self) -> Option<&'static RemoteTarget> {
        (self.step == RemoteStep::Reveal).then_some(self.target)
    }

    pub fn set_notes(&mut self, field: NoteField, text: String) -> Result<()> {
        if self.step != field.step() {
            bail!(
                "{:?} notes are taken during '{}', not '{}'",
                field,
                field.step().title(),
                self.step.title()
            );
        }
        match field {
            NoteField::Sensory => self.sensory_notes = text,
            NoteField::Sounds => self.sound_notes = text,
            NoteField::Overlay => self.overlay_notes = text,
        }
        Ok(())
    }
}
