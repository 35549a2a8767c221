use serde::Serialize;

use crate::session::{RemoteStep, Screen, TrialRecord};
use crate::stats::SessionSummary;

/// Notifications pushed to the presentation layer as the session moves.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LabEvent {
    ScreenChanged {
        screen: Screen,
    },
    TrialRecorded {
        trial_index: usize,
        record: TrialRecord,
    },
    Milestone {
        hits: u32,
        message: &'static str,
    },
    RemoteStepChanged {
        step: RemoteStep,
    },
    SessionCompleted {
        summary: SessionSummary,
    },
    PersonalBest {
        hits: u32,
    },
}
