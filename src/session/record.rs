use serde::Serialize;

use crate::catalog::Stimulus;

/// Outcome of one trial. Never changed after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TrialRecord {
    Choice {
        correct: bool,
        latency_seconds: f64,
        confidence: f64,
        target_index: usize,
        selected_index: usize,
        stimulus: &'static Stimulus,
    },
    Pass {
        latency_seconds: f64,
    },
}

impl TrialRecord {
    pub fn choice(
        target_index: usize,
        selected_index: usize,
        confidence: f64,
        latency_seconds: f64,
        stimulus: &'static Stimulus,
    ) -> Self {
        TrialRecord::Choice {
            correct: selected_index == target_index,
            latency_seconds,
            confidence,
            target_index,
            selected_index,
            stimulus,
        }
    }

    pub fn pass(latency_seconds: f64) -> Self {
        TrialRecord::Pass { latency_seconds }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, TrialRecord::Choice { correct: true, .. })
    }

    pub fn latency_seconds(&self) -> f64 {
        match self {
            TrialRecord::Choice {
                latency_seconds, ..
            }
            | TrialRecord::Pass { latency_seconds } => *latency_seconds,
        }
    }

    pub fn confidence(&self) -> Option<f64> {
        match self {
            TrialRecord::Choice { confidence, .. } => Some(*confidence),
            TrialRecord::Pass { .. } => None,
        }
    }
}

/// Append-only, insertion-ordered trial log.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<TrialRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends and returns the position of the new record.
    pub fn append(&mut self, record: TrialRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&TrialRecord> {
        self.records.last()
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn hit_count(&self) -> u32 {
        self.records.iter().filter(|r| r.is_hit()).count() as u32
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
