use std::str::FromStr;

use anyhow::{anyhow, Error};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    /// "Technical" wording.
    Clinical,
    /// "Attunement" wording.
    #[default]
    Warm,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Clinical => "clinical",
            Theme::Warm => "warm",
        }
    }

    pub fn copy(&self) -> &'static ThemeCopy {
        match self {
            Theme::Clinical => &CLINICAL,
            Theme::Warm => &WARM,
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clinical" | "technical" => Ok(Theme::Clinical),
            "warm" | "attunement" => Ok(Theme::Warm),
            other => Err(anyhow!("unknown theme '{other}' (expected clinical or warm)")),
        }
    }
}

/// Screen wording for one theme.
#[derive(Debug)]
pub struct ThemeCopy {
    pub switcher_label: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub instructions_heading: &'static str,
    pub instructions: &'static str,
    pub note: &'static str,
    pub calibration_title: &'static str,
    pub calibration_cue: &'static str,
    pub scanning: &'static str,
    pub correct: &'static str,
    pub correct_sub: &'static str,
    pub incorrect: &'static str,
    pub incorrect_sub: &'static str,
    pub reflection: &'static str,
    pub slider_labels: (&'static str, &'static str),
    pub archetype_heading: &'static str,
    pub summary_title: &'static str,
    pub summary_interpretation: &'static str,
    pub pass_label: &'static str,
    pub encouragement: &'static [(u32, &'static str)],
}

impl ThemeCopy {
    /// Banner text when the running hit count lands on a milestone.
    pub fn milestone(&self, hits: u32) -> Option<&'static str> {
        self.encouragement
            .iter()
            .find(|(at, _)| *at == hits)
            .map(|(_, text)| *text)
    }
}

const ENCOURAGEMENT: [(u32, &str); 5] = [
    (6, "You're beginning to tune in."),
    (8, "Steady focus is showing results."),
    (10, "Significant intuitive alignment."),
    (12, "Excellent sensory detection."),
    (14, "Exceptional intuitive awareness."),
];

static CLINICAL: ThemeCopy = ThemeCopy {
    switcher_label: "Technical",
    title: "Signal Detection Exercise",
    subtitle: "Train sensitivity to weak perceptual differences under uncertainty.",
    instructions_heading: "Instructions",
    instructions: "Explore the tiles using touch or cursor movement. Select the tile you believe is the target.",
    note: "Accuracy improves when response time is sufficient to sample all options.",
    calibration_title: "Baseline Calibration",
    calibration_cue: "READY",
    scanning: "Scanning stimulus field...",
    correct: "Correct",
    correct_sub: "Target detected.",
    incorrect: "Incorrect",
    incorrect_sub: "Response did not match target.",
    reflection: "Self-report: How confident were you in this choice?",
    slider_labels: ("Guessing", "Calibrated Judgment"),
    archetype_heading: "Archetype",
    summary_title: "Session Summary",
    summary_interpretation: "Your sensitivity at this difficulty is above baseline but not yet stable.",
    pass_label: "Pass",
    encouragement: &ENCOURAGEMENT,
};

static WARM: ThemeCopy = ThemeCopy {
    switcher_label: "Attunement",
    title: "Sense Before You Decide",
    subtitle: "Practice noticing subtle differences without rushing to explain them.",
    instructions_heading: "How this works",
    instructions: "One tile is subtly different. Take a moment to explore each one. When you're ready, choose the tile that feels different.",
    note: "If you feel rushed, pause for one breath before choosing.",
    calibration_title: "Centering...",
    calibration_cue: "FLOW",
    scanning: "Notice the quiet signals...",
    correct: "Nice catch.",
    correct_sub: "You noticed a subtle difference.",
    incorrect: "That's okay.",
    incorrect_sub: "Misses are part of learning to tune in.",
    reflection: "Quick check-in: How did this choice feel?",
    slider_labels: ("Mostly guessing", "Strong sense"),
    archetype_heading: "Your Profile",
    summary_title: "What we noticed today",
    summary_interpretation: "Give yourself one extra moment before deciding.",
    pass_label: "Pass",
    encouragement: &ENCOURAGEMENT,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestones_only_fire_on_listed_hit_counts() {
        let copy = Theme::Warm.copy();
        assert_eq!(copy.milestone(6), Some("You're beginning to tune in."));
        assert_eq!(copy.milestone(14), Some("Exceptional intuitive awareness."));
        assert_eq!(copy.milestone(7), None);
        assert_eq!(copy.milestone(0), None);
    }

    #[test]
    fn theme_parses_both_names() {
        assert_eq!("technical".parse::<Theme>().unwrap(), Theme::Clinical);
        assert_eq!(" Warm ".parse::<Theme>().unwrap(), Theme::Warm);
        assert!("neon".parse::<Theme>().is_err());
    }
}
