//! First-match decision tables for the summary labels.

use super::types::{Archetype, SessionStats};

/// Fewer choices than this and the tables are not consulted.
pub const MIN_CHOICES: usize = 5;

pub struct Rule<T: 'static> {
    pub when: fn(&SessionStats) -> bool,
    pub then: T,
}

/// Result of the first rule whose predicate holds, else `fallback`.
pub fn first_match<T: Copy>(rules: &[Rule<T>], stats: &SessionStats, fallback: T) -> T {
    rules
        .iter()
        .find(|rule| (rule.when)(stats))
        .map(|rule| rule.then)
        .unwrap_or(fallback)
}

pub const ARCHETYPE_PENDING: Archetype = Archetype {
    name: "Analyzing...",
    description: "Complete more trials to reveal your profile.",
};

pub const ARCHETYPE_FALLBACK: Archetype = Archetype {
    name: "The Developing Scout",
    description: "You are in the process of stabilizing your intuitive receptivity.",
};

fn fast_and_accurate(s: &SessionStats) -> bool {
    s.avg_latency < 0.8 && s.hit_rate > 0.4
}

fn quiet_but_accurate(s: &SessionStats) -> bool {
    s.avg_confidence < 0.3 && s.hit_rate > 0.4
}

fn highly_accurate(s: &SessionStats) -> bool {
    s.hit_rate > 0.6
}

fn deliberate(s: &SessionStats) -> bool {
    s.avg_latency > 2.0
}

pub static ARCHETYPE_RULES: [Rule<Archetype>; 4] = [
    Rule {
        when: fast_and_accurate,
        then: Archetype {
            name: "The Fast Observer",
            description: "You register social signals before your conscious mind intervenes.",
        },
    },
    Rule {
        when: quiet_but_accurate,
        then: Archetype {
            name: "The Quiet Sensor",
            description: "You possess a powerful intuition that you don't yet fully trust.",
        },
    },
    Rule {
        when: highly_accurate,
        then: Archetype {
            name: "The Intuitive Master",
            description: "Your tuning across sensory and social fields is exceptionally calibrated.",
        },
    },
    Rule {
        when: deliberate,
        then: Archetype {
            name: "The Measured Thinker",
            description: "You prefer to sample all data before committing to a feeling.",
        },
    },
];

pub const INSIGHT_PENDING: &str =
    "Keep going. We need more data to calibrate your insight generator.";

pub const INSIGHT_FALLBACK: &str = "You are showing steady calibration. Focus on the subtle physical sensation (warmth or weight) when hovering over the correct tile.";

fn confidence_disconnected(s: &SessionStats) -> bool {
    s.confidence_gap > 0.6
}

fn in_flow(s: &SessionStats) -> bool {
    s.avg_latency < 1.0 && s.hits > 10
}

fn long_run(s: &SessionStats) -> bool {
    s.longest_streak >= 6
}

fn overthinking(s: &SessionStats) -> bool {
    s.avg_latency > 2.5
}

pub static INSIGHT_RULES: [Rule<&'static str>; 4] = [
    Rule {
        when: confidence_disconnected,
        then: "Your conscious confidence is currently disconnected from your intuitive hits. Try choosing faster without 'checking' your feeling.",
    },
    Rule {
        when: in_flow,
        then: "You've found the flow state. Your rapid-fire accuracy is exceptional. Maintain this pace and don't let doubt slow you down.",
    },
    Rule {
        when: long_run,
        then: "Your longest run of hits shows the signal is there when you stay with it. Notice what that stretch felt like and return to it.",
    },
    Rule {
        when: overthinking,
        then: "Your analytical mind is likely interfering. The signal is strongest in the first 0.8 seconds. Try to move 'before the thought'.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(avg_latency: f64, hit_rate: f64, avg_confidence: f64) -> SessionStats {
        SessionStats {
            choices: 10,
            hits: (hit_rate * 10.0).round() as u32,
            hit_rate,
            avg_latency,
            avg_confidence,
            ..SessionStats::default()
        }
    }

    #[test]
    fn archetype_order_decides_overlaps() {
        // Fast, low-confidence and very accurate: matches three rules, first wins.
        let s = stats(0.5, 0.7, 0.2);
        assert_eq!(first_match(&ARCHETYPE_RULES, &s, ARCHETYPE_FALLBACK).name, "The Fast Observer");

        let s = stats(1.5, 0.7, 0.2);
        assert_eq!(first_match(&ARCHETYPE_RULES, &s, ARCHETYPE_FALLBACK).name, "The Quiet Sensor");

        let s = stats(2.5, 0.7, 0.6);
        assert_eq!(first_match(&ARCHETYPE_RULES, &s, ARCHETYPE_FALLBACK).name, "The Intuitive Master");

        let s = stats(2.5, 0.3, 0.6);
        assert_eq!(first_match(&ARCHETYPE_RULES, &s, ARCHETYPE_FALLBACK).name, "The Measured Thinker");

        let s = stats(1.5, 0.3, 0.6);
        assert_eq!(first_match(&ARCHETYPE_RULES, &s, ARCHETYPE_FALLBACK), ARCHETYPE_FALLBACK);
    }

    #[test]
    fn insight_prefers_confidence_gap() {
        let s = SessionStats {
            confidence_gap: 0.7,
            avg_latency: 3.0,
            longest_streak: 8,
            ..SessionStats::default()
        };
        assert!(first_match(&INSIGHT_RULES, &s, INSIGHT_FALLBACK).starts_with("Your conscious confidence"));
    }

    #[test]
    fn insight_streak_rule_sits_before_slow_rule() {
        let s = SessionStats {
            confidence_gap: 0.3,
            avg_latency: 3.0,
            longest_streak: 6,
            hits: 9,
            ..SessionStats::default()
        };
        assert!(first_match(&INSIGHT_RULES, &s, INSIGHT_FALLBACK).starts_with("Your longest run"));

        let s = SessionStats {
            longest_streak: 5,
            ..s
        };
        assert!(first_match(&INSIGHT_RULES, &s, INSIGHT_FALLBACK).starts_with("Your analytical mind"));
    }
}
