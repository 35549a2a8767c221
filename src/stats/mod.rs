mod rules;
mod types;

pub use rules::{first_match, Rule, ARCHETYPE_RULES, INSIGHT_RULES, MIN_CHOICES};
pub use types::{Archetype, FilmFrame, Rank, SessionStats, SessionSummary, TrendPoint};

use crate::session::TrialRecord;

use rules::{ARCHETYPE_FALLBACK, ARCHETYPE_PENDING, INSIGHT_FALLBACK, INSIGHT_PENDING};

impl SessionStats {
    pub fn from_history(history: &[TrialRecord]) -> Self {
        let mut stats = SessionStats::default();
        let mut latency_total = 0.0;
        let mut confidence_total = 0.0;
        let mut gap_total = 0.0;

        for record in history {
            match record {
                TrialRecord::Choice {
                    correct,
                    latency_seconds,
                    confidence,
                    ..
                } => {
                    stats.choices += 1;
                    if *correct {
                        stats.hits += 1;
                    }
                    latency_total += latency_seconds;
                    confidence_total += confidence;
                    let outcome = if *correct { 1.0 } else { 0.0 };
                    gap_total += (confidence - outcome).abs();
                }
                TrialRecord::Pass { .. } => stats.passes += 1,
            }
        }

        if stats.choices > 0 {
            let n = stats.choices as f64;
            stats.hit_rate = stats.hits as f64 / n;
            stats.avg_latency = latency_total / n;
            stats.avg_confidence = confidence_total / n;
            stats.confidence_gap = gap_total / n;
        }
        stats.longest_streak = longest_correct_streak(history);
        stats
    }

    fn has_enough_data(&self) -> bool {
        self.choices >= MIN_CHOICES
    }
}

/// Longest run of consecutive correct choices. Passes are skipped over, so
/// they neither extend nor break a run.
pub fn longest_correct_streak(history: &[TrialRecord]) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    for record in history {
        match record {
            TrialRecord::Choice { correct: true, .. } => {
                current += 1;
                longest = longest.max(current);
            }
            TrialRecord::Choice { correct: false, .. } => current = 0,
            TrialRecord::Pass { .. } => {}
        }
    }
    longest
}

/// Share of choices where stated confidence agreed with the outcome, split at
/// 0.5: confident hits and unconfident misses count as agreement.
pub fn correlation(history: &[TrialRecord]) -> String {
    let mut total = 0usize;
    let mut matched = 0usize;
    for record in history {
        let Some(confidence) = record.confidence() else {
            continue;
        };
        total += 1;
        let correct = record.is_hit();
        if (confidence > 0.5 && correct) || (confidence <= 0.5 && !correct) {
            matched += 1;
        }
    }
    if total == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", matched as f64 / total as f64)
}

pub fn archetype(stats: &SessionStats) -> Archetype {
    if !stats.has_enough_data() {
        return ARCHETYPE_PENDING;
    }
    first_match(&ARCHETYPE_RULES, stats, ARCHETYPE_FALLBACK)
}

pub fn mentor_insight(stats: &SessionStats) -> &'static str {
    if !stats.has_enough_data() {
        return INSIGHT_PENDING;
    }
    first_match(&INSIGHT_RULES, stats, INSIGHT_FALLBACK)
}

/// One point per choice at its position in the history; passes keep their
/// slot on the x axis but have no confidence to plot.
pub fn trend_points(history: &[TrialRecord], max_trials: usize) -> Vec<TrendPoint> {
    let span = max_trials.saturating_sub(1).max(1) as f64;
    history
        .iter()
        .enumerate()
        .filter_map(|(i, record)| match record {
            TrialRecord::Choice {
                correct,
                confidence,
                ..
            } => Some(TrendPoint {
                x: i as f64 / span * 100.0,
                y: 100.0 - confidence * 100.0,
                correct: *correct,
            }),
            TrialRecord::Pass { .. } => None,
        })
        .collect()
}

/// SVG polyline `points` attribute; empty until there is a line to draw.
pub fn trend_path(points: &[TrendPoint]) -> String {
    if points.len() < 2 {
        return String::new();
    }
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn film_strip(history: &[TrialRecord]) -> Vec<FilmFrame> {
    history
        .iter()
        .filter_map(|record| match record {
            TrialRecord::Choice {
                correct,
                confidence,
                stimulus,
                ..
            } => Some(FilmFrame {
                label: stimulus.label,
                image_source: stimulus.image_source,
                correct: *correct,
                sense: (confidence * 10.0).round().clamp(0.0, 10.0) as u8,
            }),
            TrialRecord::Pass { .. } => None,
        })
        .collect()
}

pub fn summarize(history: &[TrialRecord], max_trials: usize) -> SessionSummary {
    let stats = SessionStats::from_history(history);
    let trend = trend_points(history, max_trials);
    SessionSummary {
        correlation: correlation(history),
        archetype: archetype(&stats),
        mentor_insight: mentor_insight(&stats),
        rank: Rank::for_hits(stats.hits),
        trend_path: trend_path(&trend),
        trend,
        film_strip: film_strip(history),
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::STIMULI;

    fn choice(correct: bool, confidence: f64, latency: f64) -> TrialRecord {
        let selected = if correct { 0 } else { 1 };
        TrialRecord::choice(0, selected, confidence, latency, &STIMULI[0])
    }

    fn scenario() -> Vec<TrialRecord> {
        [(true, 0.8), (false, 0.2), (true, 0.9), (true, 0.4), (false, 0.6)]
            .into_iter()
            .map(|(correct, confidence)| choice(correct, confidence, 1.2))
            .collect()
    }

    #[test]
    fn worked_example_correlation() {
        let history = scenario();
        let stats = SessionStats::from_history(&history);
        assert_eq!(stats.hits, 3);
        assert_eq!(correlation(&history), "0.60");
    }

    #[test]
    fn correlation_without_choices() {
        assert_eq!(correlation(&[]), "0.00");
        assert_eq!(correlation(&[TrialRecord::pass(1.0)]), "0.00");
    }

    #[test]
    fn correlation_midpoint_counts_as_unconfident() {
        let history = vec![choice(false, 0.5, 1.0), choice(true, 0.5, 1.0)];
        assert_eq!(correlation(&history), "0.50");
    }

    #[test]
    fn correlation_stays_in_unit_range() {
        let all_agree = vec![choice(true, 1.0, 1.0), choice(false, 0.0, 1.0)];
        assert_eq!(correlation(&all_agree), "1.00");
        let none_agree = vec![choice(true, 0.0, 1.0), choice(false, 1.0, 1.0)];
        assert_eq!(correlation(&none_agree), "0.00");
    }

    #[test]
    fn longest_streak_scans_every_run() {
        let pattern = [true, true, false, true, true, true, false, true];
        let history: Vec<_> = pattern.iter().map(|c| choice(*c, 0.5, 1.0)).collect();
        assert_eq!(longest_correct_streak(&history), 3);
        assert_eq!(longest_correct_streak(&[]), 0);
    }

    #[test]
    fn averages_ignore_passes() {
        let history = vec![
            choice(true, 1.0, 1.0),
            TrialRecord::pass(30.0),
            choice(false, 0.0, 3.0),
        ];
        let stats = SessionStats::from_history(&history);
        assert_eq!(stats.choices, 2);
        assert_eq!(stats.passes, 1);
        assert_eq!(stats.avg_latency, 2.0);
        assert_eq!(stats.avg_confidence, 0.5);
        assert_eq!(stats.confidence_gap, 0.0);
        assert_eq!(stats.hit_rate, 0.5);
    }

    #[test]
    fn labels_wait_for_five_choices() {
        let mut history = scenario();
        history.pop();
        let stats = SessionStats::from_history(&history);
        assert_eq!(archetype(&stats).name, "Analyzing...");
        assert!(mentor_insight(&stats).starts_with("Keep going"));
    }

    #[test]
    fn fast_accurate_session_is_a_fast_observer() {
        let history: Vec<_> = (0..6).map(|i| choice(i % 2 == 0 || i == 5, 0.7, 0.5)).collect();
        let summary = summarize(&history, 24);
        assert_eq!(summary.archetype.name, "The Fast Observer");
        assert_eq!(summary.rank, Rank::Novice);
    }

    #[test]
    fn trend_points_use_history_position() {
        let history = vec![
            choice(true, 1.0, 1.0),
            TrialRecord::pass(1.0),
            choice(false, 0.25, 1.0),
        ];
        let points = trend_points(&history, 24);
        assert_eq!(points.len(), 2);
        assert_eq!((points[0].x, points[0].y), (0.0, 0.0));
        assert!((points[1].x - 2.0 / 23.0 * 100.0).abs() < 1e-9);
        assert_eq!(points[1].y, 75.0);
        assert_eq!(trend_path(&points), "0.00,0.00 8.70,75.00");
        assert_eq!(trend_path(&points[..1]), "");
    }

    #[test]
    fn film_strip_rates_sense_out_of_ten() {
        let history = vec![choice(true, 0.74, 1.0), TrialRecord::pass(1.0)];
        let strip = film_strip(&history);
        assert_eq!(strip.len(), 1);
        assert_eq!(strip[0].sense, 7);
        assert_eq!(strip[0].label, STIMULI[0].label);
    }

    #[test]
    fn rank_thresholds() {
        assert_eq!(Rank::for_hits(7), Rank::Novice);
        assert_eq!(Rank::for_hits(8), Rank::Solid);
        assert_eq!(Rank::for_hits(12), Rank::Elite);
    }
}
