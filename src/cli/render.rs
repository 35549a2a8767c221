//! Plain-text views of a [`LabSnapshot`].

use std::fmt::Write;

use crate::catalog::Theme;
use crate::session::{FeedbackView, LabSnapshot, RemoteStep, RemoteViewingView, Screen, TileView};
use crate::stats::SessionSummary;

const RULE: &str = "------------------------------------------------------------";

pub fn render(snapshot: &LabSnapshot) -> String {
    let mut out = String::new();
    let copy = snapshot.theme.copy();

    let _ = writeln!(
        out,
        "{RULE}\n[{}]  sound {}  drift {}",
        copy.switcher_label,
        on_off(snapshot.soundscape_enabled),
        on_off(snapshot.drift_enabled)
    );

    match snapshot.screen {
        Screen::Intro => render_intro(&mut out, snapshot),
        Screen::Calibration => {
            let _ = writeln!(out, "{}", copy.calibration_title);
            let _ = writeln!(
                out,
                "Match your breath to the expansion. Release all data expectations."
            );
            let _ = writeln!(out, "        ( {} )", copy.calibration_cue);
        }
        Screen::Exercise => render_exercise(&mut out, snapshot),
        Screen::Feedback => {
            if let Some(feedback) = &snapshot.feedback {
                render_feedback(&mut out, snapshot, feedback);
            }
        }
        Screen::Summary => {
            if let Some(summary) = &snapshot.summary {
                render_summary(&mut out, snapshot.theme, summary, snapshot.session_seconds);
            }
        }
        Screen::RemoteViewing => {
            if let Some(view) = &snapshot.remote_viewing {
                render_remote(&mut out, view);
            }
        }
    }
    out
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn render_intro(out: &mut String, snapshot: &LabSnapshot) {
    let copy = snapshot.theme.copy();
    let _ = writeln!(out, "{}\n{}", copy.title, copy.subtitle);
    if snapshot.personal_best > 0 {
        let _ = writeln!(out, "Personal Best: {} hits", snapshot.personal_best);
    }
    let _ = writeln!(out, "\n{}\n  {}", copy.instructions_heading, copy.instructions);
    let _ = writeln!(out, "  Note: {}", copy.note);
    let _ = writeln!(out, "\n'start' for ESP Training, 'rv' for Remote Viewing");
}

/// Darker glyphs for stronger cues.
fn shade(tile: &TileView) -> char {
    match tile.cue_opacity {
        o if o >= 0.35 => '#',
        o if o >= 0.25 => '%',
        o if o >= 0.18 => '+',
        o if o > 0.12 => ':',
        _ => '.',
    }
}

fn render_exercise(out: &mut String, snapshot: &LabSnapshot) {
    let copy = snapshot.theme.copy();
    let _ = writeln!(
        out,
        "Trial {} / {}    Hits: {}",
        snapshot.trial_number, snapshot.max_trials, snapshot.hits
    );
    let _ = writeln!(out, "{}\n", copy.scanning);

    if let Some(tiles) = &snapshot.tiles {
        let drift = if snapshot.drift_enabled { "~" } else { " " };
        for (r, pair) in tiles.chunks(2).enumerate() {
            let mut line = String::new();
            for (c, tile) in pair.iter().enumerate() {
                let n = r * 2 + c + 1;
                let fill: String = std::iter::repeat(shade(tile)).take(5).collect();
                let badge = tile
                    .streak_badge
                    .map(|s| format!("x{s}"))
                    .unwrap_or_else(|| "  ".to_string());
                let _ = write!(line, "{drift}[{n}] {fill} {badge}{drift}   ");
            }
            let _ = writeln!(out, "  {}", line.trim_end());
        }
    }

    let (low, high) = copy.slider_labels;
    let _ = writeln!(
        out,
        "\n{}\n  {low} [{}] {high}   ({:.1})",
        copy.reflection,
        slider(snapshot.confidence),
        snapshot.confidence
    );
    let _ = writeln!(out, "choose 1-4, 'conf <0..1>', or '{}'", copy.pass_label.to_lowercase());
}

fn slider(value: f64) -> String {
    let filled = (value * 10.0).round() as usize;
    (0..10).map(|i| if i < filled { '=' } else { '-' }).collect()
}

fn render_feedback(out: &mut String, snapshot: &LabSnapshot, feedback: &FeedbackView) {
    let copy = snapshot.theme.copy();
    if let Some(message) = snapshot.milestone {
        let _ = writeln!(out, "*** {message} ***");
    }
    let (badge, sub) = if feedback.correct {
        (copy.correct, copy.correct_sub)
    } else {
        (copy.incorrect, copy.incorrect_sub)
    };
    let _ = writeln!(out, "{badge}\n{sub}");
    let _ = writeln!(out, "Truth: tile {}", feedback.target_index + 1);

    if let Some(stimulus) = &feedback.stimulus {
        let _ = writeln!(out, "\n  {}: {}", stimulus.label.to_uppercase(), stimulus.meaning);
        let _ = writeln!(out, "  {}", stimulus.image_source);
    }

    let action = if feedback.session_complete {
        "Finalize Session"
    } else {
        "Continue"
    };
    let _ = writeln!(out, "\n'next' to {action}");
}

fn session_length(seconds: i64) -> String {
    format!("{}m {:02}s", seconds / 60, seconds % 60)
}

fn render_summary(
    out: &mut String,
    theme: Theme,
    summary: &SessionSummary,
    session_seconds: Option<i64>,
) {
    let copy = theme.copy();
    let _ = writeln!(out, "{}\n", copy.summary_title);
    if let Some(seconds) = session_seconds {
        let _ = writeln!(out, "Session length {}", session_length(seconds));
    }
    let _ = writeln!(
        out,
        "Hits {}   Correlation {}   Rank {}",
        summary.stats.hits,
        summary.correlation,
        summary.rank.as_str()
    );
    let _ = writeln!(
        out,
        "{}: {}\n  {}",
        copy.archetype_heading, summary.archetype.name, summary.archetype.description
    );

    if !summary.trend.is_empty() {
        let _ = writeln!(out, "\nLearning Curve (Confidence vs. Result)");
        let line: String = summary
            .trend
            .iter()
            .map(|p| if p.correct { '+' } else { '-' })
            .collect();
        let _ = writeln!(out, "  {line}");
    }

    if !summary.film_strip.is_empty() {
        let _ = writeln!(out, "\nReplay");
        for frame in &summary.film_strip {
            let mark = if frame.correct { "hit " } else { "miss" };
            let _ = writeln!(out, "  [{mark}] {} ({} sense)", frame.label, frame.sense);
        }
    }

    let _ = writeln!(out, "\nMentor Insights\n  {}", summary.mentor_insight);
    let _ = writeln!(out, "\n{}", copy.summary_interpretation);
    let _ = writeln!(out, "'restart' to begin again");
}

fn render_remote(out: &mut String, view: &RemoteViewingView) {
    let _ = writeln!(
        out,
        "{}    (opened {} UTC)",
        view.step.title(),
        view.started_at.format("%H:%M")
    );
    match view.step {
        RemoteStep::CoordinateHook => {
            let _ = writeln!(out, "\n      {}\n", view.coordinate);
            let _ = writeln!(
                out,
                "Fix your mind on this number. Let your awareness drift to the location it represents."
            );
        }
        RemoteStep::SensoryCapture => {
            let _ = writeln!(out, "Colors / Textures: {}", placeholder(&view.sensory_notes, "Red, rough, grainy, cold..."));
            let _ = writeln!(out, "Sounds / Smells:   {}", placeholder(&view.sound_notes, "Humming, metallic, salty breeze..."));
            let _ = writeln!(out, "'note sensory <text>', 'note sounds <text>'");
        }
        RemoteStep::Sketch => {
            let _ = writeln!(
                out,
                "Draw the first shape or movement that comes to your mind, on paper."
            );
        }
        RemoteStep::AnalyticalOverlay => {
            let _ = writeln!(out, "AOL Trash Bin: {}", placeholder(&view.overlay_notes, "Is your brain telling you it's a bridge? Write it here to discard the guess."));
            let _ = writeln!(out, "'note aol <text>'");
        }
        RemoteStep::Reveal => {
            if let Some(target) = &view.target {
                let _ = writeln!(out, "{}\n  {}: {}", target.location, target.name, target.description);
                let _ = writeln!(out, "  {}", target.image_source);
            }
            let _ = writeln!(out, "\n'home' to {}", view.step.action_label());
            return;
        }
    }
    let _ = writeln!(out, "\n'advance' to {}", view.step.action_label());
}

fn placeholder<'a>(value: &'a str, hint: &'a str) -> &'a str {
    if value.is_empty() {
        hint
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{REMOTE_TARGETS, STIMULI};
    use crate::stats::summarize;
    use chrono::{TimeZone, Utc};

    fn base(screen: Screen) -> LabSnapshot {
        LabSnapshot {
            screen,
            theme: Theme::Clinical,
            trial_number: 3,
            max_trials: 24,
            hits: 2,
            streak: 0,
            confidence: 0.6,
            personal_best: 9,
            milestone: None,
            soundscape_enabled: false,
            drift_enabled: false,
            tiles: None,
            feedback: None,
            summary: None,
            remote_viewing: None,
            session_started_at: None,
            session_seconds: None,
        }
    }

    #[test]
    fn intro_shows_personal_best() {
        let text = render(&base(Screen::Intro));
        assert!(text.contains("Signal Detection Exercise"));
        assert!(text.contains("Personal Best: 9 hits"));
    }

    #[test]
    fn exercise_shows_counter_and_cue() {
        let mut snapshot = base(Screen::Exercise);
        let decoy = TileView {
            cue_opacity: 0.15,
            streak_badge: None,
            drifting: false,
        };
        let mut tiles = [decoy; 4];
        tiles[2].cue_opacity = 0.4;
        snapshot.tiles = Some(tiles);

        let text = render(&snapshot);
        assert!(text.contains("Trial 3 / 24"));
        assert!(text.contains("[3] #####"));
        assert!(text.contains("[1] :::::"));
        assert!(text.contains("Guessing [======----] Calibrated Judgment"));
    }

    #[test]
    fn feedback_on_last_trial_offers_finalize() {
        let mut snapshot = base(Screen::Feedback);
        snapshot.milestone = Some("Steady focus is showing results.");
        snapshot.feedback = Some(FeedbackView {
            correct: true,
            target_index: 1,
            selected_index: Some(1),
            stimulus: Some(STIMULI[4]),
            session_complete: true,
        });
        let text = render(&snapshot);
        assert!(text.contains("*** Steady focus is showing results. ***"));
        assert!(text.contains("Target detected."));
        assert!(text.contains("DOUBT"));
        assert!(text.contains("Finalize Session"));
    }

    #[test]
    fn summary_shows_session_length() {
        let mut snapshot = base(Screen::Summary);
        snapshot.summary = Some(summarize(&[], 24));
        snapshot.session_seconds = Some(187);
        let text = render(&snapshot);
        assert!(text.contains("Session length 3m 07s"));
        assert!(text.contains("Correlation 0.00"));
    }

    #[test]
    fn remote_view_shows_when_it_opened() {
        let mut snapshot = base(Screen::RemoteViewing);
        snapshot.remote_viewing = Some(RemoteViewingView {
            coordinate: "48213377".into(),
            step: RemoteStep::CoordinateHook,
            step_index: 0,
            sensory_notes: String::new(),
            sound_notes: String::new(),
            overlay_notes: String::new(),
            target: None,
            started_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 5, 0).unwrap(),
        });
        let text = render(&snapshot);
        assert!(text.contains("(opened 09:05 UTC)"));
        assert!(text.contains("48213377"));
        assert!(!text.contains(REMOTE_TARGETS[0].name));
    }
}
