use std::sync::Arc;
use std::time::Duration;

use intuition_lab_lib::{
    Collaborators, JsonBestStore, LabConfig, LabEvent, LabSnapshot, PersonalBestStore, Rank,
    Screen, SessionController, Silent, Stimulus, TrialGenerator, STIMULI,
};
use tokio::sync::broadcast::Receiver;

const DECOY_CUE: f64 = 0.15;

static TINY_CATALOG: [Stimulus; 3] = [
    Stimulus {
        label: "Alpha",
        meaning: "first",
        image_source: "a.jpg",
    },
    Stimulus {
        label: "Beta",
        meaning: "second",
        image_source: "b.jpg",
    },
    Stimulus {
        label: "Gamma",
        meaning: "third",
        image_source: "c.jpg",
    },
];

fn controller(store: Arc<dyn PersonalBestStore>, stimuli: &'static [Stimulus]) -> SessionController {
    SessionController::with_parts(
        &LabConfig::default(),
        Collaborators {
            tones: Arc::new(Silent),
            haptics: Arc::new(Silent),
            best_store: store,
        },
        TrialGenerator::seeded(2024),
        stimuli,
    )
}

async fn wait_for(events: &mut Receiver<LabEvent>, wanted: Screen) {
    loop {
        match events.recv().await.expect("event stream open") {
            LabEvent::ScreenChanged { screen } if screen == wanted => return,
            _ => {}
        }
    }
}

/// A player who always reads the cue: the target is the tile that differs.
fn perceived_target(snapshot: &LabSnapshot) -> usize {
    let tiles = snapshot.tiles.expect("tiles on the exercise screen");
    tiles
        .iter()
        .position(|t| (t.cue_opacity - DECOY_CUE).abs() > 1e-9)
        .expect("one tile carries the cue")
}

#[tokio::test(start_paused = true)]
async fn perceptive_player_sets_a_persisted_best() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("personal_best.json");
    let store = Arc::new(JsonBestStore::new(path.clone()).unwrap());
    let lab = controller(store, &STIMULI);
    let mut events = lab.subscribe();

    lab.set_confidence(0.9).await.unwrap();
    lab.start_exercise().await.unwrap();
    for _ in 0..24 {
        wait_for(&mut events, Screen::Exercise).await;
        let target = perceived_target(&lab.snapshot().await);
        assert!(lab.select_tile(target).await.unwrap().correct);
        lab.next_trial().await.unwrap();
    }

    let snapshot = lab.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Summary);
    let summary = snapshot.summary.unwrap();
    assert_eq!(summary.stats.hits, 24);
    assert_eq!(summary.stats.longest_streak, 24);
    assert_eq!(summary.correlation, "1.00");
    assert_eq!(summary.rank, Rank::Elite);
    assert_eq!(summary.archetype.name, "The Fast Observer");
    assert!(summary.mentor_insight.starts_with("You've found the flow state"));
    assert_eq!(summary.film_strip.len(), 24);

    let reopened = JsonBestStore::new(path).unwrap();
    assert_eq!(reopened.load().unwrap(), 24);
}

#[tokio::test(start_paused = true)]
async fn stimuli_wrap_around_a_short_catalog() {
    let lab = controller(Arc::new(intuition_lab_lib::MemoryBestStore::default()), &TINY_CATALOG);
    let mut events = lab.subscribe();

    lab.start_exercise().await.unwrap();
    let mut labels = Vec::new();
    for _ in 0..7 {
        wait_for(&mut events, Screen::Exercise).await;
        lab.select_tile(0).await.unwrap();
        let feedback = lab.snapshot().await.feedback.unwrap();
        labels.push(feedback.stimulus.unwrap().label);
        lab.next_trial().await.unwrap();
    }
    assert_eq!(
        labels,
        vec!["Alpha", "Beta", "Gamma", "Alpha", "Beta", "Gamma", "Alpha"]
    );
}

#[tokio::test(start_paused = true)]
async fn passes_consume_a_stimulus_slot() {
    let lab = controller(Arc::new(intuition_lab_lib::MemoryBestStore::default()), &TINY_CATALOG);
    let mut events = lab.subscribe();

    lab.start_exercise().await.unwrap();
    wait_for(&mut events, Screen::Exercise).await;
    lab.pass().await.unwrap();
    assert_eq!(lab.snapshot().await.screen, Screen::Calibration);

    wait_for(&mut events, Screen::Exercise).await;
    assert_eq!(lab.snapshot().await.trial_number, 2);
    lab.select_tile(1).await.unwrap();
    let feedback = lab.snapshot().await.feedback.unwrap();
    assert_eq!(feedback.stimulus.unwrap().label, "Beta");
}

#[tokio::test(start_paused = true)]
async fn remote_viewing_does_not_touch_the_score() {
    let lab = controller(Arc::new(intuition_lab_lib::MemoryBestStore::with_best(4)), &STIMULI);
    lab.start_remote_viewing().await.unwrap();
    for _ in 0..4 {
        lab.advance_remote_viewing_step().await.unwrap();
    }
    let snapshot = lab.snapshot().await;
    assert_eq!(snapshot.hits, 0);
    assert_eq!(snapshot.personal_best, 4);
    assert!(snapshot.remote_viewing.unwrap().target.is_some());

    lab.return_to_lab().await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(lab.snapshot().await.screen, Screen::Intro);
}
