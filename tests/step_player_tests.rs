//! Step player behaviour tests
//!
//! These tests drive the player on tokio's paused clock so every delay
//! elapses instantly and deterministically.
//!
//! Test coverage:
//! - Two-step run emits current/completed transitions in order and on time
//! - At most one step is current at any point during a run
//! - Re-entrant play, reset and switch are silent no-ops while running
//! - After a run every step is completed and the running flag is clear

use banking_agent_demo::catalog;
use banking_agent_demo::{ItemStatus, PlayOutcome, Scenario, Step, StepPlayer};
use std::time::Duration;
use tokio::time::Instant;

fn two_step_scenario() -> Scenario {
    Scenario::new(
        "Two Step",
        vec![
            Step::new("Intent Agent", "Auto-classified: balance_inquiry", 100),
            Step::new("Response Agent", "Balance delivered", 50),
        ],
    )
}

#[tokio::test(start_paused = true)]
async fn two_step_run_transitions_in_order() {
    let scenario = two_step_scenario();
    let player = StepPlayer::new(scenario.clone());
    let mut updates = player.subscribe();

    let runner = player.clone();
    let start = Instant::now();
    let task = tokio::spawn(async move { runner.play(scenario).await });

    let first = updates
        .wait_for(|s| s.cursor == Some(0))
        .await
        .expect("player alive")
        .clone();
    assert!(first.running);
    assert_eq!(first.items.len(), 1);
    assert_eq!(first.items[0].status, ItemStatus::Current);
    assert_eq!(first.count_with(ItemStatus::Pending), 1);

    let second = updates
        .wait_for(|s| s.cursor == Some(1))
        .await
        .expect("player alive")
        .clone();
    assert!(start.elapsed() >= Duration::from_millis(100));
    assert_eq!(second.items[0].status, ItemStatus::Completed);
    assert_eq!(second.items[1].status, ItemStatus::Current);

    let outcome = task.await.expect("play task");
    assert_eq!(outcome, PlayOutcome::Completed { steps: 2 });
    assert!(start.elapsed() >= Duration::from_millis(150));

    let done = player.snapshot();
    assert!(!done.running);
    assert!(done.items.iter().all(|i| i.status == ItemStatus::Completed));
}

#[tokio::test(start_paused = true)]
async fn exactly_one_current_during_every_step() {
    for scenario in catalog::autonomous_scenarios() {
        let player = StepPlayer::new(scenario.clone());
        let observer = player.clone();
        let mut current_counts = Vec::new();

        player
            .play_observed(scenario.clone(), |_, _| {
                current_counts.push(observer.snapshot().count_with(ItemStatus::Current));
            })
            .await;

        assert_eq!(current_counts.len(), scenario.len());
        assert!(current_counts.iter().all(|count| *count == 1));
        assert_eq!(player.snapshot().count_with(ItemStatus::Current), 0);
    }
}

#[tokio::test(start_paused = true)]
async fn play_while_running_is_a_no_op() {
    let scenario = two_step_scenario();
    let player = StepPlayer::new(scenario.clone());
    let mut updates = player.subscribe();

    let runner = player.clone();
    let task = tokio::spawn(async move { runner.play(scenario).await });
    updates.wait_for(|s| s.cursor == Some(0)).await.expect("player alive");

    let before = player.snapshot();
    let other = Scenario::new("Other", vec![Step::new("X", "should never appear", 10)]);
    assert_eq!(player.play(other.clone()).await, PlayOutcome::AlreadyRunning);
    player.reset();
    player.switch_scenario(other);
    assert_eq!(player.snapshot(), before);

    task.await.expect("play task");
    let done = player.snapshot();
    assert_eq!(done.items.len(), 2);
    assert!(done.items.iter().all(|i| i.message != "should never appear"));
}

#[tokio::test(start_paused = true)]
async fn every_catalog_scenario_completes() {
    let mut scenarios = catalog::autonomous_scenarios();
    scenarios.extend(catalog::canned_routes().into_iter().map(|(_, s)| s));
    scenarios.push(catalog::fallback_scenario());

    for scenario in scenarios {
        let player = StepPlayer::new(scenario.clone());
        let outcome = player.play_active().await;
        assert_eq!(outcome, PlayOutcome::Completed { steps: scenario.len() });

        let snapshot = player.snapshot();
        assert!(!snapshot.running, "{}", scenario.title);
        assert!(snapshot.is_finished(), "{}", scenario.title);
    }
}

#[tokio::test(start_paused = true)]
async fn replay_clears_previous_items() {
    let player = StepPlayer::new(two_step_scenario());
    player.play_active().await;
    player.play_active().await;
    assert_eq!(player.snapshot().items.len(), 2);

    player.reset();
    let snapshot = player.snapshot();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.cursor, None);
}
