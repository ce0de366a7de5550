use statig::prelude::*;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, Instrument};

use super::lifecycle::{PlaybackEvent, PlaybackMachine, PlayerSnapshot};
use super::sequence::{run_sequence, scale_delay};
use super::types::{Scenario, Step};
use crate::telemetry::{create_playback_span, generate_correlation_id};

/// Result of asking a player to start a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The scenario ran to completion
    Completed { steps: usize },
    /// A run was already in flight; nothing changed
    AlreadyRunning,
}

struct PlayerShared {
    machine: Mutex<StateMachine<PlaybackMachine>>,
    updates: watch::Sender<PlayerSnapshot>,
    speed: f64,
}

/// Plays scripted scenarios step by step.
///
/// Clones share one instance: one running flag, one set of emitted items.
/// A started run plays to the end unless its future is dropped, in which
/// case the player goes back to ready with the emitted steps completed.
#[derive(Clone)]
pub struct StepPlayer {
    shared: Arc<PlayerShared>,
}

impl StepPlayer {
    pub fn new(scenario: Scenario) -> Self {
        Self::with_speed(scenario, 1.0)
    }

    pub fn with_speed(scenario: Scenario, speed: f64) -> Self {
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            tracing::warn!(speed, "Invalid playback speed, falling back to 1.0");
            1.0
        };

        let machine = PlaybackMachine::new(scenario).state_machine();
        let (updates, _) = watch::channel(machine.inner().snapshot());

        Self {
            shared: Arc::new(PlayerShared {
                machine: Mutex::new(machine),
                updates,
                speed,
            }),
        }
    }

    fn machine(&self) -> MutexGuard<'_, StateMachine<PlaybackMachine>> {
        self.shared
            .machine
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Feed one event to the lifecycle and publish the resulting snapshot
    fn apply(&self, event: PlaybackEvent) -> PlayerSnapshot {
        let mut machine = self.machine();
        machine.handle(&event);
        let snapshot = machine.inner().snapshot();
        self.shared.updates.send_replace(snapshot.clone());
        snapshot
    }

    pub fn is_running(&self) -> bool {
        self.machine().inner().is_running()
    }

    pub fn scenario(&self) -> Scenario {
        self.machine().inner().scenario().clone()
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.machine().inner().snapshot()
    }

    /// Receive a snapshot after every status change
    pub fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.shared.updates.subscribe()
    }

    /// Play `scenario`, making it the active one. A no-op while running.
    pub async fn play(&self, scenario: Scenario) -> PlayOutcome {
        self.play_observed(scenario, |_, _| {}).await
    }

    /// Replay the active scenario
    pub async fn play_active(&self) -> PlayOutcome {
        let scenario = self.scenario();
        self.play(scenario).await
    }

    /// Like [`play`](Self::play), also calling `on_step` as each step becomes current
    pub async fn play_observed<F>(&self, scenario: Scenario, on_step: F) -> PlayOutcome
    where
        F: FnMut(usize, &Step),
    {
        self.play_with_hooks(scenario, || {}, on_step).await
    }

    /// Like [`play_observed`](Self::play_observed), also calling `on_start`
    /// once the run has actually started. Neither hook fires for a rejected play.
    pub async fn play_with_hooks<S, F>(&self, scenario: Scenario, on_start: S, mut on_step: F) -> PlayOutcome
    where
        S: FnOnce(),
        F: FnMut(usize, &Step),
    {
        {
            let mut machine = self.machine();
            if machine.inner().is_running() {
                debug!(scenario = %scenario.title, "Play requested while running, ignoring");
                return PlayOutcome::AlreadyRunning;
            }
            machine.handle(&PlaybackEvent::Start {
                scenario: scenario.clone(),
            });
            self.shared.updates.send_replace(machine.inner().snapshot());
        }
        let guard = RunGuard::arm(self);
        on_start();

        let correlation_id = generate_correlation_id();
        let span = create_playback_span("step_player", &scenario.title, &correlation_id);
        let speed = self.shared.speed;
        // runs are never cancelled; the token only satisfies the runner's contract
        let never = CancellationToken::new();

        let outcome = run_sequence(
            scenario.steps.iter(),
            |step| scale_delay(step.delay(), speed),
            |index, step| {
                self.apply(PlaybackEvent::Emit { index });
                debug!(index, source = %step.source, "Step is current");
                on_step(index, step);
            },
            &never,
        )
        .instrument(span)
        .await;

        guard.finish();
        PlayOutcome::Completed {
            steps: outcome.emitted(),
        }
    }

    /// Clear emitted items and the cursor. A no-op while running.
    pub fn reset(&self) {
        self.apply(PlaybackEvent::Reset);
    }

    /// Replace the active scenario and reset. A no-op while running.
    pub fn switch_scenario(&self, scenario: Scenario) {
        self.apply(PlaybackEvent::Switch { scenario });
    }
}

/// Returns the player to `ready` if a run's future is dropped mid-flight
struct RunGuard<'a> {
    player: &'a StepPlayer,
    done: bool,
}

impl<'a> RunGuard<'a> {
    fn arm(player: &'a StepPlayer) -> Self {
        Self { player, done: false }
    }

    fn finish(mut self) {
        self.done = true;
        self.player.apply(PlaybackEvent::Finish);
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.player.apply(PlaybackEvent::Abort);
        }
    }
}
