use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::catalog;
use crate::playback::{PlayOutcome, PlayerSnapshot, Scenario, StepPlayer};

/// Self-running conversation demo over a fixed set of scenarios.
///
/// Runs without user input; the only controls are "run" and "switch demo",
/// both ignored while a run is in flight.
#[derive(Clone)]
pub struct AutonomousDemo {
    player: StepPlayer,
    scenarios: Arc<[Scenario]>,
    selected: Arc<AtomicUsize>,
}

impl AutonomousDemo {
    pub fn new(scenarios: Vec<Scenario>, speed: f64) -> Self {
        let first = scenarios
            .first()
            .cloned()
            .unwrap_or_else(|| Scenario::new("Empty Demo", Vec::new()));
        Self {
            player: StepPlayer::with_speed(first, speed),
            scenarios: scenarios.into(),
            selected: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn builtin(speed: f64) -> Self {
        Self::new(catalog::autonomous_scenarios(), speed)
    }

    pub fn player(&self) -> &StepPlayer {
        &self.player
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn selected_index(&self) -> usize {
        self.selected.load(Ordering::SeqCst)
    }

    /// Jump to a scenario by index. Ignored while running or out of range.
    pub fn select(&self, index: usize) -> bool {
        if self.player.is_running() {
            return false;
        }
        let Some(scenario) = self.scenarios.get(index) else {
            return false;
        };
        self.selected.store(index, Ordering::SeqCst);
        self.player.switch_scenario(scenario.clone());
        true
    }

    /// Advance to the next scenario, wrapping. Returns false if ignored.
    pub fn switch_demo(&self) -> bool {
        if self.scenarios.is_empty() {
            return false;
        }
        let next = (self.selected_index() + 1) % self.scenarios.len();
        let switched = self.select(next);
        if switched {
            tracing::info!(index = next, title = %self.scenarios[next].title, "Switched demo");
        }
        switched
    }

    /// Play the selected scenario
    pub async fn run(&self) -> PlayOutcome {
        self.player.play_active().await
    }

    /// Wait `delay` and then run, like the view does when it opens or switches
    pub async fn autostart(&self, delay: Duration) -> PlayOutcome {
        tokio::time::sleep(delay).await;
        self.run().await
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.player.snapshot()
    }

    /// "Processing" while a run is in flight, "Ready" otherwise
    pub fn indicator(&self) -> &'static str {
        if self.player.is_running() {
            "Processing"
        } else {
            "Ready"
        }
    }

    /// Text shown while idle with nothing emitted yet
    pub fn placeholder(&self) -> Option<&'static str> {
        let snapshot = self.player.snapshot();
        (!snapshot.running && snapshot.items.is_empty()).then_some(catalog::AUTONOMOUS_PLACEHOLDER)
    }
}
