use serde::Serialize;
use statig::prelude::*;

use super::types::{EmittedStep, ItemStatus, Scenario};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    Start { scenario: Scenario },
    Emit { index: usize },
    Finish,
    /// The run was dropped before its last step
    Abort,
    Reset,
    Switch { scenario: Scenario },
}

/// Point-in-time view of a player, published after every transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub scenario_title: String,
    pub total_steps: usize,
    pub items: Vec<EmittedStep>,
    pub cursor: Option<usize>,
    pub running: bool,
}

impl PlayerSnapshot {
    pub fn current(&self) -> Option<&EmittedStep> {
        self.items.iter().find(|item| item.status == ItemStatus::Current)
    }

    pub fn count_with(&self, status: ItemStatus) -> usize {
        match status {
            // not-yet-emitted steps are the pending ones
            ItemStatus::Pending => self.total_steps.saturating_sub(self.items.len()),
            _ => self.items.iter().filter(|item| item.status == status).count(),
        }
    }

    pub fn is_finished(&self) -> bool {
        !self.running && self.total_steps > 0 && self.count_with(ItemStatus::Completed) == self.total_steps
    }
}

/// Player lifecycle: `ready` until a run starts, `running` until it finishes.
pub struct PlaybackMachine {
    scenario: Scenario,
    items: Vec<EmittedStep>,
    cursor: Option<usize>,
    running: bool,
}

impl PlaybackMachine {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            items: Vec::new(),
            cursor: None,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            scenario_title: self.scenario.title.clone(),
            total_steps: self.scenario.len(),
            items: self.items.clone(),
            cursor: self.cursor,
            running: self.running,
        }
    }

    fn clear(&mut self) {
        self.items.clear();
        self.cursor = None;
    }

    fn complete_all(&mut self) {
        for item in &mut self.items {
            item.status = ItemStatus::Completed;
        }
    }
}

#[state_machine(initial = "State::ready()")]
impl PlaybackMachine {
    #[state]
    fn ready(&mut self, event: &PlaybackEvent) -> Outcome<State> {
        match event {
            PlaybackEvent::Start { scenario } => {
                self.scenario = scenario.clone();
                self.clear();
                self.running = true;
                tracing::info!(
                    scenario = %self.scenario.title,
                    steps = self.scenario.len(),
                    "Playback started"
                );
                Transition(State::running())
            }
            PlaybackEvent::Reset => {
                self.clear();
                Handled
            }
            PlaybackEvent::Switch { scenario } => {
                self.scenario = scenario.clone();
                self.clear();
                tracing::info!(scenario = %self.scenario.title, "Scenario switched");
                Handled
            }
            _ => Handled,
        }
    }

    #[state]
    fn running(&mut self, event: &PlaybackEvent) -> Outcome<State> {
        match event {
            PlaybackEvent::Emit { index } => {
                let Some(step) = self.scenario.steps.get(*index) else {
                    tracing::warn!(index = *index, "Emit past the end of the scenario ignored");
                    return Handled;
                };
                let item = EmittedStep::from_step(step, *index);
                self.complete_all();
                self.items.push(item);
                self.cursor = Some(*index);
                Handled
            }
            PlaybackEvent::Finish => {
                self.complete_all();
                self.running = false;
                tracing::info!(
                    scenario = %self.scenario.title,
                    emitted = self.items.len(),
                    "Playback finished"
                );
                Transition(State::ready())
            }
            PlaybackEvent::Abort => {
                self.complete_all();
                self.running = false;
                tracing::warn!(
                    scenario = %self.scenario.title,
                    emitted = self.items.len(),
                    "Playback dropped before its last step"
                );
                Transition(State::ready())
            }
            PlaybackEvent::Start { .. } | PlaybackEvent::Reset | PlaybackEvent::Switch { .. } => {
                tracing::debug!(event = ?event, "Ignored while playback is running");
                Handled
            }
        }
    }
}
