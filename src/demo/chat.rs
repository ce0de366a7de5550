use tokio::sync::watch;

use crate::catalog;
use crate::playback::{PlayOutcome, Scenario, ScenarioResolver, StepPlayer, Transcript};

/// What happened to a submitted message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty or whitespace-only input
    IgnoredBlank,
    /// A previous reply is still playing
    IgnoredBusy,
    /// The resolved script played to the end
    Answered { steps: usize, canned: bool },
}

/// Free-text conversation demo.
///
/// Each message is appended as a `user` entry, resolved through the canned
/// lookup, and answered by playing the resolved script one `agent` entry per
/// step.
pub struct ChatSession {
    player: StepPlayer,
    resolver: ScenarioResolver,
    transcript: watch::Sender<Transcript>,
}

impl ChatSession {
    pub fn new(resolver: ScenarioResolver, speed: f64) -> Self {
        let player = StepPlayer::with_speed(resolver.fallback().clone(), speed);
        let (transcript, _) = watch::channel(greeting());
        Self {
            player,
            resolver,
            transcript,
        }
    }

    pub fn builtin(speed: f64) -> Self {
        Self::new(ScenarioResolver::builtin(), speed)
    }

    pub fn resolver(&self) -> &ScenarioResolver {
        &self.resolver
    }

    pub fn player(&self) -> &StepPlayer {
        &self.player
    }

    pub fn transcript(&self) -> Transcript {
        self.transcript.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Transcript> {
        self.transcript.subscribe()
    }

    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        if input.trim().is_empty() {
            return SubmitOutcome::IgnoredBlank;
        }

        let canned = self.resolver.is_canned(input);
        let scenario: Scenario = self.resolver.resolve(input);
        let title = scenario.title.clone();

        // the user line is only written once the player has accepted the run
        let outcome = self
            .player
            .play_with_hooks(
                scenario,
                || {
                    tracing::info!(canned, scenario = %title, "Chat message resolved");
                    self.transcript.send_modify(|t| t.push_user(input));
                },
                |_, step| {
                    self.transcript
                        .send_modify(|t| t.push_agent(step.source.clone(), step.message.clone()));
                },
            )
            .await;

        match outcome {
            PlayOutcome::Completed { steps } => SubmitOutcome::Answered { steps, canned },
            PlayOutcome::AlreadyRunning => SubmitOutcome::IgnoredBusy,
        }
    }

    /// Clear the transcript back to the greeting. A no-op while running.
    pub fn restart(&self) -> bool {
        if self.player.is_running() {
            return false;
        }
        self.player.reset();
        self.transcript.send_replace(greeting());
        true
    }
}

fn greeting() -> Transcript {
    let mut transcript = Transcript::new();
    transcript.push_system(catalog::CHAT_GREETING);
    transcript
}
