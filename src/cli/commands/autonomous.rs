use anyhow::Result;
use std::time::Duration;
use tokio::sync::watch;

use super::Command;
use crate::cli::output::{format_player_frame, FrameOutput, OutputFormat};
use crate::demo::AutonomousDemo;
use crate::error::DemoError;
use crate::playback::{PlayOutcome, PlayerSnapshot};

pub struct AutonomousCommand {
    pub scenario: Option<String>,
    pub runs: u32,
    pub switch: bool,
    pub autostart_delay: Duration,
    pub speed: f64,
    pub output: FrameOutput,
}

impl AutonomousCommand {
    pub fn new(autostart_delay: Duration, speed: f64) -> Self {
        Self {
            scenario: None,
            runs: 1,
            switch: false,
            autostart_delay,
            speed,
            output: FrameOutput::new(OutputFormat::Text),
        }
    }

    pub fn with_scenario(mut self, scenario: Option<String>) -> Self {
        self.scenario = scenario;
        self
    }

    pub fn with_runs(mut self, runs: u32, switch: bool) -> Self {
        self.runs = runs;
        self.switch = switch;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output = FrameOutput::new(format);
        self
    }

    fn render(&self, demo: &AutonomousDemo, snapshot: &PlayerSnapshot) -> Result<()> {
        self.output
            .emit(snapshot, || format_player_frame(snapshot, demo.placeholder()))
    }

    fn render_if_changed(&self, demo: &AutonomousDemo, updates: &mut watch::Receiver<PlayerSnapshot>) -> Result<()> {
        if updates.has_changed().unwrap_or(false) {
            let snapshot = updates.borrow_and_update().clone();
            self.render(demo, &snapshot)?;
        }
        Ok(())
    }
}

/// Find a scenario by 0-based index or exact title
pub fn select_scenario(demo: &AutonomousDemo, wanted: &str) -> Result<usize, DemoError> {
    let titles: Vec<&str> = demo.scenarios().iter().map(|s| s.title.as_str()).collect();
    let index = match wanted.parse::<usize>() {
        Ok(index) if index < titles.len() => Some(index),
        _ => titles.iter().position(|title| *title == wanted),
    };
    index.ok_or_else(|| DemoError::UnknownScenario {
        name: wanted.to_string(),
        available: titles.join(", "),
    })
}

impl Command for AutonomousCommand {
    async fn execute(&self) -> Result<()> {
        let demo = AutonomousDemo::builtin(self.speed);
        if let Some(wanted) = &self.scenario {
            let index = select_scenario(&demo, wanted)?;
            demo.select(index);
        }

        let mut updates = demo.player().subscribe();

        for run in 0..self.runs {
            self.render(&demo, &updates.borrow_and_update().clone())?;

            let playback = demo.autostart(self.autostart_delay);
            tokio::pin!(playback);

            let outcome = loop {
                tokio::select! {
                    outcome = &mut playback => break outcome,
                    Ok(()) = updates.changed() => {
                        let snapshot = updates.borrow_and_update().clone();
                        self.render(&demo, &snapshot)?;
                    }
                }
            };
            self.render_if_changed(&demo, &mut updates)?;

            if let PlayOutcome::Completed { steps } = outcome {
                self.output.note(&format!(
                    "✅ Run {} finished: {} steps · Fully autonomous, no human intervention required\n",
                    run + 1,
                    steps
                ));
            }

            if self.switch && run + 1 < self.runs {
                demo.switch_demo();
            }
        }

        Ok(())
    }
}
