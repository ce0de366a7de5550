use anyhow::Result;
use std::time::Duration;

use super::Command;
use crate::catalog;
use crate::cli::output::{format_workflow_frame, FrameOutput, OutputFormat};
use crate::playback::{Stage, TickerSnapshot, WorkflowTicker};

pub struct WorkflowCommand {
    pub ticks: u64,
    pub period: Duration,
    pub output: FrameOutput,
}

impl WorkflowCommand {
    pub fn new(period: Duration) -> Self {
        Self {
            ticks: 6,
            period,
            output: FrameOutput::new(OutputFormat::Text),
        }
    }

    pub fn with_ticks(mut self, ticks: u64) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output = FrameOutput::new(format);
        self
    }

    fn render(&self, stages: &[Stage], snapshot: &TickerSnapshot) -> Result<()> {
        self.output.emit(snapshot, || {
            format_workflow_frame(stages, snapshot, catalog::WORKFLOW_QUERY)
        })
    }
}

impl Command for WorkflowCommand {
    async fn execute(&self) -> Result<()> {
        let ticker = WorkflowTicker::new(catalog::stages(), self.period);
        self.output.note(&format!(
            "🔁 Cycling {} agents every {}ms ({} ticks)\n",
            ticker.stages().len(),
            self.period.as_millis(),
            self.ticks
        ));

        let handle = ticker.start();
        let mut updates = handle.subscribe();

        let first = updates.borrow_and_update().clone();
        self.render(ticker.stages(), &first)?;
        let mut last_tick = first.tick;

        while last_tick < self.ticks {
            if updates.changed().await.is_err() {
                break;
            }
            let snapshot = updates.borrow_and_update().clone();
            if snapshot.tick == last_tick {
                continue;
            }
            last_tick = snapshot.tick;
            self.render(ticker.stages(), &snapshot)?;
        }

        handle.stop().await;
        self.output.note("⏹️  Workflow stopped");
        Ok(())
    }
}
