use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Instrument};

use super::sequence::{run_sequence, SequenceOutcome};
use super::types::{Stage, StageStatus};
use crate::telemetry::{create_playback_span, generate_correlation_id};

/// Wrapping cursor over a fixed-length stage list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowCursor {
    len: usize,
    position: usize,
}

impl WorkflowCursor {
    pub fn new(len: usize) -> Self {
        Self { len, position: 0 }
    }

    /// Advance one stage, wrapping to the first after the last
    pub fn tick(&mut self) {
        if self.len > 0 {
            self.position = (self.position + 1) % self.len;
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn status_of(&self, index: usize) -> StageStatus {
        if index < self.position {
            StageStatus::Complete
        } else if index == self.position {
            StageStatus::Active
        } else {
            StageStatus::Waiting
        }
    }

    pub fn statuses(&self) -> Vec<StageStatus> {
        (0..self.len).map(|index| self.status_of(index)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerSnapshot {
    /// Number of ticks since the ticker started
    pub tick: u64,
    pub cursor: usize,
    pub statuses: Vec<StageStatus>,
}

impl TickerSnapshot {
    fn from_cursor(tick: u64, cursor: &WorkflowCursor) -> Self {
        Self {
            tick,
            cursor: cursor.position(),
            statuses: cursor.statuses(),
        }
    }
}

/// Cycles a fixed list of stages on a fixed period, forever
#[derive(Debug, Clone)]
pub struct WorkflowTicker {
    stages: Arc<[Stage]>,
    period: Duration,
}

impl WorkflowTicker {
    pub fn new(stages: Vec<Stage>, period: Duration) -> Self {
        Self {
            stages: stages.into(),
            period,
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawn the periodic task. The timer stops when the handle is stopped or dropped.
    pub fn start(&self) -> TickerHandle {
        let len = self.stages.len();
        let period = self.period;
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let initial = TickerSnapshot::from_cursor(0, &WorkflowCursor::new(len));
        let (updates, receiver) = watch::channel(initial);

        let span = create_playback_span("workflow_ticker", "workflow", &generate_correlation_id());
        let task = tokio::spawn(
            async move {
                if len == 0 {
                    debug!("No stages to cycle, ticker idle");
                    return;
                }

                let mut cursor = WorkflowCursor::new(len);
                let outcome = run_sequence(
                    0u64..,
                    |_| period,
                    |_, tick| {
                        if *tick > 0 {
                            cursor.tick();
                        }
                        updates.send_replace(TickerSnapshot::from_cursor(*tick, &cursor));
                    },
                    &task_cancel,
                )
                .await;

                if let SequenceOutcome::Cancelled { emitted } = outcome {
                    info!(ticks = emitted, "Workflow ticker stopped");
                }
            }
            .instrument(span),
        );

        info!(stages = len, period_ms = period.as_millis() as u64, "Workflow ticker started");

        TickerHandle {
            cancel,
            task: Some(task),
            receiver,
        }
    }
}

/// Owner of a running ticker; dropping it stops the timer
pub struct TickerHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    receiver: watch::Receiver<TickerSnapshot>,
}

impl TickerHandle {
    pub fn subscribe(&self) -> watch::Receiver<TickerSnapshot> {
        self.receiver.clone()
    }

    pub fn current(&self) -> TickerSnapshot {
        self.receiver.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel the timer and wait for the task to wind down
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Ticker task ended abnormally");
            }
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_modulo_length() {
        let mut cursor = WorkflowCursor::new(6);
        for k in 0..20u64 {
            assert_eq!(cursor.position() as u64, k % 6);
            cursor.tick();
        }
    }

    #[test]
    fn statuses_split_around_cursor() {
        let mut cursor = WorkflowCursor::new(4);
        cursor.tick();
        cursor.tick();
        assert_eq!(
            cursor.statuses(),
            vec![
                StageStatus::Complete,
                StageStatus::Complete,
                StageStatus::Active,
                StageStatus::Waiting
            ]
        );
    }

    #[test]
    fn empty_cursor_never_moves() {
        let mut cursor = WorkflowCursor::new(0);
        cursor.tick();
        assert_eq!(cursor.position(), 0);
        assert!(cursor.statuses().is_empty());
    }
}
