//! Sequence runner
//!
//! The one "emit an item, then wait its delay" loop shared by the workflow
//! ticker (endless, fixed period) and the step player (finite, per-step delay).

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How a sequence run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// Every item was emitted and its delay elapsed
    Completed { emitted: usize },
    /// The token fired before the sequence ran out
    Cancelled { emitted: usize },
}

impl SequenceOutcome {
    pub fn emitted(&self) -> usize {
        match self {
            SequenceOutcome::Completed { emitted } | SequenceOutcome::Cancelled { emitted } => *emitted,
        }
    }
}

/// Drive `items` in order: call `advance` for an item, then suspend for
/// `delay_of(item)` before moving to the next one.
///
/// Item `i + 1` is never advanced before item `i`'s delay has elapsed.
/// Cancellation is only observed at suspension points, so an item that has
/// been advanced always counts as emitted.
pub async fn run_sequence<I, T, D, F>(
    items: I,
    mut delay_of: D,
    mut advance: F,
    cancel: &CancellationToken,
) -> SequenceOutcome
where
    I: IntoIterator<Item = T>,
    D: FnMut(&T) -> Duration,
    F: FnMut(usize, &T),
{
    let mut emitted = 0;

    for (index, item) in items.into_iter().enumerate() {
        if cancel.is_cancelled() {
            return SequenceOutcome::Cancelled { emitted };
        }

        advance(index, &item);
        emitted += 1;

        let delay = delay_of(&item);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return SequenceOutcome::Cancelled { emitted },
            _ = tokio::time::sleep(delay) => {}
        }
    }

    SequenceOutcome::Completed { emitted }
}

/// Scale a scripted delay by a playback speed factor (2.0 plays twice as fast)
pub fn scale_delay(delay: Duration, speed: f64) -> Duration {
    if speed.is_finite() && speed > 0.0 {
        delay.div_f64(speed)
    } else {
        delay
    }
}
