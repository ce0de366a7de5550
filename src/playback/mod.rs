// Scripted playback engine
//
// One sequence runner drives two independent engines: the workflow ticker
// (endless stage cycling) and the step player (finite scenario playback).

pub mod types;
pub mod sequence;
pub mod lifecycle;
pub mod player;
pub mod ticker;
pub mod resolver;
pub mod transcript;

pub use types::{EmittedStep, ItemStatus, Metric, Scenario, Stage, StageStatus, Step};
pub use sequence::{run_sequence, scale_delay, SequenceOutcome};
pub use lifecycle::PlayerSnapshot;
pub use player::{PlayOutcome, StepPlayer};
pub use ticker::{TickerHandle, TickerSnapshot, WorkflowCursor, WorkflowTicker};
pub use resolver::ScenarioResolver;
pub use transcript::{Role, Transcript, TranscriptEntry};
