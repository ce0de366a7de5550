// Banking Agent Demo Library - scripted multi-agent playback
// This exposes the playback engine and demos for the CLI and for testing

pub mod playback;
pub mod demo;
pub mod catalog;
pub mod cli;
pub mod telemetry;
pub mod config;
pub mod error;

// Re-export key types for easy access
pub use playback::{
    run_sequence,
    ItemStatus,
    PlayOutcome,
    PlayerSnapshot,
    Role,
    Scenario,
    ScenarioResolver,
    SequenceOutcome,
    Stage,
    StageStatus,
    Step,
    StepPlayer,
    TickerHandle,
    TickerSnapshot,
    Transcript,
    WorkflowCursor,
    WorkflowTicker,
};
pub use demo::{AutonomousDemo, ChatSession, SubmitOutcome};
pub use telemetry::{init_telemetry, shutdown_telemetry, generate_correlation_id, create_playback_span};
pub use self::config::{DemoConfig, config};
pub use error::DemoError;
