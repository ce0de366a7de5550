use thiserror::Error;

/// Errors from the CLI shell around the playback engine.
///
/// The engine itself cannot fail: delays always elapse and lookups fall back.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Unknown scenario '{name}' (available: {available})")]
    UnknownScenario { name: String, available: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}
