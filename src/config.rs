use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::DemoError;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "banking-demo.toml";

/// Main configuration structure for the demo
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Workflow ticker settings
    pub workflow: WorkflowConfig,
    /// Autonomous demo settings
    pub autonomous: AutonomousConfig,
    /// Step playback settings
    pub playback: PlaybackConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Time each stage stays active
    pub period_ms: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self { period_ms: 3000 }
    }
}

impl WorkflowConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AutonomousConfig {
    /// Delay before the demo starts itself after opening or switching
    pub autostart_delay_ms: u64,
}

impl Default for AutonomousConfig {
    fn default() -> Self {
        Self {
            autostart_delay_ms: 1000,
        }
    }
}

impl AutonomousConfig {
    pub fn autostart_delay(&self) -> Duration {
        Duration::from_millis(self.autostart_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Multiplier applied to scripted delays (2.0 plays twice as fast)
    pub speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
    /// Emit logs as JSON lines instead of plain text
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}

impl DemoConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (banking-demo.toml)
    /// 3. Environment variables (prefixed with BANKING_DEMO_, nested keys split by `__`)
    pub fn load() -> Result<Self, DemoError> {
        let path = Path::new(CONFIG_FILE);
        Self::load_from(path.exists().then_some(path))
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self, DemoError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("BANKING_DEMO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let demo_config: DemoConfig = builder.build()?.try_deserialize()?;
        demo_config.validate()?;
        Ok(demo_config)
    }

    pub fn validate(&self) -> Result<(), DemoError> {
        if !(self.playback.speed.is_finite() && self.playback.speed > 0.0) {
            return Err(DemoError::InvalidConfig(format!(
                "playback.speed must be a positive number, got {}",
                self.playback.speed
            )));
        }
        if self.workflow.period_ms == 0 {
            return Err(DemoError::InvalidConfig(
                "workflow.period_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DemoError> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<(), DemoError> {
        if Path::new(".env").exists() {
            if let Err(e) = dotenvy::dotenv() {
                return Err(DemoError::InvalidConfig(format!("unreadable .env file: {e}")));
            }
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<DemoConfig, DemoError>> = std::sync::LazyLock::new(|| {
    // Load .env file first
    let _ = DemoConfig::load_env_file();
    DemoConfig::load()
});

/// Get the global configuration
pub fn config() -> anyhow::Result<&'static DemoConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}
