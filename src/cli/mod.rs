use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

pub use output::OutputFormat;

#[derive(Parser)]
#[command(name = "banking-agent-demo")]
#[command(about = "Scripted multi-agent banking customer-service demo")]
#[command(long_about = "Plays back the scripted agent workflow and conversation demos in the terminal. \
                       Every agent step is a fixed display string on a timer; nothing here classifies, \
                       authenticates, or retrieves real data.")]
pub struct Cli {
    /// Output format for rendered frames
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cycle the six agent stages on a fixed interval
    Workflow {
        /// Number of ticks to show before stopping
        #[arg(long, default_value = "6", help = "Stop after this many stage advances")]
        ticks: u64,
        /// Override the configured tick period
        #[arg(long, help = "Milliseconds each stage stays active")]
        period_ms: Option<u64>,
    },
    /// Run the autonomous conversation demo
    Autonomous {
        /// Scenario to start with, by index or title
        #[arg(long, help = "Scenario index (0-based) or exact title")]
        scenario: Option<String>,
        /// How many runs to play
        #[arg(long, default_value = "1", help = "Number of runs to play back")]
        runs: u32,
        /// Switch to the next scenario between runs
        #[arg(long, help = "Advance to the next scenario after each run")]
        switch: bool,
    },
    /// Chat with the scripted assistant
    Chat {
        /// Send one message and exit instead of reading stdin
        #[arg(long, help = "Single message to send; omit to read lines from stdin")]
        query: Option<String>,
    },
    /// List canned chat queries and built-in scenarios
    Scenarios,
}
