use anyhow::Result;
use clap::Parser;

use banking_agent_demo::cli::commands::autonomous::AutonomousCommand;
use banking_agent_demo::cli::commands::chat::ChatCommand;
use banking_agent_demo::cli::commands::scenarios::ScenariosCommand;
use banking_agent_demo::cli::commands::workflow::WorkflowCommand;
use banking_agent_demo::cli::commands::{show_how_to_use, Command};
use banking_agent_demo::cli::{Cli, Commands};
use banking_agent_demo::{config, init_telemetry, shutdown_telemetry};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let demo_config = config()?;
    init_telemetry(&demo_config.observability)?;

    let format = cli.format;
    let speed = demo_config.playback.speed;

    let result = tokio::runtime::Runtime::new()?.block_on(async {
        match cli.command {
            // No subcommand: explain what is available
            None => show_how_to_use().await,
            Some(Commands::Workflow { ticks, period_ms }) => {
                let period = period_ms
                    .filter(|ms| *ms > 0)
                    .map(std::time::Duration::from_millis)
                    .unwrap_or_else(|| demo_config.workflow.period());
                WorkflowCommand::new(period)
                    .with_ticks(ticks)
                    .with_format(format)
                    .execute()
                    .await
            }
            Some(Commands::Autonomous { scenario, runs, switch }) => {
                AutonomousCommand::new(demo_config.autonomous.autostart_delay(), speed)
                    .with_scenario(scenario)
                    .with_runs(runs, switch)
                    .with_format(format)
                    .execute()
                    .await
            }
            Some(Commands::Chat { query }) => {
                ChatCommand::new(speed)
                    .with_query(query)
                    .with_format(format)
                    .execute()
                    .await
            }
            Some(Commands::Scenarios) => ScenariosCommand::new().with_format(format).execute().await,
        }
    });

    shutdown_telemetry();
    result
}
