use anyhow::Result;
use serde::Serialize;

use super::Command;
use crate::catalog;
use crate::cli::output::{FrameOutput, OutputFormat};
use crate::playback::{Scenario, ScenarioResolver};

#[derive(Debug, Serialize)]
struct ScenarioListing {
    canned_queries: Vec<(String, Scenario)>,
    fallback: Scenario,
    autonomous: Vec<Scenario>,
}

pub struct ScenariosCommand {
    pub output: FrameOutput,
}

impl ScenariosCommand {
    pub fn new() -> Self {
        Self {
            output: FrameOutput::new(OutputFormat::Text),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output = FrameOutput::new(format);
        self
    }
}

impl Default for ScenariosCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for ScenariosCommand {
    async fn execute(&self) -> Result<()> {
        let resolver = ScenarioResolver::builtin();
        let listing = ScenarioListing {
            canned_queries: resolver
                .canned_queries()
                .iter()
                .map(|query| (query.clone(), resolver.resolve(query)))
                .collect(),
            fallback: resolver.fallback().clone(),
            autonomous: catalog::autonomous_scenarios(),
        };

        self.output.emit(&listing, || {
            let mut out = String::from("💬 CANNED CHAT QUERIES (exact match only):\n");
            for (query, scenario) in &listing.canned_queries {
                out.push_str(&format!(
                    "   → \"{}\" - {} ({} steps, {}ms)\n",
                    query,
                    scenario.title,
                    scenario.len(),
                    scenario.total_delay().as_millis()
                ));
            }
            out.push_str(&format!(
                "   → anything else - {} ({} step)\n\n",
                listing.fallback.title,
                listing.fallback.len()
            ));
            out.push_str("🤖 AUTONOMOUS SCENARIOS:\n");
            for (index, scenario) in listing.autonomous.iter().enumerate() {
                out.push_str(&format!(
                    "   {}. {} ({} steps)\n",
                    index,
                    scenario.title,
                    scenario.len()
                ));
            }
            out
        })
    }
}
