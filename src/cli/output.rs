use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write as _;

use crate::playback::{
    ItemStatus, PlayerSnapshot, Role, Stage, StageStatus, TickerSnapshot, TranscriptEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable frames
    #[default]
    Text,
    /// One JSON snapshot per line
    Json,
}

/// Prints snapshots either as text frames or JSON lines
#[derive(Debug, Clone, Copy)]
pub struct FrameOutput {
    format: OutputFormat,
}

impl FrameOutput {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print `text` in text mode, or `value` as one JSON line in JSON mode
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
            OutputFormat::Text => print!("{}", text()),
        }
        Ok(())
    }

    /// Free-form text that has no JSON counterpart
    pub fn note(&self, text: &str) {
        if !self.is_json() {
            println!("{text}");
        }
    }
}

fn stage_icon(status: StageStatus) -> &'static str {
    match status {
        StageStatus::Complete => "✅",
        StageStatus::Active => "⏳",
        StageStatus::Waiting => "⚪",
    }
}

fn item_icon(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Completed => "✅",
        ItemStatus::Current => "🔄",
        ItemStatus::Pending => "⚪",
    }
}

pub fn format_workflow_frame(stages: &[Stage], snapshot: &TickerSnapshot, query: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🏦 MULTI-AGENT WORKFLOW (tick {})", snapshot.tick);
    let _ = writeln!(out, "══════════════════════════════");
    let _ = writeln!(out, "Current Query: \"{query}\"");
    let _ = writeln!(out);

    for (stage, status) in stages.iter().zip(&snapshot.statuses) {
        let metrics: Vec<String> = stage
            .metrics
            .iter()
            .map(|m| format!("{} {}", m.label(), m.value))
            .collect();
        let _ = writeln!(
            out,
            "{} {:<24} {:<11} {}",
            stage_icon(*status),
            stage.title,
            status.label(),
            metrics.join(" · ")
        );
    }
    let _ = writeln!(out);
    out
}

pub fn format_player_frame(snapshot: &PlayerSnapshot, placeholder: Option<&str>) -> String {
    let mut out = String::new();
    let indicator = if snapshot.running { "Processing" } else { "Ready" };
    let _ = writeln!(out, "🤖 {} [{}]", snapshot.scenario_title, indicator);
    let _ = writeln!(out, "──────────────────────────────");

    if let Some(text) = placeholder {
        let _ = writeln!(out, "⚡ {text}");
    }
    for item in &snapshot.items {
        let _ = writeln!(out, "{} {}: {}", item_icon(item.status), item.source, item.message);
    }
    let _ = writeln!(
        out,
        "   {}/{} completed",
        snapshot.count_with(ItemStatus::Completed),
        snapshot.total_steps
    );
    let _ = writeln!(out);
    out
}

pub fn format_entry(entry: &TranscriptEntry) -> String {
    match entry.role {
        Role::User => format!("🧑 You: {}", entry.text),
        Role::Agent => format!(
            "🤖 {}: {}",
            entry.source.as_deref().unwrap_or("Agent"),
            entry.text
        ),
        Role::System => format!("💬 {}", entry.text),
    }
}
