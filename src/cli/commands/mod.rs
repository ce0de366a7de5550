use anyhow::Result;

pub mod autonomous;
pub mod chat;
pub mod scenarios;
pub mod workflow;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

pub async fn show_how_to_use() -> Result<()> {
    println!("🏦 Banking Agent Demo - Scripted Multi-Agent Playback");
    println!();
    println!("To get started:");
    println!("  🔁 banking-agent-demo workflow     # Watch the six agents cycle");
    println!("  🤖 banking-agent-demo autonomous   # Autonomous scenario playback");
    println!("  💬 banking-agent-demo chat         # Type a question, get a scripted reply");
    println!("  📋 banking-agent-demo scenarios    # List canned queries");
    println!();
    println!("💡 Add --format json for one snapshot per line.");
    Ok(())
}
