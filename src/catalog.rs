//! Built-in demo content
//!
//! Agent stages, the autonomous scenarios and the canned chat queries. All of
//! it is display text; none of it is backed by real banking logic.

use crate::playback::{Scenario, Stage, Step};

pub const BALANCE_QUERY: &str = "What's my account balance?";
pub const DISPUTE_QUERY: &str = "I want to dispute a transaction";
pub const BLOCK_CARD_QUERY: &str = "Block my debit card";
pub const HISTORY_QUERY: &str = "Show my recent transactions";

/// Query shown above the workflow view
pub const WORKFLOW_QUERY: &str = BALANCE_QUERY;

/// The six agents cycled by the workflow view
pub fn stages() -> Vec<Stage> {
    vec![
        Stage::new("intent", "Intent Agent", "Understands customer queries using NLU")
            .with_metric("accuracy", "94.2%")
            .with_metric("latency", "0.2s"),
        Stage::new("auth", "Authentication Agent", "Verifies customer identity securely")
            .with_metric("success", "99.1%")
            .with_metric("fraud", "0.02%"),
        Stage::new("data", "Retrieval Agent", "Fetches real-time account information")
            .with_metric("accuracy", "99.8%")
            .with_metric("speed", "0.8s"),
        Stage::new("compliance", "Compliance Agent", "Ensures regulatory compliance")
            .with_metric("score", "100%")
            .with_metric("checks", "47"),
        Stage::new("decision", "Decision Agent", "Routes queries to auto-resolve or escalate")
            .with_metric("autoResolve", "73.2%")
            .with_metric("accuracy", "96.1%"),
        Stage::new("escalation", "HITL Escalation Agent", "Manages human handoffs with context")
            .with_metric("handoffs", "89")
            .with_metric("context", "100%"),
    ]
}

fn balance_inquiry(title: &str) -> Scenario {
    Scenario::new(
        title,
        vec![
            Step::new("Intent Agent", "Auto-classified: balance_inquiry", 800),
            Step::new("Auth Agent", "Biometric verification successful", 1200),
            Step::new("Retrieval Agent", "Account data retrieved securely", 900),
            Step::new("Compliance Agent", "Regulatory checks passed", 600),
            Step::new("Response Agent", "Balance: ₹1,25,847.50 delivered", 400),
        ],
    )
}

fn transaction_dispute(title: &str) -> Scenario {
    Scenario::new(
        title,
        vec![
            Step::new("Intent Agent", "Auto-classified: transaction_dispute", 700),
            Step::new("Auth Agent", "Enhanced verification initiated", 1000),
            Step::new("Compliance Agent", "Fraud patterns analyzed", 1100),
            Step::new("Decision Agent", "Complex case detected", 800),
            Step::new("Escalation Agent", "Human specialist notified with context", 600),
        ],
    )
}

/// Scenarios the autonomous demo cycles through with "switch demo"
pub fn autonomous_scenarios() -> Vec<Scenario> {
    vec![
        balance_inquiry("Balance Inquiry Processing"),
        transaction_dispute("Transaction Dispute Detection"),
    ]
}

/// Canned chat queries and their scripts, in display order
pub fn canned_routes() -> Vec<(String, Scenario)> {
    vec![
        (BALANCE_QUERY.to_string(), balance_inquiry("Balance Inquiry")),
        (DISPUTE_QUERY.to_string(), transaction_dispute("Transaction Dispute")),
        (
            BLOCK_CARD_QUERY.to_string(),
            Scenario::new(
                "Card Block",
                vec![
                    Step::new("Intent Agent", "Auto-classified: card_block", 600),
                    Step::new("Auth Agent", "OTP verification successful", 1000),
                    Step::new("Decision Agent", "Immediate block approved", 700),
                    Step::new("Response Agent", "Debit card ending 4821 blocked", 400),
                ],
            ),
        ),
        (
            HISTORY_QUERY.to_string(),
            Scenario::new(
                "Transaction History",
                vec![
                    Step::new("Intent Agent", "Auto-classified: transaction_history", 700),
                    Step::new("Auth Agent", "Session token verified", 800),
                    Step::new("Retrieval Agent", "Last 5 transactions retrieved", 900),
                    Step::new("Response Agent", "Transaction summary delivered", 400),
                ],
            ),
        ),
    ]
}

/// Single-step script for anything that is not a canned query
pub fn fallback_scenario() -> Scenario {
    Scenario::new(
        "General Request",
        vec![Step::new("Intent Agent", "Processing your request...", 1000)],
    )
}

pub const CHAT_GREETING: &str = "Hello! I'm your banking assistant. How can I help you today?";

pub const AUTONOMOUS_PLACEHOLDER: &str = "Autonomous processing will begin shortly...";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_stages_with_two_metrics_each() {
        let stages = stages();
        assert_eq!(stages.len(), 6);
        assert!(stages.iter().all(|s| s.metrics.len() == 2));
    }

    #[test]
    fn every_scenario_has_steps() {
        for scenario in autonomous_scenarios() {
            assert_eq!(scenario.len(), 5, "{}", scenario.title);
        }
        for (query, scenario) in canned_routes() {
            assert!(!scenario.is_empty(), "{query}");
        }
        assert_eq!(fallback_scenario().len(), 1);
    }
}
