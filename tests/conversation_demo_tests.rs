//! Conversation demo tests
//!
//! Covers the free-text resolver, the chat session transcript, and the
//! autonomous demo controls. The resolver is a literal lookup table; these
//! tests pin that down so nobody mistakes it for language understanding.

use banking_agent_demo::catalog;
use banking_agent_demo::{
    AutonomousDemo, ChatSession, PlayOutcome, Role, ScenarioResolver, SubmitOutcome,
};
use std::time::Duration;

#[test]
fn resolver_maps_balance_query_to_five_step_script() {
    let resolver = ScenarioResolver::builtin();
    let scenario = resolver.resolve("What's my account balance?");
    let sources: Vec<&str> = scenario.steps.iter().map(|s| s.source.as_str()).collect();
    assert_eq!(
        sources,
        vec!["Intent Agent", "Auth Agent", "Retrieval Agent", "Compliance Agent", "Response Agent"]
    );
}

#[test]
fn resolver_falls_back_for_anything_else() {
    let resolver = ScenarioResolver::builtin();
    for input in ["gibberish query", "", "WHAT'S MY ACCOUNT BALANCE?", "balance"] {
        let scenario = resolver.resolve(input);
        assert_eq!(scenario.len(), 1, "{input:?}");
        assert_eq!(scenario.steps[0].message, "Processing your request...");
    }
}

#[test]
fn every_canned_query_resolves_to_its_own_script() {
    let resolver = ScenarioResolver::builtin();
    for query in resolver.canned_queries() {
        assert_ne!(&resolver.resolve(query), resolver.fallback(), "{query}");
    }
}

#[tokio::test(start_paused = true)]
async fn chat_answers_unknown_text_with_fallback() {
    let chat = ChatSession::builtin(1.0);
    let outcome = chat.submit("can you help me?").await;
    assert_eq!(outcome, SubmitOutcome::Answered { steps: 1, canned: false });

    let transcript = chat.transcript();
    let last = transcript.last().expect("agent reply");
    assert_eq!(last.role, Role::Agent);
    assert_eq!(last.source.as_deref(), Some("Intent Agent"));
}

#[tokio::test(start_paused = true)]
async fn chat_transcript_grows_monotonically_across_messages() {
    let chat = ChatSession::builtin(1.0);
    chat.submit(catalog::BLOCK_CARD_QUERY).await;
    let after_first = chat.transcript().len();
    chat.submit(catalog::HISTORY_QUERY).await;
    let after_second = chat.transcript().len();

    // greeting + (user + 4 agent) + (user + 4 agent)
    assert_eq!(after_first, 6);
    assert_eq!(after_second, 11);
}

#[tokio::test(start_paused = true)]
async fn chat_ignores_input_while_replying() {
    let chat = ChatSession::builtin(1.0);
    let mut updates = chat.player().subscribe();

    let first = chat.submit(catalog::BALANCE_QUERY);
    let second = async {
        updates.wait_for(|s| s.running).await.expect("player alive");
        let busy = chat.submit(catalog::DISPUTE_QUERY).await;
        let blocked_restart = chat.restart();
        (busy, blocked_restart)
    };

    let (answered, (busy, blocked_restart)) = tokio::join!(first, second);
    assert_eq!(answered, SubmitOutcome::Answered { steps: 5, canned: true });
    assert_eq!(busy, SubmitOutcome::IgnoredBusy);
    assert!(!blocked_restart);

    let users = chat
        .transcript()
        .entries()
        .iter()
        .filter(|e| e.role == Role::User)
        .count();
    assert_eq!(users, 1);
}

#[tokio::test(start_paused = true)]
async fn autonomous_switch_is_ignored_while_running() {
    let demo = AutonomousDemo::builtin(1.0);
    let mut updates = demo.player().subscribe();

    let run = demo.run();
    let attempt = async {
        updates.wait_for(|s| s.running).await.expect("player alive");
        (demo.switch_demo(), demo.indicator())
    };

    let (outcome, (switched, indicator)) = tokio::join!(run, attempt);
    assert_eq!(outcome, PlayOutcome::Completed { steps: 5 });
    assert!(!switched);
    assert_eq!(indicator, "Processing");
    assert_eq!(demo.selected_index(), 0);
    assert_eq!(demo.indicator(), "Ready");
}

#[tokio::test(start_paused = true)]
async fn autonomous_demo_plays_switched_scenario() {
    let demo = AutonomousDemo::builtin(4.0);
    assert!(demo.switch_demo());
    let start = tokio::time::Instant::now();
    demo.autostart(Duration::from_millis(1000)).await;

    let snapshot = demo.snapshot();
    assert_eq!(snapshot.scenario_title, "Transaction Dispute Detection");
    assert_eq!(snapshot.items.last().map(|i| i.source.as_str()), Some("Escalation Agent"));
    // 1000ms wait plus 4200ms of steps at 4x speed
    assert!(start.elapsed() >= Duration::from_millis(2050));
}
