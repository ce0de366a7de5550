//! Workflow ticker tests
//!
//! Uses tokio::time controls so the 3-second stage period elapses instantly.

use banking_agent_demo::catalog;
use banking_agent_demo::{StageStatus, WorkflowTicker};
use std::time::Duration;

const PERIOD: Duration = Duration::from_millis(3000);

#[tokio::test(start_paused = true)]
async fn cursor_after_k_ticks_is_k_mod_stage_count() {
    let ticker = WorkflowTicker::new(catalog::stages(), PERIOD);
    let n = ticker.stages().len() as u64;
    let handle = ticker.start();
    let mut updates = handle.subscribe();

    for k in 0..=(2 * n + 3) {
        let snapshot = updates
            .wait_for(|s| s.tick >= k)
            .await
            .expect("ticker alive")
            .clone();
        assert_eq!(snapshot.tick, k);
        assert_eq!(snapshot.cursor as u64, k % n);
        assert_eq!(snapshot.statuses[snapshot.cursor], StageStatus::Active);
        assert!(snapshot.statuses[..snapshot.cursor]
            .iter()
            .all(|s| *s == StageStatus::Complete));
        assert!(snapshot.statuses[snapshot.cursor + 1..]
            .iter()
            .all(|s| *s == StageStatus::Waiting));
    }

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn ticks_arrive_one_period_apart() {
    let ticker = WorkflowTicker::new(catalog::stages(), PERIOD);
    let handle = ticker.start();
    let mut updates = handle.subscribe();

    updates.wait_for(|s| s.tick == 1).await.expect("ticker alive");
    let start = tokio::time::Instant::now();
    updates.wait_for(|s| s.tick == 2).await.expect("ticker alive");
    assert!(start.elapsed() >= PERIOD - Duration::from_millis(1));

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stopping_the_handle_halts_the_timer() {
    let ticker = WorkflowTicker::new(catalog::stages(), PERIOD);
    let handle = ticker.start();
    let mut updates = handle.subscribe();
    updates.wait_for(|s| s.tick == 2).await.expect("ticker alive");
    assert!(handle.is_running());

    handle.stop().await;
    let last = updates.borrow_and_update().tick;

    tokio::time::sleep(PERIOD * 5).await;
    // sender is gone once the task exits, so no further ticks can arrive
    assert!(updates.changed().await.is_err());
    assert_eq!(updates.borrow().tick, last);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_the_task() {
    let ticker = WorkflowTicker::new(catalog::stages(), PERIOD);
    let handle = ticker.start();
    let mut updates = handle.subscribe();
    updates.wait_for(|s| s.tick == 1).await.expect("ticker alive");

    drop(handle);
    tokio::time::sleep(PERIOD * 3).await;
    assert!(updates.changed().await.is_err());
    assert!(updates.borrow().tick <= 2);
}

#[tokio::test]
async fn empty_stage_list_never_ticks() {
    let ticker = WorkflowTicker::new(Vec::new(), Duration::from_millis(10));
    let handle = ticker.start();
    let mut updates = handle.subscribe();

    assert!(updates.changed().await.is_err());
    assert_eq!(handle.current().tick, 0);
    assert!(handle.current().statuses.is_empty());
}
