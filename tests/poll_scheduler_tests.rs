//! Poll scheduler cadence on a paused tokio clock.

mod support;

use scanmatch_dashboard::scheduler::MIN_POLL_INTERVAL;
use scanmatch_dashboard::{DashboardRefresher, PollScheduler};
use std::sync::Arc;
use std::time::Duration;
use support::{full_harness, StubBackend};

const INTERVAL: Duration = Duration::from_secs(10);

#[tokio::test(start_paused = true)]
async fn test_first_tick_is_immediate_then_fixed_interval() {
    let stub = Arc::new(StubBackend::default());
    let harness = full_harness();
    let handle = PollScheduler::new(INTERVAL, true)
        .start(DashboardRefresher::new(stub.clone(), harness.ctx.clone()));

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(handle.ticks(), 1);
    assert_eq!(StubBackend::calls(&stub.scans_calls), 1);
    assert_eq!(StubBackend::calls(&stub.summary_calls), 1);
    assert_eq!(StubBackend::calls(&stub.shifts_calls), 1);

    tokio::time::sleep(INTERVAL).await;
    assert_eq!(handle.ticks(), 2);

    tokio::time::sleep(INTERVAL * 3).await;
    assert_eq!(handle.ticks(), 5);
    assert_eq!(StubBackend::calls(&stub.scans_calls), 5);

    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn test_table_only_polling() {
    let stub = Arc::new(StubBackend::default());
    let harness = full_harness();
    let handle = PollScheduler::new(INTERVAL, false)
        .start(DashboardRefresher::new(stub.clone(), harness.ctx.clone()));

    tokio::time::sleep(INTERVAL * 2 + Duration::from_millis(1)).await;
    assert_eq!(handle.ticks(), 3);
    assert_eq!(StubBackend::calls(&stub.scans_calls), 3);
    assert_eq!(StubBackend::calls(&stub.summary_calls), 0);
    assert_eq!(StubBackend::calls(&stub.shifts_calls), 0);

    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn test_slow_backend_does_not_delay_ticks() {
    let stub = Arc::new(StubBackend {
        scans_delay: Some(Duration::from_secs(25)),
        ..StubBackend::default()
    });
    let harness = full_harness();
    let handle = PollScheduler::new(INTERVAL, false)
        .start(DashboardRefresher::new(stub.clone(), harness.ctx.clone()));

    tokio::time::sleep(INTERVAL * 3 + Duration::from_millis(1)).await;
    // overlapping fetches are allowed; each tick still fired on time
    assert_eq!(handle.ticks(), 4);
    assert_eq!(StubBackend::calls(&stub.scans_calls), 4);

    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn test_stop_halts_ticking() {
    let stub = Arc::new(StubBackend::default());
    let harness = full_harness();
    let handle = PollScheduler::new(INTERVAL, true)
        .start(DashboardRefresher::new(stub.clone(), harness.ctx.clone()));

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(handle.is_running());
    handle.stop();

    tokio::time::sleep(INTERVAL * 5).await;
    assert_eq!(handle.ticks(), 1);
    assert!(!handle.is_running());
    assert_eq!(StubBackend::calls(&stub.scans_calls), 1);
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_runs_at_minimum_period() {
    let stub = Arc::new(StubBackend::default());
    let harness = full_harness();
    let handle = PollScheduler::new(Duration::ZERO, false)
        .start(DashboardRefresher::new(stub.clone(), harness.ctx.clone()));

    tokio::time::sleep(MIN_POLL_INTERVAL * 2 + Duration::from_millis(50)).await;
    assert!(handle.is_running());
    assert_eq!(handle.ticks(), 3);

    handle.stop();
}
