//! Poll Scheduler: periodic dashboard refresh.
//!
//! Ticks immediately on start and then every interval. Each tick spawns its
//! refreshes without awaiting them, so a slow backend never delays the next
//! tick and ticks may overlap.

use crate::refresh::DashboardRefresher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Shortest accepted period; `tokio::time::interval` panics on zero
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct PollScheduler {
    interval: Duration,
    include_aggregates: bool,
}

/// Running scheduler; dropping it does not stop the loop, call `stop`
pub struct PollHandle {
    task: JoinHandle<()>,
    ticks: Arc<AtomicU64>,
}

impl PollHandle {
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(&self) {
        self.task.abort();
        log::info!("[Poll] Scheduler stopped after {} ticks", self.ticks());
    }
}

impl PollScheduler {
    /// Intervals shorter than `MIN_POLL_INTERVAL` are clamped up to it.
    pub fn new(interval: Duration, include_aggregates: bool) -> Self {
        let interval = if interval < MIN_POLL_INTERVAL {
            log::warn!(
                "[Poll] Interval {:?} below minimum, using {:?}",
                interval,
                MIN_POLL_INTERVAL
            );
            MIN_POLL_INTERVAL
        } else {
            interval
        };
        Self {
            interval,
            include_aggregates,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Must be called from within a tokio runtime
    pub fn start(&self, refresher: DashboardRefresher) -> PollHandle {
        let ticks = Arc::new(AtomicU64::new(0));
        let counter = ticks.clone();
        let period = self.interval;
        let include_aggregates = self.include_aggregates;

        log::info!(
            "[Poll] Starting scheduler: every {:?}, aggregates {}",
            period,
            include_aggregates
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                log::debug!("[Poll] Tick {}", n);
                let _ = refresher.spawn_refresh(include_aggregates);
            }
        });

        PollHandle { task, ticks }
    }
}
