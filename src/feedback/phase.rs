//! Two-phase scheduled-state machine shared by notifications and the pulse.
//!
//! `Entering → Visible → Exiting → Removed`, derived from the start time and
//! the configured durations. Nothing here owns a timer.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Durations of the three timed phases, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTimings {
    pub enter_ms: u64,
    pub visible_ms: u64,
    pub exit_ms: u64,
}

impl PhaseTimings {
    pub const fn new(enter_ms: u64, visible_ms: u64, exit_ms: u64) -> Self {
        Self {
            enter_ms,
            visible_ms,
            exit_ms,
        }
    }

    pub fn total(&self) -> Duration {
        Duration::from_millis(
            self.enter_ms
                .saturating_add(self.visible_ms)
                .saturating_add(self.exit_ms),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Visible,
    Exiting,
    Removed,
}

/// A lifecycle anchored at the instant it was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledPhase {
    started_at: Duration,
    timings: PhaseTimings,
}

impl ScheduledPhase {
    pub fn start(now: Duration, timings: PhaseTimings) -> Self {
        Self {
            started_at: now,
            timings,
        }
    }

    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    fn elapsed_ms(&self, now: Duration) -> u64 {
        now.saturating_sub(self.started_at).as_millis() as u64
    }

    pub fn phase_at(&self, now: Duration) -> Phase {
        let elapsed = self.elapsed_ms(now);
        let t = &self.timings;
        let visible_from = t.enter_ms;
        let exiting_from = visible_from.saturating_add(t.visible_ms);
        let removed_from = exiting_from.saturating_add(t.exit_ms);

        if elapsed < visible_from {
            Phase::Entering
        } else if elapsed < exiting_from {
            Phase::Visible
        } else if elapsed < removed_from {
            Phase::Exiting
        } else {
            Phase::Removed
        }
    }

    /// Opacity in 0..=1: ramps up while entering, down while exiting
    pub fn opacity_at(&self, now: Duration) -> f32 {
        let elapsed = self.elapsed_ms(now);
        let t = &self.timings;
        match self.phase_at(now) {
            Phase::Entering => elapsed as f32 / t.enter_ms.max(1) as f32,
            Phase::Visible => 1.0,
            Phase::Exiting => {
                let into_exit = elapsed - t.enter_ms - t.visible_ms;
                1.0 - into_exit as f32 / t.exit_ms.max(1) as f32
            }
            Phase::Removed => 0.0,
        }
    }

    pub fn is_removed_at(&self, now: Duration) -> bool {
        self.phase_at(now) == Phase::Removed
    }
}
