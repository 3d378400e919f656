//! Transient notification stack.
//!
//! Every notification carries its own schedule; overlapping ones coexist and
//! leave the stack independently once their exit phase has elapsed.

use super::phase::{Phase, PhaseTimings, ScheduledPhase};
use std::collections::VecDeque;
use std::time::Duration;

/// Upper bound on simultaneously live notifications; the oldest is evicted
pub const MAX_NOTIFICATIONS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    schedule: ScheduledPhase,
}

impl Notification {
    pub fn phase_at(&self, now: Duration) -> Phase {
        self.schedule.phase_at(now)
    }
}

/// Render-ready view of one live notification
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationView {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub phase: Phase,
    pub opacity: f32,
}

pub struct NotificationCenter {
    timings: PhaseTimings,
    items: VecDeque<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new(timings: PhaseTimings) -> Self {
        Self {
            timings,
            items: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Append a notification starting its enter phase at `now`
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>, now: Duration) -> u64 {
        self.prune(now);
        while self.items.len() >= MAX_NOTIFICATIONS {
            self.items.pop_front();
        }

        let id = self.next_id;
        self.next_id += 1;
        self.items.push_back(Notification {
            id,
            kind,
            message: message.into(),
            schedule: ScheduledPhase::start(now, self.timings),
        });
        id
    }

    /// Drop notifications whose lifecycle has reached `Removed`
    pub fn prune(&mut self, now: Duration) {
        self.items.retain(|n| !n.schedule.is_removed_at(now));
    }

    /// Live notifications in insertion order
    pub fn views_at(&mut self, now: Duration) -> Vec<NotificationView> {
        self.prune(now);
        self.items
            .iter()
            .map(|n| NotificationView {
                id: n.id,
                kind: n.kind,
                message: n.message.clone(),
                phase: n.schedule.phase_at(now),
                opacity: n.schedule.opacity_at(now),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
