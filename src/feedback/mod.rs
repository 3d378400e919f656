//! Feedback Channel: notification, full-surface pulse and audio cue.
//!
//! The three emitters are independent side effects of one outcome. None of
//! them blocks, and audio failures never escape this module.

pub mod audio;
pub mod clock;
pub mod notification;
pub mod phase;
pub mod pulse;

use crate::models::VerificationOutcome;
use std::sync::{Arc, Mutex, PoisonError};

pub use audio::{AudioCue, AudioSink, CommandAudioSink, RecordingAudioSink, SilentAudioSink};
pub use clock::{Clock, ManualClock, SystemClock};
pub use notification::{NotificationCenter, NotificationKind, NotificationView};
pub use phase::{Phase, PhaseTimings, ScheduledPhase};
pub use pulse::{PulseFrame, PulseTint, SurfacePulse};

pub const PASS_MESSAGE: &str = "Match! Barcodes verified.";
pub const FAIL_MESSAGE: &str = "No match! Barcodes differ.";

/// Everything the overlay layer needs for one frame
#[derive(Debug, Clone, Default)]
pub struct FeedbackSnapshot {
    pub notifications: Vec<NotificationView>,
    pub pulse: Option<PulseFrame>,
}

impl FeedbackSnapshot {
    pub fn is_animating(&self) -> bool {
        self.pulse.is_some() || !self.notifications.is_empty()
    }
}

pub struct FeedbackChannel {
    clock: Arc<dyn Clock>,
    notifications: Mutex<NotificationCenter>,
    pulse: Mutex<SurfacePulse>,
    audio: Arc<dyn AudioSink>,
}

impl FeedbackChannel {
    pub fn new(
        clock: Arc<dyn Clock>,
        audio: Arc<dyn AudioSink>,
        notification_timings: PhaseTimings,
        pulse_timings: PhaseTimings,
    ) -> Self {
        Self {
            clock,
            notifications: Mutex::new(NotificationCenter::new(notification_timings)),
            pulse: Mutex::new(SurfacePulse::new(pulse_timings)),
            audio,
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Fire all three emitters for `outcome`
    pub fn emit(&self, outcome: VerificationOutcome) {
        let now = self.clock.now();

        let (kind, message) = match outcome {
            VerificationOutcome::Pass => (NotificationKind::Success, PASS_MESSAGE),
            VerificationOutcome::Fail => (NotificationKind::Error, FAIL_MESSAGE),
        };
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(kind, message, now);

        let generation = self
            .pulse
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .trigger(outcome, now);

        if let Err(e) = self.audio.play(outcome.into()) {
            log::debug!("[Feedback] [AUDIO] Cue for {} not played: {}", outcome, e);
        }

        log::debug!("[Feedback] Emitted {} (pulse generation {})", outcome, generation);
    }

    /// Append a standalone notification (validation and transport errors)
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let now = self.clock.now();
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(kind, message, now)
    }

    pub fn snapshot(&self) -> FeedbackSnapshot {
        let now = self.clock.now();
        let notifications = self
            .notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .views_at(now);
        let pulse = self
            .pulse
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .frame_at(now);
        FeedbackSnapshot {
            notifications,
            pulse,
        }
    }
}
