//! Full-surface color pulse.
//!
//! A single slot: triggering clears whatever pulse is in progress before the
//! new tint is installed, so the most recent outcome always owns the surface.

use super::phase::{Phase, PhaseTimings, ScheduledPhase};
use crate::models::VerificationOutcome;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseTint {
    Success,
    Failure,
}

impl From<VerificationOutcome> for PulseTint {
    fn from(outcome: VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Pass => PulseTint::Success,
            VerificationOutcome::Fail => PulseTint::Failure,
        }
    }
}

/// What the overlay should paint this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseFrame {
    pub tint: PulseTint,
    pub opacity: f32,
    pub phase: Phase,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct ActivePulse {
    tint: PulseTint,
    schedule: ScheduledPhase,
    generation: u64,
}

pub struct SurfacePulse {
    timings: PhaseTimings,
    active: Option<ActivePulse>,
    generation: u64,
}

impl SurfacePulse {
    pub fn new(timings: PhaseTimings) -> Self {
        Self {
            timings,
            active: None,
            generation: 0,
        }
    }

    /// Reset any running pulse, then start a new one for `outcome`
    pub fn trigger(&mut self, outcome: VerificationOutcome, now: Duration) -> u64 {
        self.reset();
        self.generation += 1;
        self.active = Some(ActivePulse {
            tint: outcome.into(),
            schedule: ScheduledPhase::start(now, self.timings),
            generation: self.generation,
        });
        self.generation
    }

    /// Clear color and visibility state
    pub fn reset(&mut self) {
        self.active = None;
    }

    pub fn frame_at(&mut self, now: Duration) -> Option<PulseFrame> {
        let active = self.active?;
        let phase = active.schedule.phase_at(now);
        if phase == Phase::Removed {
            self.active = None;
            return None;
        }
        Some(PulseFrame {
            tint: active.tint,
            opacity: active.schedule.opacity_at(now),
            phase,
            generation: active.generation,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_pulse_expires() {
        let mut pulse = SurfacePulse::new(PhaseTimings::new(50, 250, 400));
        pulse.trigger(VerificationOutcome::Pass, ms(0));
        let frame = pulse.frame_at(ms(100)).expect("pulse visible");
        assert_eq!(frame.tint, PulseTint::Success);
        assert_eq!(frame.phase, Phase::Visible);
        assert!(pulse.frame_at(ms(700)).is_none());
        assert!(!pulse.is_active());
    }

    #[test]
    fn test_retrigger_replaces_color_and_restarts_schedule() {
        let mut pulse = SurfacePulse::new(PhaseTimings::new(50, 250, 400));
        pulse.trigger(VerificationOutcome::Pass, ms(0));
        pulse.trigger(VerificationOutcome::Fail, ms(600));

        // the first pulse would already be gone; the second restarts at Entering
        let frame = pulse.frame_at(ms(600)).expect("second pulse running");
        assert_eq!(frame.tint, PulseTint::Failure);
        assert_eq!(frame.phase, Phase::Entering);
        assert_eq!(frame.generation, 2);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut pulse = SurfacePulse::new(PhaseTimings::new(50, 250, 400));
        pulse.trigger(VerificationOutcome::Fail, ms(0));
        pulse.reset();
        assert!(pulse.frame_at(ms(10)).is_none());
    }
}
