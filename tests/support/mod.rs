//! Shared fixtures for the integration tests: an in-memory backend with call
//! counters and an optional gate that holds submissions open.

#![allow(dead_code)]

use futures::future::{BoxFuture, FutureExt};
use scanmatch_dashboard::error::{FetchError, TransportError};
use scanmatch_dashboard::feedback::{
    AudioSink, FeedbackChannel, ManualClock, PhaseTimings, RecordingAudioSink,
};
use scanmatch_dashboard::models::{ScanRecord, ScanRequest, ShiftBucket, SummaryStats};
use scanmatch_dashboard::{DashboardContext, VerificationBackend};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

pub const NOTIFICATION_TIMINGS: PhaseTimings = PhaseTimings::new(300, 3000, 300);
pub const PULSE_TIMINGS: PhaseTimings = PhaseTimings::new(50, 250, 400);

pub struct StubBackend {
    pub submit_response: Mutex<Result<String, TransportError>>,
    pub scans: Mutex<Result<Vec<ScanRecord>, FetchError>>,
    pub summary: Mutex<Result<SummaryStats, FetchError>>,
    pub shifts: Mutex<Result<Vec<ShiftBucket>, FetchError>>,
    /// When set, each submission waits for one permit
    pub submit_gate: Option<Arc<Semaphore>>,
    /// When set, the scans fetch sleeps this long before answering
    pub scans_delay: Option<Duration>,
    pub submitted: Mutex<Vec<ScanRequest>>,
    pub submit_calls: AtomicUsize,
    pub scans_calls: AtomicUsize,
    pub summary_calls: AtomicUsize,
    pub shifts_calls: AtomicUsize,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            submit_response: Mutex::new(Ok(r#"{"status": "success", "result": "Match"}"#.to_string())),
            scans: Mutex::new(Ok(Vec::new())),
            summary: Mutex::new(Ok(SummaryStats {
                total_scans: 0,
                total_passed: 0,
                total_failed: 0,
            })),
            shifts: Mutex::new(Ok(Vec::new())),
            submit_gate: None,
            scans_delay: None,
            submitted: Mutex::new(Vec::new()),
            submit_calls: AtomicUsize::new(0),
            scans_calls: AtomicUsize::new(0),
            summary_calls: AtomicUsize::new(0),
            shifts_calls: AtomicUsize::new(0),
        }
    }
}

impl StubBackend {
    pub fn answering(body: &str) -> Self {
        let stub = Self::default();
        *stub.submit_response.lock().unwrap() = Ok(body.to_string());
        stub
    }

    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            submit_gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

impl VerificationBackend for StubBackend {
    fn submit_scan(&self, request: ScanRequest) -> BoxFuture<'static, Result<String, TransportError>> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(request);
        let response = self.submit_response.lock().unwrap().clone();
        let gate = self.submit_gate.clone();
        async move {
            if let Some(gate) = gate {
                let _permit = gate.acquire().await.expect("gate closed");
            }
            response
        }
        .boxed()
    }

    fn fetch_recent_scans(&self) -> BoxFuture<'static, Result<Vec<ScanRecord>, FetchError>> {
        self.scans_calls.fetch_add(1, Ordering::SeqCst);
        let response = self.scans.lock().unwrap().clone();
        let delay = self.scans_delay;
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            response
        }
        .boxed()
    }

    fn fetch_summary(&self) -> BoxFuture<'static, Result<SummaryStats, FetchError>> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        let response = self.summary.lock().unwrap().clone();
        async move { response }.boxed()
    }

    fn fetch_shift_distribution(&self) -> BoxFuture<'static, Result<Vec<ShiftBucket>, FetchError>> {
        self.shifts_calls.fetch_add(1, Ordering::SeqCst);
        let response = self.shifts.lock().unwrap().clone();
        async move { response }.boxed()
    }
}

pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub audio: Arc<RecordingAudioSink>,
    pub ctx: Arc<DashboardContext>,
}

pub fn feedback_channel(
    clock: Arc<ManualClock>,
    audio: Arc<dyn AudioSink>,
) -> FeedbackChannel {
    FeedbackChannel::new(clock, audio, NOTIFICATION_TIMINGS, PULSE_TIMINGS)
}

/// Full dashboard layout on a manual clock with a recording audio sink
pub fn full_harness() -> Harness {
    harness_with(RecordingAudioSink::new(), DashboardContext::full)
}

pub fn harness_with(
    audio: RecordingAudioSink,
    layout: impl FnOnce(FeedbackChannel) -> DashboardContext,
) -> Harness {
    let clock = Arc::new(ManualClock::new());
    let audio = Arc::new(audio);
    let feedback = feedback_channel(clock.clone(), audio.clone());
    Harness {
        clock,
        audio,
        ctx: Arc::new(layout(feedback)),
    }
}

pub fn stats(total: u64, passed: u64, failed: u64) -> SummaryStats {
    SummaryStats {
        total_scans: total,
        total_passed: passed,
        total_failed: failed,
    }
}

pub fn shift(name: &str, count: u64) -> ShiftBucket {
    ShiftBucket {
        shift_name: name.to_string(),
        scan_count: count,
    }
}
