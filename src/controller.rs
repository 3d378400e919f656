//! SubmissionController: owns the verify flow from keystroke to feedback.
//!
//! At most one submission is in flight. The form's affordance is disabled for
//! the duration and restored exactly once when the submission settles, on
//! every path (success, transport failure, panic unwinding through the guard).

use crate::backend::VerificationBackend;
use crate::classifier::classify_body;
use crate::context::DashboardContext;
use crate::error::{BarcodeField, TransportError, ValidationError};
use crate::feedback::NotificationKind;
use crate::models::{FormState, InputField, ScanRequest, SubmissionState, VerificationOutcome};
use crate::refresh::{DashboardRefresher, RefreshHandles};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// What happened to one submit attempt
pub enum SubmissionReport {
    /// Another submission was in flight; nothing changed
    Busy,
    /// Empty input; an error notification was shown, nothing was sent
    Invalid(ValidationError),
    /// Request failed at the transport level; no pulse, no audio
    TransportFailed(TransportError),
    /// Backend answered; feedback was emitted and refreshes spawned
    Verified {
        outcome: VerificationOutcome,
        refresh: RefreshHandles,
    },
}

impl SubmissionReport {
    pub fn outcome(&self) -> Option<VerificationOutcome> {
        match self {
            SubmissionReport::Verified { outcome, .. } => Some(*outcome),
            _ => None,
        }
    }
}

impl std::fmt::Debug for SubmissionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionReport::Busy => write!(f, "Busy"),
            SubmissionReport::Invalid(e) => write!(f, "Invalid({:?})", e),
            SubmissionReport::TransportFailed(e) => write!(f, "TransportFailed({:?})", e),
            SubmissionReport::Verified { outcome, refresh } => {
                write!(f, "Verified({:?}, refreshes: {:?})", outcome, refresh.names())
            }
        }
    }
}

pub struct SubmissionController {
    backend: Arc<dyn VerificationBackend>,
    ctx: Arc<DashboardContext>,
    refresher: DashboardRefresher,
    state: Mutex<SubmissionState>,
    settled: AtomicU64,
}

/// Restores the idle state when dropped
struct SettleGuard<'a> {
    controller: &'a SubmissionController,
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        self.controller.settle();
    }
}

impl SubmissionController {
    pub fn new(backend: Arc<dyn VerificationBackend>, ctx: Arc<DashboardContext>) -> Self {
        let refresher = DashboardRefresher::new(backend.clone(), ctx.clone());
        Self {
            backend,
            ctx,
            refresher,
            state: Mutex::new(SubmissionState::default()),
            settled: AtomicU64::new(0),
        }
    }

    pub fn context(&self) -> &Arc<DashboardContext> {
        &self.ctx
    }

    pub fn refresher(&self) -> &DashboardRefresher {
        &self.refresher
    }

    /// Both inputs trimmed and non-empty
    pub fn validate_inputs(barcode1: &str, barcode2: &str) -> Result<ScanRequest, ValidationError> {
        let first = barcode1.trim();
        let second = barcode2.trim();
        match (first.is_empty(), second.is_empty()) {
            (true, true) => Err(ValidationError::MissingField(BarcodeField::Both)),
            (true, false) => Err(ValidationError::MissingField(BarcodeField::First)),
            (false, true) => Err(ValidationError::MissingField(BarcodeField::Second)),
            (false, false) => Ok(ScanRequest {
                barcode1: first.to_string(),
                barcode2: second.to_string(),
            }),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .in_flight
    }

    /// How many submissions have settled and restored the form
    pub fn settled_count(&self) -> u64 {
        self.settled.load(Ordering::SeqCst)
    }

    pub fn form(&self) -> FormState {
        self.ctx.form.snapshot()
    }

    /// Operator typing into one of the inputs
    pub fn set_field(&self, field: InputField, value: impl Into<String>) {
        let value = value.into();
        self.ctx.form.modify(|form| match field {
            InputField::First => form.barcode1 = value,
            InputField::Second => form.barcode2 = value,
        });
    }

    pub fn focus(&self, field: InputField) {
        self.ctx.form.modify(|form| form.focus = field);
    }

    /// Advance key (Enter, or a scanner's trailing newline). From the first
    /// field it moves focus; from the second it submits.
    pub async fn handle_advance(&self, field: InputField) -> Option<SubmissionReport> {
        match field {
            InputField::First => {
                self.focus(InputField::Second);
                None
            }
            InputField::Second => Some(self.submit().await),
        }
    }

    /// Submit whatever the form currently holds
    pub async fn submit(&self) -> SubmissionReport {
        let (barcode1, barcode2) = self
            .ctx
            .form
            .read(|form| (form.barcode1.clone(), form.barcode2.clone()));
        self.submit_pair(&barcode1, &barcode2).await
    }

    pub async fn submit_pair(&self, barcode1: &str, barcode2: &str) -> SubmissionReport {
        if self.is_busy() {
            log::debug!("[Submit] Rejected: submission already in flight");
            return SubmissionReport::Busy;
        }

        let request = match Self::validate_inputs(barcode1, barcode2) {
            Ok(request) => request,
            Err(e) => {
                log::info!("[Submit] Validation failed: {}", e);
                self.ctx
                    .feedback
                    .notify(NotificationKind::Error, e.user_message());
                return SubmissionReport::Invalid(e);
            }
        };

        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.in_flight {
                return SubmissionReport::Busy;
            }
            state.in_flight = true;
            state.pending_inputs = Some((request.barcode1.clone(), request.barcode2.clone()));
        }
        self.ctx.form.modify(|form| {
            form.submit_enabled = false;
            form.busy = true;
        });
        let _guard = SettleGuard { controller: self };

        log::info!(
            "[Submit] Verifying '{}' against '{}'",
            request.barcode1,
            request.barcode2
        );

        match self.backend.submit_scan(request).await {
            Ok(body) => {
                let outcome = classify_body(&body);
                log::info!("[Submit] Verification result: {}", outcome);
                self.ctx.feedback.emit(outcome);
                let refresh = self
                    .refresher
                    .spawn_refresh(self.ctx.has_aggregate_surfaces());
                SubmissionReport::Verified { outcome, refresh }
            }
            Err(e) => {
                log::warn!("[Submit] Verification request failed: {}", e);
                self.ctx
                    .feedback
                    .notify(NotificationKind::Error, e.user_message());
                SubmissionReport::TransportFailed(e)
            }
        }
    }

    fn settle(&self) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.in_flight = false;
            state.pending_inputs = None;
        }
        self.ctx.form.modify(|form| {
            form.barcode1.clear();
            form.barcode2.clear();
            form.focus = InputField::First;
            form.submit_enabled = true;
            form.busy = false;
        });
        self.settled.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_inputs() {
        assert_eq!(
            SubmissionController::validate_inputs("", "  "),
            Err(ValidationError::MissingField(BarcodeField::Both))
        );
        assert_eq!(
            SubmissionController::validate_inputs(" ", "B1"),
            Err(ValidationError::MissingField(BarcodeField::First))
        );
        assert_eq!(
            SubmissionController::validate_inputs("A1", ""),
            Err(ValidationError::MissingField(BarcodeField::Second))
        );
        assert_eq!(
            SubmissionController::validate_inputs("  A1 ", "A1\n"),
            Ok(ScanRequest {
                barcode1: "A1".to_string(),
                barcode2: "A1".to_string(),
            })
        );
    }
}
