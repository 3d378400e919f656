//! ScanMatch Dashboard
//!
//! Operator dashboard for a barcode verification station. Two scanned
//! barcodes are submitted to a backend, the Match/No Match outcome is
//! announced (notification, full-surface pulse, audio cue), and the recent
//! scans table and aggregate charts are kept current by polling.
//!
//! The system is organized into functional modules:
//! - **error**: Unified error type hierarchy
//! - **models**: Wire and display-state data structures
//! - **config**: JSON configuration with defaults and validation
//! - **backend**: The verification backend trait and its HTTP client
//! - **classifier**: Strict Match/No Match decision on a submission response
//! - **feedback**: Notifications, surface pulse and audio cues
//! - **render**: Surfaces, table and aggregate display models
//! - **context**: Every surface wired once at startup
//! - **refresh**: Fetch-render-swap for the table and aggregates
//! - **controller**: The single-flight submission flow
//! - **scheduler**: Periodic dashboard polling
//! - **ui**: egui front end

// Core foundational modules
pub mod error;
pub mod models;

pub mod config;

pub mod backend;
pub mod classifier;
pub mod feedback;
pub mod render;

pub mod context;
pub mod controller;
pub mod refresh;
pub mod scheduler;
pub mod threading;

// egui front end
pub mod ui;

// Robust, decoupled logging system
pub mod log_collector;

// Re-export the log crate for macro usage
pub use log;

pub use log_collector::{LogCollector, LogLine};

// ============================================================================
// PUBLIC RE-EXPORTS FOR CONVENIENCE
// ============================================================================

pub use error::{
    AudioError, ConfigError, FetchError, Result, TransportError, ValidationError,
};

pub use models::{
    FormState, InputField, ScanRecord, ScanRequest, ShiftBucket, SubmissionState, SummaryStats,
    VerificationOutcome,
};

pub use backend::{HttpBackend, VerificationBackend};
pub use classifier::{classify, classify_body};
pub use config::{ConfigManager, DashboardConfig};
pub use context::DashboardContext;
pub use controller::{SubmissionController, SubmissionReport};
pub use refresh::{DashboardRefresher, RefreshHandles, RefreshStatus};
pub use scheduler::{PollHandle, PollScheduler};
pub use ui::DashboardApp;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
