//! Backend Client: the four HTTP calls the dashboard depends on.
//!
//! Components only see the `VerificationBackend` trait, so they can run
//! against the real HTTP client or a stub.

pub mod http;

use crate::error::{FetchError, TransportError};
use crate::models::{ScanRecord, ScanRequest, ShiftBucket, SummaryStats};
use futures::future::BoxFuture;

pub use http::{extract_detail, HttpBackend};

pub const SCAN_PATH: &str = "/api/scan";
pub const SCANS_PATH: &str = "/api/scans";
pub const STATS_PATH: &str = "/api/stats";
pub const SHIFT_STATS_PATH: &str = "/api/stats/shifts";

/// Trait for the verification backend
pub trait VerificationBackend: Send + Sync {
    /// POST a scan pair. Resolves to the raw body of a 2xx response;
    /// classification of that body is the caller's job.
    fn submit_scan(&self, request: ScanRequest) -> BoxFuture<'static, Result<String, TransportError>>;

    /// Most recent scans, newest first
    fn fetch_recent_scans(&self) -> BoxFuture<'static, Result<Vec<ScanRecord>, FetchError>>;

    fn fetch_summary(&self) -> BoxFuture<'static, Result<SummaryStats, FetchError>>;

    /// Shift buckets in backend order
    fn fetch_shift_distribution(&self) -> BoxFuture<'static, Result<Vec<ShiftBucket>, FetchError>>;
}
