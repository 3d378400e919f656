//! Core data types for ScanMatch.
//!
//! Wire shapes follow the backend contract: scan records carry `result: 0|1`
//! and a naive or offset-qualified ISO-8601 `created_at`.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Binary classification of a verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VerificationOutcome {
    Pass,
    Fail,
}

impl<'de> Deserialize<'de> for VerificationOutcome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct OutcomeVisitor;

        impl<'de> Visitor<'de> for OutcomeVisitor {
            type Value = VerificationOutcome;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer result flag (1 = match) or a boolean")
            }

            fn visit_u64<E>(self, value: u64) -> Result<VerificationOutcome, E>
            where
                E: de::Error,
            {
                Ok(VerificationOutcome::from_flag(value as i64))
            }

            fn visit_i64<E>(self, value: i64) -> Result<VerificationOutcome, E>
            where
                E: de::Error,
            {
                Ok(VerificationOutcome::from_flag(value))
            }

            fn visit_bool<E>(self, value: bool) -> Result<VerificationOutcome, E>
            where
                E: de::Error,
            {
                Ok(if value {
                    VerificationOutcome::Pass
                } else {
                    VerificationOutcome::Fail
                })
            }
        }

        deserializer.deserialize_any(OutcomeVisitor)
    }
}

impl VerificationOutcome {
    /// Map the stored result flag: 1 is a match, anything else is not
    pub fn from_flag(flag: i64) -> Self {
        if flag == 1 {
            VerificationOutcome::Pass
        } else {
            VerificationOutcome::Fail
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, VerificationOutcome::Pass)
    }

    /// Badge label shown in the scan table
    pub fn label(&self) -> &'static str {
        match self {
            VerificationOutcome::Pass => "Match",
            VerificationOutcome::Fail => "No Match",
        }
    }

    /// Badge icon shown in the scan table
    pub fn icon(&self) -> &'static str {
        match self {
            VerificationOutcome::Pass => "✔",
            VerificationOutcome::Fail => "✘",
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationOutcome::Pass => write!(f, "Pass"),
            VerificationOutcome::Fail => write!(f, "Fail"),
        }
    }
}

/// One verification as stored by the backend. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScanRecord {
    pub id: i64,
    pub barcode1: String,
    pub barcode2: String,
    #[serde(rename = "result")]
    pub outcome: VerificationOutcome,
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: NaiveDateTime,
}

/// Parse a backend timestamp into local wall-clock time.
///
/// Offset-qualified values are converted to the local zone; naive values are
/// taken as already local.
pub fn parse_created_at(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_created_at(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unparseable created_at '{}'", raw)))
}

/// Aggregate counters from `/api/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_scans: u64,
    pub total_passed: u64,
    pub total_failed: u64,
}

impl SummaryStats {
    /// Classified scans never exceed the total; legacy rows may be unclassified
    pub fn is_consistent(&self) -> bool {
        self.total_passed
            .checked_add(self.total_failed)
            .map_or(false, |classified| classified <= self.total_scans)
    }
}

/// Named time-window grouping with a scan count. Order is backend-defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftBucket {
    pub shift_name: String,
    pub scan_count: u64,
}

/// Payload of `/api/stats/shifts`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftDistribution {
    pub shifts: Vec<ShiftBucket>,
}

/// Body of `POST /api/scan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRequest {
    pub barcode1: String,
    pub barcode2: String,
}

/// The controller's only mutable unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    pub in_flight: bool,
    pub pending_inputs: Option<(String, String)>,
}

/// Barcode input fields on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputField {
    #[default]
    First,
    Second,
}

/// Input surface driven by the submission controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub barcode1: String,
    pub barcode2: String,
    pub focus: InputField,
    pub submit_enabled: bool,
    pub busy: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            barcode1: String::new(),
            barcode2: String::new(),
            focus: InputField::First,
            submit_enabled: true,
            busy: false,
        }
    }
}
