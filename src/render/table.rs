//! Table Renderer: recent scans to a display model.
//!
//! The view is either the placeholder or the rows, never both. Barcodes are
//! operator input and are escaped wherever they are projected to markup.

use crate::models::{ScanRecord, VerificationOutcome};
use chrono::NaiveDateTime;
use std::fmt::Write as _;

pub const NO_RECORDS_MESSAGE: &str = "No scan records yet.";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Success,
    Danger,
}

impl BadgeVariant {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeVariant::Success => "badge badge-success",
            BadgeVariant::Danger => "badge badge-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBadge {
    pub variant: BadgeVariant,
    pub icon: &'static str,
    pub label: &'static str,
}

impl From<VerificationOutcome> for ResultBadge {
    fn from(outcome: VerificationOutcome) -> Self {
        let variant = match outcome {
            VerificationOutcome::Pass => BadgeVariant::Success,
            VerificationOutcome::Fail => BadgeVariant::Danger,
        };
        Self {
            variant,
            icon: outcome.icon(),
            label: outcome.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: i64,
    pub barcode1: String,
    pub barcode2: String,
    pub badge: ResultBadge,
    pub timestamp: String,
}

impl TableRow {
    /// One `<tr>` with every operator-supplied value escaped
    pub fn to_html(&self) -> String {
        format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td><span class=\"{}\">{} {}</span></td><td>{}</td></tr>",
            self.id,
            escape_html(&self.barcode1),
            escape_html(&self.barcode2),
            self.badge.variant.css_class(),
            self.badge.icon,
            self.badge.label,
            escape_html(&self.timestamp),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    Placeholder,
    Rows(Vec<TableRow>),
}

impl Default for TableView {
    fn default() -> Self {
        TableView::Placeholder
    }
}

impl TableView {
    pub fn table_visible(&self) -> bool {
        matches!(self, TableView::Rows(_))
    }

    pub fn placeholder_visible(&self) -> bool {
        matches!(self, TableView::Placeholder)
    }

    pub fn rows(&self) -> &[TableRow] {
        match self {
            TableView::Rows(rows) => rows,
            TableView::Placeholder => &[],
        }
    }

    /// Table-body markup for embedding in a web surface
    pub fn body_html(&self) -> String {
        match self {
            TableView::Placeholder => format!(
                "<tr class=\"placeholder\"><td colspan=\"5\">{}</td></tr>",
                NO_RECORDS_MESSAGE
            ),
            TableView::Rows(rows) => rows.iter().map(TableRow::to_html).collect(),
        }
    }
}

/// Build the view for `records`, preserving their order
pub fn render_table(records: &[ScanRecord], timestamp_format: &str) -> TableView {
    if records.is_empty() {
        return TableView::Placeholder;
    }
    TableView::Rows(
        records
            .iter()
            .map(|record| TableRow {
                id: record.id,
                barcode1: record.barcode1.clone(),
                barcode2: record.barcode2.clone(),
                badge: record.outcome.into(),
                timestamp: format_timestamp(&record.created_at, timestamp_format),
            })
            .collect(),
    )
}

/// Format with `fmt`, falling back to the default pattern if `fmt` is invalid
pub fn format_timestamp(at: &NaiveDateTime, fmt: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(fmt)).is_ok() {
        return out;
    }
    at.format(DEFAULT_TIMESTAMP_FORMAT).to_string()
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
