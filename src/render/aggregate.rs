//! Aggregate Renderer: summary scalars, proportion chart, distribution chart.
//!
//! Both sub-renders discard the prior chart instance before building a new
//! one, and each skips quietly when its target surface is absent.

use super::surface::{ChartSlot, Surface};
use crate::error::FetchError;
use crate::models::{ShiftBucket, SummaryStats};
use std::fmt;

/// Shown in place of a scalar when the summary could not be fetched
pub const ERROR_MARKER: &str = "E";

/// Most tick marks the distribution axis will carry
const MAX_TICKS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarDisplay {
    #[default]
    Pending,
    Value(u64),
    Error,
}

impl fmt::Display for ScalarDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarDisplay::Pending => write!(f, "-"),
            ScalarDisplay::Value(v) => write!(f, "{}", v),
            ScalarDisplay::Error => write!(f, "{}", ERROR_MARKER),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryDisplay {
    pub total: ScalarDisplay,
    pub passed: ScalarDisplay,
    pub failed: ScalarDisplay,
}

impl SummaryDisplay {
    pub fn from_stats(stats: &SummaryStats) -> Self {
        Self {
            total: ScalarDisplay::Value(stats.total_scans),
            passed: ScalarDisplay::Value(stats.total_passed),
            failed: ScalarDisplay::Value(stats.total_failed),
        }
    }

    pub fn error() -> Self {
        Self {
            total: ScalarDisplay::Error,
            passed: ScalarDisplay::Error,
            failed: ScalarDisplay::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceTint {
    Passed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: u64,
    pub tint: SliceTint,
}

/// Two-slice passed/failed proportion chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieChartModel {
    pub slices: Vec<ChartSlice>,
}

impl PieChartModel {
    pub fn from_stats(stats: &SummaryStats) -> Self {
        Self {
            slices: vec![
                ChartSlice {
                    label: "Passed",
                    value: stats.total_passed,
                    tint: SliceTint::Passed,
                },
                ChartSlice {
                    label: "Failed",
                    value: stats.total_failed,
                    tint: SliceTint::Failed,
                },
            ],
        }
    }

    pub fn values(&self) -> Vec<u64> {
        self.slices.iter().map(|s| s.value).collect()
    }

    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Fraction of the whole per slice; all zero when there is no data
    pub fn fractions(&self) -> Vec<f32> {
        let total = self.total();
        self.slices
            .iter()
            .map(|s| if total == 0 { 0.0 } else { s.value as f32 / total as f32 })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

/// One bar per shift bucket, in backend order, on an integer axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChartModel {
    pub bars: Vec<Bar>,
    pub tick_step: u64,
    pub y_max: u64,
}

impl BarChartModel {
    pub fn from_buckets(buckets: &[ShiftBucket]) -> Self {
        let bars: Vec<Bar> = buckets
            .iter()
            .map(|b| Bar {
                label: b.shift_name.clone(),
                value: b.scan_count,
            })
            .collect();
        let peak = bars.iter().map(|b| b.value).max().unwrap_or(0).max(1);
        let tick_step = ((peak + MAX_TICKS - 1) / MAX_TICKS).max(1);
        let y_max = ((peak + tick_step - 1) / tick_step) * tick_step;
        Self {
            bars,
            tick_step,
            y_max,
        }
    }

    /// Axis ticks from zero to `y_max`, integers only
    pub fn ticks(&self) -> Vec<u64> {
        (0..=self.y_max).step_by(self.tick_step as usize).collect()
    }
}

pub type SummarySurface = Surface<SummaryDisplay>;
pub type ChartSurface<M> = Surface<ChartSlot<M>>;

/// Apply a summary fetch result to whichever surfaces exist.
///
/// Failure shows the error marker in every scalar and disposes the chart so
/// no stale proportions remain on screen.
pub fn render_summary(
    scalars: Option<&SummarySurface>,
    chart: Option<&ChartSurface<PieChartModel>>,
    result: &Result<SummaryStats, FetchError>,
) {
    match result {
        Ok(stats) => {
            if !stats.is_consistent() {
                log::warn!(
                    "[Render] [SUMMARY] passed + failed exceeds total ({} + {} > {})",
                    stats.total_passed,
                    stats.total_failed,
                    stats.total_scans
                );
            }
            if let Some(scalars) = scalars {
                scalars.replace(SummaryDisplay::from_stats(stats));
            }
            if let Some(chart) = chart {
                let model = PieChartModel::from_stats(stats);
                chart.modify(|slot| slot.redraw(model));
            }
        }
        Err(_) => {
            if let Some(scalars) = scalars {
                scalars.replace(SummaryDisplay::error());
            }
            if let Some(chart) = chart {
                chart.modify(ChartSlot::clear);
            }
        }
    }
}

/// Apply a distribution fetch result; failure disposes the chart
pub fn render_distribution(
    chart: Option<&ChartSurface<BarChartModel>>,
    result: &Result<Vec<ShiftBucket>, FetchError>,
) {
    let Some(chart) = chart else {
        return;
    };
    match result {
        Ok(buckets) => {
            let model = BarChartModel::from_buckets(buckets);
            chart.modify(|slot| slot.redraw(model));
        }
        Err(_) => chart.modify(ChartSlot::clear),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    fn stats(total: u64, passed: u64, failed: u64) -> SummaryStats {
        SummaryStats {
            total_scans: total,
            total_passed: passed,
            total_failed: failed,
        }
    }

    fn buckets(pairs: &[(&str, u64)]) -> Vec<ShiftBucket> {
        pairs
            .iter()
            .map(|(name, count)| ShiftBucket {
                shift_name: name.to_string(),
                scan_count: *count,
            })
            .collect()
    }

    #[test]
    fn test_summary_success_populates_scalars_and_slices() {
        let scalars = SummarySurface::new("summary", SummaryDisplay::default());
        let chart: ChartSurface<PieChartModel> = Surface::new("pie", ChartSlot::default());

        render_summary(Some(&scalars), Some(&chart), &Ok(stats(10, 7, 3)));

        let display = scalars.snapshot();
        assert_eq!(
            (display.total.to_string(), display.passed.to_string(), display.failed.to_string()),
            ("10".to_string(), "7".to_string(), "3".to_string())
        );
        let slot = chart.snapshot();
        let instance = slot.current().expect("chart built");
        assert_eq!(instance.model.values(), vec![7, 3]);
    }

    #[test]
    fn test_summary_failure_marks_error_and_drops_chart() {
        let scalars = SummarySurface::new("summary", SummaryDisplay::default());
        let chart: ChartSurface<PieChartModel> = Surface::new("pie", ChartSlot::default());
        render_summary(Some(&scalars), Some(&chart), &Ok(stats(4, 2, 2)));

        let failure = Err(FetchError::Transport(TransportError::Status {
            status: 500,
            detail: None,
        }));
        render_summary(Some(&scalars), Some(&chart), &failure);

        let display = scalars.snapshot();
        assert_eq!(display, SummaryDisplay::error());
        assert_eq!(display.total.to_string(), ERROR_MARKER);
        let slot = chart.snapshot();
        assert!(slot.current().is_none());
        assert_eq!(slot.disposed_count(), 1);
    }

    #[test]
    fn test_summary_redraw_discards_prior_instance() {
        let chart: ChartSurface<PieChartModel> = Surface::new("pie", ChartSlot::default());
        render_summary(None, Some(&chart), &Ok(stats(1, 1, 0)));
        render_summary(None, Some(&chart), &Ok(stats(2, 1, 1)));
        let slot = chart.snapshot();
        assert_eq!(slot.generation(), 2);
        assert_eq!(slot.disposed_count(), 1);
    }

    #[test]
    fn test_missing_surfaces_are_skipped() {
        render_summary(None, None, &Ok(stats(1, 1, 0)));
        render_distribution(None, &Ok(buckets(&[("Morning", 1)])));
    }

    #[test]
    fn test_distribution_preserves_bucket_order() {
        let chart: ChartSurface<BarChartModel> = Surface::new("bars", ChartSlot::default());
        render_distribution(
            Some(&chart),
            &Ok(buckets(&[("Night", 2), ("Morning", 9), ("Evening", 5)])),
        );
        let slot = chart.snapshot();
        let model = &slot.current().expect("chart built").model;
        let labels: Vec<&str> = model.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Night", "Morning", "Evening"]);
    }

    #[test]
    fn test_integer_ticks() {
        let small = BarChartModel::from_buckets(&buckets(&[("A", 3)]));
        assert_eq!(small.tick_step, 1);
        assert_eq!(small.ticks(), vec![0, 1, 2, 3]);

        let large = BarChartModel::from_buckets(&buckets(&[("A", 47), ("B", 12)]));
        assert_eq!(large.tick_step, 5);
        assert_eq!(large.y_max, 50);
        assert_eq!(large.ticks().len(), 11);

        let empty = BarChartModel::from_buckets(&[]);
        assert!(empty.bars.is_empty());
        assert_eq!(empty.ticks(), vec![0, 1]);
    }

    #[test]
    fn test_pie_fractions_with_no_data() {
        let pie = PieChartModel::from_stats(&stats(0, 0, 0));
        assert_eq!(pie.fractions(), vec![0.0, 0.0]);
        let pie = PieChartModel::from_stats(&stats(4, 3, 1));
        assert_eq!(pie.fractions(), vec![0.75, 0.25]);
    }
}
