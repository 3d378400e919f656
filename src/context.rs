//! Dashboard Context: every display surface, wired once at startup.
//!
//! Components receive this object instead of looking surfaces up. Optional
//! surfaces model a layout that does not include them; renders targeting an
//! absent surface are skipped.

use crate::config::DashboardConfig;
use crate::feedback::{AudioSink, Clock, CommandAudioSink, FeedbackChannel, SilentAudioSink};
use crate::models::FormState;
use crate::render::surface::{ChartSlot, Surface};
use crate::render::table::{TableView, DEFAULT_TIMESTAMP_FORMAT};
use crate::render::{BarChartModel, ChartSurface, PieChartModel, SummaryDisplay, SummarySurface};
use std::sync::Arc;

pub struct DashboardContext {
    pub form: Surface<FormState>,
    pub table: Option<Surface<TableView>>,
    pub summary: Option<SummarySurface>,
    pub proportion_chart: Option<ChartSurface<PieChartModel>>,
    pub distribution_chart: Option<ChartSurface<BarChartModel>>,
    pub feedback: FeedbackChannel,
    pub timestamp_format: String,
}

impl DashboardContext {
    /// Context with only the form and feedback; add surfaces with the builder methods
    pub fn new(feedback: FeedbackChannel) -> Self {
        Self {
            form: Surface::new("form", FormState::default()),
            table: None,
            summary: None,
            proportion_chart: None,
            distribution_chart: None,
            feedback,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Full dashboard layout: table, scalars and both charts
    pub fn full(feedback: FeedbackChannel) -> Self {
        Self::new(feedback)
            .with_table()
            .with_summary()
            .with_proportion_chart()
            .with_distribution_chart()
    }

    /// Full layout wired from configuration
    pub fn from_config(config: &DashboardConfig, clock: Arc<dyn Clock>) -> Self {
        let audio: Arc<dyn AudioSink> = if config.audio.enabled {
            Arc::new(CommandAudioSink::new(
                config.audio.player.clone(),
                config.audio.pass_sound.clone(),
                config.audio.fail_sound.clone(),
            ))
        } else {
            log::info!("[Context] Audio cues disabled");
            Arc::new(SilentAudioSink)
        };
        let feedback = FeedbackChannel::new(clock, audio, config.notifications, config.pulse);
        Self::full(feedback).with_timestamp_format(config.timestamp_format.clone())
    }

    pub fn with_table(mut self) -> Self {
        self.table = Some(Surface::new("scan-table", TableView::Placeholder));
        self
    }

    pub fn with_summary(mut self) -> Self {
        self.summary = Some(Surface::new("summary", SummaryDisplay::default()));
        self
    }

    pub fn with_proportion_chart(mut self) -> Self {
        self.proportion_chart = Some(Surface::new("proportion-chart", ChartSlot::default()));
        self
    }

    pub fn with_distribution_chart(mut self) -> Self {
        self.distribution_chart = Some(Surface::new("distribution-chart", ChartSlot::default()));
        self
    }

    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn has_summary_surfaces(&self) -> bool {
        self.summary.is_some() || self.proportion_chart.is_some()
    }

    pub fn has_aggregate_surfaces(&self) -> bool {
        self.has_summary_surfaces() || self.distribution_chart.is_some()
    }
}
