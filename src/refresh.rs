//! Dashboard refresh: fetch, render, swap.
//!
//! Each refresh degrades its own surface on failure (placeholder table, `E`
//! scalars, disposed chart) and then reports the error to its task wrapper,
//! which only logs it. Overlapping refreshes are allowed; the last swap wins.

use crate::backend::VerificationBackend;
use crate::context::DashboardContext;
use crate::error::FetchError;
use crate::render::table::{render_table, TableView};
use crate::render::{render_distribution, render_summary};
use crate::threading::spawn_best_effort;
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    Rendered,
    /// No target surface in this layout; nothing was fetched
    Skipped,
}

/// Handles to spawned best-effort refreshes
#[derive(Default)]
pub struct RefreshHandles {
    handles: Vec<(&'static str, JoinHandle<Option<RefreshStatus>>)>,
}

impl RefreshHandles {
    pub fn names(&self) -> Vec<&'static str> {
        self.handles.iter().map(|(name, _)| *name).collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every refresh; failed or panicked ones yield `None`
    pub async fn settled(self) -> Vec<(&'static str, Option<RefreshStatus>)> {
        let mut results = Vec::with_capacity(self.handles.len());
        for (name, handle) in self.handles {
            results.push((name, handle.await.ok().flatten()));
        }
        results
    }
}

#[derive(Clone)]
pub struct DashboardRefresher {
    backend: Arc<dyn VerificationBackend>,
    ctx: Arc<DashboardContext>,
}

impl DashboardRefresher {
    pub fn new(backend: Arc<dyn VerificationBackend>, ctx: Arc<DashboardContext>) -> Self {
        Self { backend, ctx }
    }

    pub async fn refresh_table(&self) -> Result<RefreshStatus, FetchError> {
        let Some(surface) = self.ctx.table.as_ref() else {
            log::debug!("[Refresh] [TABLE] No table surface, skipping");
            return Ok(RefreshStatus::Skipped);
        };

        match self.backend.fetch_recent_scans().await {
            Ok(records) => {
                let view = render_table(&records, &self.ctx.timestamp_format);
                surface.replace(view);
                log::debug!("[Refresh] [TABLE] Rendered {} rows", records.len());
                Ok(RefreshStatus::Rendered)
            }
            Err(e) => {
                surface.replace(TableView::Placeholder);
                Err(e)
            }
        }
    }

    pub async fn refresh_summary(&self) -> Result<RefreshStatus, FetchError> {
        if !self.ctx.has_summary_surfaces() {
            log::debug!("[Refresh] [SUMMARY] No summary surfaces, skipping");
            return Ok(RefreshStatus::Skipped);
        }

        let result = self.backend.fetch_summary().await;
        render_summary(
            self.ctx.summary.as_ref(),
            self.ctx.proportion_chart.as_ref(),
            &result,
        );
        result.map(|_| RefreshStatus::Rendered)
    }

    pub async fn refresh_distribution(&self) -> Result<RefreshStatus, FetchError> {
        if self.ctx.distribution_chart.is_none() {
            log::debug!("[Refresh] [DISTRIBUTION] No distribution surface, skipping");
            return Ok(RefreshStatus::Skipped);
        }

        let result = self.backend.fetch_shift_distribution().await;
        render_distribution(self.ctx.distribution_chart.as_ref(), &result);
        result.map(|_| RefreshStatus::Rendered)
    }

    /// Spawn the table refresh and, if asked, both aggregate refreshes.
    /// Aggregates without a surface in this layout are not spawned at all.
    pub fn spawn_refresh(&self, include_aggregates: bool) -> RefreshHandles {
        let mut handles = RefreshHandles::default();

        let this = self.clone();
        handles.handles.push((
            "table",
            spawn_best_effort("table refresh", async move { this.refresh_table().await }),
        ));

        if include_aggregates {
            if self.ctx.has_summary_surfaces() {
                let this = self.clone();
                handles.handles.push((
                    "summary",
                    spawn_best_effort("summary refresh", async move { this.refresh_summary().await }),
                ));
            }
            if self.ctx.distribution_chart.is_some() {
                let this = self.clone();
                handles.handles.push((
                    "distribution",
                    spawn_best_effort("distribution refresh", async move {
                        this.refresh_distribution().await
                    }),
                ));
            }
        }

        handles
    }
}
