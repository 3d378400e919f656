//! Render layer: display models built wholesale from fetched data.

pub mod aggregate;
pub mod surface;
pub mod table;

pub use aggregate::{
    render_distribution, render_summary, BarChartModel, ChartSurface, PieChartModel,
    ScalarDisplay, SummaryDisplay, SummarySurface, ERROR_MARKER,
};
pub use surface::{ChartInstance, ChartSlot, Surface};
pub use table::{escape_html, render_table, TableRow, TableView, NO_RECORDS_MESSAGE};
