/// Dashboard View
///
/// Summary scalars, both charts and the recent-scans table. Everything here
/// reads surface snapshots; nothing mutates dashboard state.

use crate::context::DashboardContext;
use crate::render::table::{TableView, NO_RECORDS_MESSAGE};
use crate::render::aggregate::SliceTint;
use crate::render::SummaryDisplay;
use crate::ui::widgets;
use eframe::egui;

/// What the operator asked for while the table was drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableActions {
    pub copy_html: bool,
}

pub fn render_summary(ui: &mut egui::Ui, summary: &SummaryDisplay) {
    egui::Grid::new("summary_grid")
        .num_columns(3)
        .spacing([40.0, 6.0])
        .show(ui, |ui| {
            ui.label("Total scans");
            ui.label("Passed");
            ui.label("Failed");
            ui.end_row();

            let big = |text: String| egui::RichText::new(text).size(24.0).strong();
            ui.label(big(summary.total.to_string()));
            ui.colored_label(
                widgets::slice_color(SliceTint::Passed),
                big(summary.passed.to_string()),
            );
            ui.colored_label(
                widgets::slice_color(SliceTint::Failed),
                big(summary.failed.to_string()),
            );
            ui.end_row();
        });
}

pub fn render_charts(ui: &mut egui::Ui, ctx: &DashboardContext) {
    ui.horizontal(|ui| {
        if let Some(surface) = ctx.proportion_chart.as_ref() {
            let slot = surface.snapshot();
            ui.vertical(|ui| {
                ui.label("Pass / fail");
                widgets::proportion_chart(ui, slot.current());
            });
        }
        if let Some(surface) = ctx.distribution_chart.as_ref() {
            let slot = surface.snapshot();
            ui.vertical(|ui| {
                ui.label("Scans per shift");
                widgets::distribution_chart(ui, slot.current());
            });
        }
    });
}

/// Placeholder and table are never shown together
pub fn render_table(ui: &mut egui::Ui, view: &TableView) -> TableActions {
    let mut actions = TableActions::default();

    ui.horizontal(|ui| {
        ui.heading("Recent scans");
        if ui
            .add_enabled(view.table_visible(), egui::Button::new("Copy table as HTML"))
            .clicked()
        {
            actions.copy_html = true;
        }
    });
    ui.separator();

    match view {
        TableView::Placeholder => {
            ui.weak(NO_RECORDS_MESSAGE);
        }
        TableView::Rows(rows) => {
            egui::ScrollArea::vertical()
                .max_height(320.0)
                .show(ui, |ui| {
                    egui::Grid::new("scan_table")
                        .num_columns(5)
                        .striped(true)
                        .spacing([24.0, 6.0])
                        .show(ui, |ui| {
                            for header in ["ID", "Barcode 1", "Barcode 2", "Result", "Scanned at"] {
                                ui.strong(header);
                            }
                            ui.end_row();

                            for row in rows {
                                ui.label(row.id.to_string());
                                ui.monospace(&row.barcode1);
                                ui.monospace(&row.barcode2);
                                widgets::result_badge(ui, &row.badge);
                                ui.label(&row.timestamp);
                                ui.end_row();
                            }
                        });
                });
        }
    }

    actions
}
