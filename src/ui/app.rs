/// Main App and UI State
///
/// The eframe::App for the dashboard. Input events are routed through the
/// SubmissionController; every visible element is drawn from a surface
/// snapshot taken at the start of the frame.

use crate::controller::{SubmissionController, SubmissionReport};
use crate::models::{FormState, InputField};
use crate::ui::{dashboard, widgets};
use eframe::egui;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Repaint cadence while something is moving (feedback animation, busy spinner)
const ANIMATION_REPAINT_MS: u64 = 16;
/// Fallback repaint so polled data shows up without input
const IDLE_REPAINT_MS: u64 = 500;

const BARCODE1_ID: &str = "barcode1_input";
const BARCODE2_ID: &str = "barcode2_input";

fn field_id(field: InputField) -> egui::Id {
    match field {
        InputField::First => egui::Id::new(BARCODE1_ID),
        InputField::Second => egui::Id::new(BARCODE2_ID),
    }
}

/// Transient UI state that never leaves this module
#[derive(Debug, Default)]
pub struct UIState {
    /// Focus last pushed into egui memory; a change in the form re-requests focus
    pub applied_focus: Option<InputField>,
    /// Controller settle count seen on the previous frame
    pub seen_settled: u64,
}

/// Field whose input must be focused this frame, if any.
///
/// Focus is re-applied when the form moves it, after every settled
/// submission (even if the form already points at that field), and when a
/// rejected submission asked for it.
fn focus_to_apply(
    state: &UIState,
    form: &FormState,
    settled: u64,
    refocus: bool,
) -> Option<InputField> {
    let moved = state.applied_focus != Some(form.focus);
    let settled_since = state.seen_settled != settled;
    (moved || settled_since || refocus).then_some(form.focus)
}

pub struct DashboardApp {
    controller: Arc<SubmissionController>,
    runtime: Handle,
    ui_state: UIState,
    /// Set by background submits that ended without settling the form
    refocus: Arc<AtomicBool>,
}

impl DashboardApp {
    pub fn new(controller: Arc<SubmissionController>, runtime: Handle) -> Self {
        Self {
            controller,
            runtime,
            ui_state: UIState::default(),
            refocus: Arc::new(AtomicBool::new(false)),
        }
    }

    fn spawn_advance(&self, field: InputField) {
        let controller = self.controller.clone();
        let refocus = self.refocus.clone();
        self.runtime.spawn(async move {
            if let Some(SubmissionReport::Invalid(_)) = controller.handle_advance(field).await {
                refocus.store(true, Ordering::SeqCst);
            }
        });
    }

    fn spawn_submit(&self) {
        let controller = self.controller.clone();
        let refocus = self.refocus.clone();
        self.runtime.spawn(async move {
            if let SubmissionReport::Invalid(_) = controller.submit().await {
                refocus.store(true, Ordering::SeqCst);
            }
        });
    }

    fn barcode_input(&mut self, ui: &mut egui::Ui, form: &FormState, field: InputField) {
        let (label, hint, current) = match field {
            InputField::First => ("Barcode 1", "Scan first barcode", &form.barcode1),
            InputField::Second => ("Barcode 2", "Scan second barcode", &form.barcode2),
        };

        ui.label(label);
        let mut text = current.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut text)
                .id(field_id(field))
                .hint_text(hint)
                .desired_width(260.0),
        );

        if response.changed() {
            self.controller.set_field(field, text);
        }
        if response.gained_focus() && form.focus != field {
            self.controller.focus(field);
            self.ui_state.applied_focus = Some(field);
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.spawn_advance(field);
        }
    }

    fn render_form(&mut self, ui: &mut egui::Ui, form: &FormState) {
        ui.heading("Verify barcodes");
        ui.horizontal(|ui| {
            ui.vertical(|ui| self.barcode_input(ui, form, InputField::First));
            ui.vertical(|ui| self.barcode_input(ui, form, InputField::Second));
            ui.vertical(|ui| {
                ui.label("");
                ui.horizontal(|ui| {
                    let clicked = ui
                        .add_enabled(form.submit_enabled, egui::Button::new("Verify"))
                        .clicked();
                    if form.busy {
                        ui.spinner();
                    }
                    if clicked {
                        self.spawn_submit();
                    }
                });
            });
        });

        let settled = self.controller.settled_count();
        let refocus = self.refocus.swap(false, Ordering::SeqCst);
        if let Some(field) = focus_to_apply(&self.ui_state, form, settled, refocus) {
            ui.ctx().memory_mut(|m| m.request_focus(field_id(field)));
            self.ui_state.applied_focus = Some(field);
        }
        self.ui_state.seen_settled = settled;
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dashboard_ctx = self.controller.context().clone();
        let form = dashboard_ctx.form.snapshot();
        let feedback = dashboard_ctx.feedback.snapshot();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_form(ui, &form);
            ui.separator();

            if let Some(summary) = dashboard_ctx.summary.as_ref() {
                dashboard::render_summary(ui, &summary.snapshot());
                ui.add_space(8.0);
            }
            dashboard::render_charts(ui, &dashboard_ctx);
            ui.add_space(8.0);

            if let Some(table) = dashboard_ctx.table.as_ref() {
                let view = table.snapshot();
                let actions = dashboard::render_table(ui, &view);
                if actions.copy_html {
                    let html = format!("<tbody>{}</tbody>", view.body_html());
                    ui.output_mut(|o| o.copied_text = html);
                    log::debug!("[UI] Copied {} rows as HTML", view.rows().len());
                }
            }
        });

        widgets::pulse_overlay(ctx, feedback.pulse);
        widgets::notification_stack(ctx, &feedback.notifications);

        if feedback.is_animating() || form.busy {
            ctx.request_repaint_after(Duration::from_millis(ANIMATION_REPAINT_MS));
        } else {
            ctx.request_repaint_after(Duration::from_millis(IDLE_REPAINT_MS));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(field: InputField, seen_settled: u64) -> UIState {
        UIState {
            applied_focus: Some(field),
            seen_settled,
        }
    }

    fn form_at(focus: InputField) -> FormState {
        FormState {
            focus,
            ..FormState::default()
        }
    }

    #[test]
    fn test_first_frame_focuses_form_field() {
        let state = UIState::default();
        assert_eq!(
            focus_to_apply(&state, &form_at(InputField::First), 0, false),
            Some(InputField::First)
        );
    }

    #[test]
    fn test_steady_state_requests_nothing() {
        let state = applied(InputField::Second, 2);
        assert_eq!(focus_to_apply(&state, &form_at(InputField::Second), 2, false), None);
    }

    #[test]
    fn test_moved_focus_is_applied() {
        let state = applied(InputField::First, 0);
        assert_eq!(
            focus_to_apply(&state, &form_at(InputField::Second), 0, false),
            Some(InputField::Second)
        );
    }

    #[test]
    fn test_settle_refocuses_even_when_field_unchanged() {
        // operator was already on the first field and pressed Verify
        let state = applied(InputField::First, 3);
        assert_eq!(
            focus_to_apply(&state, &form_at(InputField::First), 4, false),
            Some(InputField::First)
        );
    }

    #[test]
    fn test_rejected_advance_refocuses_current_field() {
        // Enter on the second field dropped focus but the submit was invalid
        let state = applied(InputField::Second, 1);
        assert_eq!(
            focus_to_apply(&state, &form_at(InputField::Second), 1, true),
            Some(InputField::Second)
        );
    }
}
