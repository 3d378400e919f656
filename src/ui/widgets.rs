/// Custom egui Widgets
///
/// Painter-based pieces of the dashboard:
/// - proportion_chart: passed/failed pie
/// - distribution_chart: per-shift bars on an integer axis
/// - notification_stack: top-right toast overlay
/// - pulse_overlay: full-surface outcome tint

use crate::feedback::{NotificationKind, NotificationView, PulseFrame, PulseTint};
use crate::render::aggregate::SliceTint;
use crate::render::table::{BadgeVariant, ResultBadge};
use crate::render::{BarChartModel, ChartInstance, PieChartModel};
use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use std::f32::consts::TAU;

const SUCCESS_GREEN: Color32 = Color32::from_rgb(46, 160, 67);
const DANGER_RED: Color32 = Color32::from_rgb(207, 34, 46);
const INFO_BLUE: Color32 = Color32::from_rgb(9, 105, 218);
const BAR_FILL: Color32 = Color32::from_rgb(136, 192, 208);
const CHART_BG: Color32 = Color32::from_rgb(46, 52, 64);

/// Peak alpha of the pulse tint; the surface stays readable underneath
const PULSE_MAX_ALPHA: f32 = 0.35;

pub fn slice_color(tint: SliceTint) -> Color32 {
    match tint {
        SliceTint::Passed => SUCCESS_GREEN,
        SliceTint::Failed => DANGER_RED,
    }
}

pub fn badge_color(variant: BadgeVariant) -> Color32 {
    match variant {
        BadgeVariant::Success => SUCCESS_GREEN,
        BadgeVariant::Danger => DANGER_RED,
    }
}

pub fn notification_color(kind: NotificationKind) -> Color32 {
    match kind {
        NotificationKind::Success => SUCCESS_GREEN,
        NotificationKind::Error => DANGER_RED,
        NotificationKind::Info => INFO_BLUE,
    }
}

/// Tint color for a pulse frame, alpha scaled by the frame's opacity
pub fn pulse_color(frame: &PulseFrame) -> Color32 {
    let base = match frame.tint {
        PulseTint::Success => SUCCESS_GREEN,
        PulseTint::Failure => DANGER_RED,
    };
    let alpha = (frame.opacity.clamp(0.0, 1.0) * PULSE_MAX_ALPHA * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), alpha)
}

/// Start and end angle (radians, clockwise from 12 o'clock) per slice
pub fn pie_angles(fractions: &[f32]) -> Vec<(f32, f32)> {
    let mut start = -TAU / 4.0;
    fractions
        .iter()
        .map(|f| {
            let end = start + f * TAU;
            let span = (start, end);
            start = end;
            span
        })
        .collect()
}

pub fn result_badge(ui: &mut egui::Ui, badge: &ResultBadge) {
    egui::Frame::none()
        .fill(badge_color(badge.variant))
        .rounding(4.0)
        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| {
            ui.colored_label(Color32::WHITE, format!("{} {}", badge.icon, badge.label));
        });
}

/// Draws the passed/failed pie, or an empty frame when no instance is live
pub fn proportion_chart(ui: &mut egui::Ui, chart: Option<&ChartInstance<PieChartModel>>) {
    let (response, painter) = ui.allocate_painter(Vec2::new(220.0, 180.0), egui::Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 4.0, CHART_BG);

    let Some(instance) = chart else {
        return;
    };
    let model = &instance.model;

    let center = Pos2::new(rect.left() + 80.0, rect.center().y);
    let radius = 65.0;

    if model.total() == 0 {
        painter.circle_stroke(center, radius, Stroke::new(2.0, Color32::from_gray(100)));
    } else {
        for (slice, (start, end)) in model.slices.iter().zip(pie_angles(&model.fractions())) {
            let color = slice_color(slice.tint);
            let segments = (((end - start) / TAU) * 64.0).ceil().max(1.0) as usize;
            // thin fan wedges stay convex
            for i in 0..segments {
                let a0 = start + (end - start) * i as f32 / segments as f32;
                let a1 = start + (end - start) * (i + 1) as f32 / segments as f32;
                painter.add(egui::Shape::convex_polygon(
                    vec![
                        center,
                        center + Vec2::new(a0.cos(), a0.sin()) * radius,
                        center + Vec2::new(a1.cos(), a1.sin()) * radius,
                    ],
                    color,
                    Stroke::NONE,
                ));
            }
        }
    }

    // legend
    let mut y = rect.top() + 20.0;
    for slice in &model.slices {
        let swatch = Rect::from_min_size(Pos2::new(rect.right() - 64.0, y), Vec2::splat(10.0));
        painter.rect_filled(swatch, 2.0, slice_color(slice.tint));
        painter.text(
            Pos2::new(swatch.right() + 4.0, swatch.center().y),
            egui::Align2::LEFT_CENTER,
            format!("{} {}", slice.label, slice.value),
            egui::FontId::proportional(11.0),
            Color32::LIGHT_GRAY,
        );
        y += 18.0;
    }
}

/// Draws one bar per shift, in model order, with integer ticks
pub fn distribution_chart(ui: &mut egui::Ui, chart: Option<&ChartInstance<BarChartModel>>) {
    let width = ui.available_width().max(240.0);
    let (response, painter) = ui.allocate_painter(Vec2::new(width, 180.0), egui::Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 4.0, CHART_BG);

    let Some(instance) = chart else {
        return;
    };
    let model = &instance.model;

    let plot = Rect::from_min_max(
        Pos2::new(rect.left() + 36.0, rect.top() + 10.0),
        Pos2::new(rect.right() - 10.0, rect.bottom() - 24.0),
    );
    let y_max = model.y_max.max(1) as f32;
    let value_to_y = |v: u64| plot.bottom() - (v as f32 / y_max) * plot.height();

    for tick in model.ticks() {
        let y = value_to_y(tick);
        painter.line_segment(
            [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
            Stroke::new(1.0, Color32::from_gray(70)),
        );
        painter.text(
            Pos2::new(plot.left() - 4.0, y),
            egui::Align2::RIGHT_CENTER,
            tick.to_string(),
            egui::FontId::monospace(10.0),
            Color32::LIGHT_GRAY,
        );
    }

    if model.bars.is_empty() {
        return;
    }
    let slot = plot.width() / model.bars.len() as f32;
    for (i, bar) in model.bars.iter().enumerate() {
        let left = plot.left() + slot * i as f32 + slot * 0.15;
        let right = left + slot * 0.7;
        let bar_rect = Rect::from_min_max(
            Pos2::new(left, value_to_y(bar.value)),
            Pos2::new(right, plot.bottom()),
        );
        painter.rect_filled(bar_rect, 2.0, BAR_FILL);
        painter.text(
            Pos2::new(bar_rect.center().x, plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            &bar.label,
            egui::FontId::proportional(11.0),
            Color32::LIGHT_GRAY,
        );
    }
}

/// Toast stack anchored top-right, newest at the bottom
pub fn notification_stack(ctx: &egui::Context, notifications: &[NotificationView]) {
    if notifications.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("notification_stack"))
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            for view in notifications {
                let fill = notification_color(view.kind).gamma_multiply(view.opacity);
                egui::Frame::none()
                    .fill(fill)
                    .rounding(6.0)
                    .inner_margin(egui::Margin::same(10.0))
                    .show(ui, |ui| {
                        ui.set_max_width(280.0);
                        ui.colored_label(
                            Color32::WHITE.gamma_multiply(view.opacity),
                            &view.message,
                        );
                    });
                ui.add_space(6.0);
            }
        });
}

/// Paints the pulse tint over the whole window
pub fn pulse_overlay(ctx: &egui::Context, frame: Option<PulseFrame>) {
    let Some(frame) = frame else {
        return;
    };
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("surface_pulse"),
    ));
    painter.rect_filled(ctx.screen_rect(), 0.0, pulse_color(&frame));
}
