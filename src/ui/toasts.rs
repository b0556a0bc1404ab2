//! Status toast notifications - floating messages in top-right corner.

use eframe::egui;
use std::time::{Duration, Instant};

use crate::ui::theme::ChatTheme;

/// How long a toast stays on screen
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// Drop toasts older than `lifetime`.
pub fn purge_expired(toasts: &mut Vec<(String, Instant)>, now: Instant, lifetime: Duration) {
    toasts.retain(|(_, created)| now.saturating_duration_since(*created) < lifetime);
}

pub fn render_status_toasts(ctx: &egui::Context, toasts: &[(String, Instant)], theme: &ChatTheme) {
    if toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("status_toast_area"))
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 50.0])
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_unmultiplied(30, 30, 30, 230))
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(12, 8))
                .show(ui, |ui| {
                    for (msg, _) in toasts {
                        ui.label(egui::RichText::new(msg).color(theme.error));
                    }
                });
        });
}
