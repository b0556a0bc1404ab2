//! Floating context menu for a message, drawn at the pointer position.

use eframe::egui::{self, RichText};

use crate::context_menu::{ContextMenuState, MenuAction};
use crate::ui::theme::ChatTheme;

/// Outcome of drawing the menu for one frame.
pub struct MenuFrame {
    pub action: Option<MenuAction>,
    /// Screen area of the menu, used to tell inside from outside clicks
    pub rect: egui::Rect,
}

pub fn render_context_menu(
    ctx: &egui::Context,
    state: &ContextMenuState,
    theme: &ChatTheme,
) -> MenuFrame {
    let mut action = None;

    let response = egui::Area::new(egui::Id::new("message_context_menu"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(state.position_x, state.position_y))
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(theme.surface[3])
                .stroke(egui::Stroke::new(1.0, theme.border))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(8, 6))
                .show(ui, |ui| {
                    ui.set_min_width(140.0);
                    if ui
                        .button(RichText::new("메시지 수정하기").color(theme.text_primary))
                        .clicked()
                    {
                        action = Some(MenuAction::Edit);
                    }
                    if ui
                        .button(RichText::new("메시지 삭제하기").color(theme.error))
                        .clicked()
                    {
                        action = Some(MenuAction::Delete);
                    }
                });
        })
        .response;

    MenuFrame {
        action,
        rect: response.rect,
    }
}
