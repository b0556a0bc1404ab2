//! Draws the render plan: day dividers, header rows, collapsed rows and
//! the inline edit box.
//!
//! The API delivers the newest message first and rows are drawn in reverse,
//! oldest at the top. A block's header belongs to its last message in list
//! order, which is the topmost one on screen, and a day divider sits right
//! above the message it was computed for.

use eframe::egui::{self, RichText};

use super::format::render_message_text;
use crate::channel_view::ChannelView;
use crate::grouping::RenderDecision;
use crate::message::Message;
use crate::ui::theme::{self, ChatTheme};

const AVATAR_SIZE: f32 = 40.0;
/// Avatar width plus margins, so collapsed rows line up with header text
const COLLAPSED_INDENT: f32 = 72.0;

/// Interactions collected while drawing, applied by the app afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageUiAction {
    OpenMenu { message_id: String, x: f32, y: f32 },
    EditBuffer(String),
    Commit(String),
    Cancel(String),
}

/// Render the channel's messages. Buffer changes come first in the result.
pub fn render_channel_messages(
    ui: &mut egui::Ui,
    view: &ChannelView,
    theme: &ChatTheme,
) -> Vec<MessageUiAction> {
    let mut actions = Vec::new();
    let mut buffer = view.edit_session().buffer().to_string();
    let original = buffer.clone();

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.add_space(8.0);

            if view.messages().is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(RichText::new("아직 메시지가 없습니다").color(theme.text_muted));
                });
            }

            let rows: Vec<(&Message, &RenderDecision)> = view.rows().collect();
            for (msg, decision) in rows.into_iter().rev() {
                if decision.show_day_divider {
                    render_day_divider(ui, decision.day_divider_label.as_deref(), theme);
                }

                let editing = view.edit_session().is_editing(&msg.message_id);
                let row_rect = render_row(ui, msg, decision, editing, &mut buffer, &mut actions, theme);

                if ui.rect_contains_pointer(row_rect) && ui.input(|i| i.pointer.secondary_clicked()) {
                    if let Some(pos) = ui.input(|i| i.pointer.interact_pos()) {
                        actions.push(MessageUiAction::OpenMenu {
                            message_id: msg.message_id.clone(),
                            x: pos.x,
                            y: pos.y,
                        });
                    }
                }
            }

            ui.add_space(8.0);
        });

    if buffer != original {
        actions.insert(0, MessageUiAction::EditBuffer(buffer));
    }
    actions
}

fn render_day_divider(ui: &mut egui::Ui, label: Option<&str>, theme: &ChatTheme) {
    ui.add_space(16.0);
    if let Some(label) = label {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(label).size(12.0).color(theme.text_muted));
        });
    }
    ui.separator();
}

/// Draw one message row and return its full-width rect.
fn render_row(
    ui: &mut egui::Ui,
    msg: &Message,
    decision: &RenderDecision,
    editing: bool,
    buffer: &mut String,
    actions: &mut Vec<MessageUiAction>,
    theme: &ChatTheme,
) -> egui::Rect {
    if decision.show_header {
        ui.add_space(20.0);
    }
    // Reserve the background slot so the highlight ends up behind the text
    let background = ui.painter().add(egui::Shape::Noop);

    let inner = ui.horizontal(|ui| {
        if decision.show_header {
            ui.add_space(20.0);
            theme::render_avatar(ui, &msg.user_id, AVATAR_SIZE);
            ui.add_space(12.0);
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&msg.user_id)
                            .size(16.0)
                            .strong()
                            .color(theme.text_primary),
                    );
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new(&decision.timestamp_label)
                            .size(10.0)
                            .color(theme.text_muted),
                    );
                });
                render_body(ui, msg, editing, buffer, actions, theme);
            });
        } else {
            ui.add_space(COLLAPSED_INDENT);
            ui.vertical(|ui| {
                render_body(ui, msg, editing, buffer, actions, theme);
            });
        }
    });

    let content = inner.response.rect;
    let row_rect = egui::Rect::from_min_max(
        egui::pos2(ui.max_rect().left(), content.top()),
        egui::pos2(ui.max_rect().right(), content.bottom()),
    );

    let fill = if editing {
        Some(theme.editing)
    } else if ui.rect_contains_pointer(row_rect) {
        Some(theme.surface[2])
    } else {
        None
    };
    if let Some(fill) = fill {
        ui.painter()
            .set(background, egui::Shape::rect_filled(row_rect, 0.0, fill));
    }

    row_rect
}

fn render_body(
    ui: &mut egui::Ui,
    msg: &Message,
    editing: bool,
    buffer: &mut String,
    actions: &mut Vec<MessageUiAction>,
    theme: &ChatTheme,
) {
    if !(editing && msg.is_editing()) {
        render_message_text(ui, &msg.message, theme);
        return;
    }

    ui.add_space(6.0);
    let response = ui.add(
        egui::TextEdit::singleline(buffer)
            .desired_width(f32::INFINITY)
            .font(egui::FontId::proportional(16.0)),
    );
    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        actions.push(MessageUiAction::Commit(msg.message_id.clone()));
    }
    if (response.has_focus() || response.lost_focus())
        && ui.input(|i| i.key_pressed(egui::Key::Escape))
    {
        actions.push(MessageUiAction::Cancel(msg.message_id.clone()));
    }

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.label(RichText::new("ESC 키로").size(12.0).color(theme.text_secondary));
        if link_button(ui, "취소", theme).clicked() {
            actions.push(MessageUiAction::Cancel(msg.message_id.clone()));
        }
        ui.label(RichText::new("• Enter 키로").size(12.0).color(theme.text_secondary));
        if link_button(ui, "저장", theme).clicked() {
            actions.push(MessageUiAction::Commit(msg.message_id.clone()));
        }
    });
}

fn link_button(ui: &mut egui::Ui, text: &str, theme: &ChatTheme) -> egui::Response {
    ui.add(
        egui::Button::new(RichText::new(text).size(12.0).strong().color(theme.accent))
            .frame(false),
    )
}
