//! Main update loop

use eframe::egui;
use std::time::{Duration, Instant};

use super::ChatApp;
use crate::ui::context_menu::render_context_menu;
use crate::ui::messages::render_channel_messages;
use crate::ui::toasts::{purge_expired, render_status_toasts, TOAST_LIFETIME};

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process network events
        self.process_events();

        // Request repaint to keep checking for events
        ctx.request_repaint_after(Duration::from_millis(100));
        purge_expired(&mut self.status_messages, Instant::now(), TOAST_LIFETIME);

        egui::TopBottomPanel::top("channel_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let title = self.view.channel_name().unwrap_or("없음");
                ui.label(
                    egui::RichText::new(format!("# {}", title))
                        .size(16.0)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("새로고침").clicked() {
                        self.view.refresh();
                    }
                });
            });
        });

        let actions = egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.surface[1]))
            .show(ctx, |ui| render_channel_messages(ui, &self.view, &self.theme))
            .inner;
        self.apply_message_actions(actions);

        self.show_context_menu(ctx);

        render_status_toasts(ctx, &self.status_messages, &self.theme);
    }
}

impl ChatApp {
    /// Draw the open context menu and route this frame's primary click to it.
    ///
    /// Returns the menu's screen rect when one was drawn.
    pub(crate) fn show_context_menu(&mut self, ctx: &egui::Context) -> Option<egui::Rect> {
        let menu = render_context_menu(ctx, self.view.context_menu()?, &self.theme);
        if let Some(action) = menu.action {
            self.view.choose_menu_action(action);
        } else if ctx.input(|i| i.pointer.primary_clicked()) {
            let inside = ctx
                .input(|i| i.pointer.interact_pos())
                .is_some_and(|pos| menu.rect.contains(pos));
            self.view.primary_click(inside);
        }
        Some(menu.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::message::Message;
    use crossbeam_channel::unbounded;

    fn app_with_menu() -> ChatApp {
        let (action_tx, _action_rx) = unbounded();
        let (_event_tx, event_rx) = unbounded();
        let mut app = ChatApp::with_channels(Settings::default(), action_tx, event_rx);
        app.view.replace_messages(vec![
            Message::new("m2", "bob", "later", 2_000),
            Message::new("m1", "alice", "hello", 1_000),
        ]);
        app.view.open_context_menu("m1", 100.0, 100.0);
        app
    }

    fn click_at(pos: egui::Pos2) -> egui::RawInput {
        let button = |pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        };
        egui::RawInput {
            events: vec![egui::Event::PointerMoved(pos), button(true), button(false)],
            ..Default::default()
        }
    }

    fn run_frame(app: &mut ChatApp, ctx: &egui::Context, input: egui::RawInput) -> Option<egui::Rect> {
        let mut rect = None;
        let _ = ctx.run(input, |ctx| rect = app.show_context_menu(ctx));
        rect
    }

    #[test]
    fn test_click_outside_menu_closes_it() {
        let mut app = app_with_menu();
        let ctx = egui::Context::default();

        let rect = run_frame(&mut app, &ctx, egui::RawInput::default()).unwrap();
        assert!(!rect.contains(egui::pos2(600.0, 500.0)));
        assert!(app.view.context_menu().is_some());

        run_frame(&mut app, &ctx, click_at(egui::pos2(600.0, 500.0)));
        assert!(app.view.context_menu().is_none());
        assert!(run_frame(&mut app, &ctx, egui::RawInput::default()).is_none());
    }

    #[test]
    fn test_click_on_menu_frame_keeps_it_open() {
        let mut app = app_with_menu();
        let ctx = egui::Context::default();

        run_frame(&mut app, &ctx, egui::RawInput::default());
        let rect = run_frame(&mut app, &ctx, egui::RawInput::default()).unwrap();

        // Inside the frame's margin, clear of both buttons
        run_frame(&mut app, &ctx, click_at(rect.min + egui::vec2(2.0, 2.0)));
        assert!(app.view.context_menu().is_some());
    }
}
