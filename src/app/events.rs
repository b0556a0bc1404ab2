//! Backend events and message-area interactions

use std::time::Instant;

use super::ChatApp;
use crate::ui::messages::MessageUiAction;

impl ChatApp {
    /// Drain all pending events from the backend.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            if let Some(notice) = self.view.apply_event(event) {
                self.status_messages.push((notice, Instant::now()));
            }
        }
    }

    /// Apply what the user did in the message area this frame.
    pub fn apply_message_actions(&mut self, actions: Vec<MessageUiAction>) {
        for action in actions {
            match action {
                MessageUiAction::OpenMenu { message_id, x, y } => {
                    self.view.open_context_menu(&message_id, x, y);
                }
                MessageUiAction::EditBuffer(text) => {
                    self.view.update_edit_buffer(&text);
                }
                MessageUiAction::Commit(message_id) => {
                    self.view.commit_edit(&message_id);
                }
                MessageUiAction::Cancel(message_id) => {
                    self.view.cancel_edit(&message_id);
                }
            }
        }
    }
}
