//! The chat channel view: owner of the message list, the render plan, the
//! context menu and the inline edit session.
//!
//! All mutation happens on the UI thread. Requests leave through the
//! backend action channel; their outcomes come back through
//! [`ChannelView::apply_event`]. An edit is only cleared when the server
//! acknowledges it.

use chrono::FixedOffset;
use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use crate::context_menu::{
    ContextMenuController, ContextMenuState, ListenerRegistry, MenuAction, MenuTarget,
    MenuTransition,
};
use crate::edit_session::EditSession;
use crate::grouping::{build_render_plan, RenderDecision};
use crate::message::{ChannelMessages, Message, MessageStatus};
use crate::protocol::{BackendAction, GuiEvent};

pub struct ChannelView {
    server_id: String,
    channel_name: Option<String>,
    messages: ChannelMessages,
    plan: Vec<RenderDecision>,
    offset: FixedOffset,
    menu: ContextMenuController,
    edit: EditSession,
    action_tx: Sender<BackendAction>,
}

impl ChannelView {
    pub fn new(
        server_id: impl Into<String>,
        channel_id: impl Into<String>,
        offset: FixedOffset,
        action_tx: Sender<BackendAction>,
    ) -> Self {
        Self::with_listeners(server_id, channel_id, offset, action_tx, ListenerRegistry::new())
    }

    pub fn with_listeners(
        server_id: impl Into<String>,
        channel_id: impl Into<String>,
        offset: FixedOffset,
        action_tx: Sender<BackendAction>,
        listeners: ListenerRegistry,
    ) -> Self {
        Self {
            server_id: server_id.into(),
            channel_name: None,
            messages: ChannelMessages::new(channel_id),
            plan: Vec::new(),
            offset,
            menu: ContextMenuController::new(listeners),
            edit: EditSession::new(),
            action_tx,
        }
    }

    pub fn channel_id(&self) -> &str {
        &self.messages.channel_id
    }

    /// Display name, once the backend has looked the channel up.
    pub fn channel_name(&self) -> Option<&str> {
        self.channel_name.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        self.messages.as_slice()
    }

    pub fn plan(&self) -> &[RenderDecision] {
        &self.plan
    }

    /// Messages paired with their render decisions, in display order.
    pub fn rows(&self) -> impl Iterator<Item = (&Message, &RenderDecision)> {
        self.messages.as_slice().iter().zip(self.plan.iter())
    }

    pub fn context_menu(&self) -> Option<&ContextMenuState> {
        self.menu.state()
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    fn send(&self, action: BackendAction) {
        if let Err(e) = self.action_tx.send(action) {
            warn!("backend is gone, dropping action: {:?}", e.0);
        }
    }

    fn messages_changed(&mut self) {
        self.plan = build_render_plan(self.messages.as_slice(), self.offset);
        self.refresh_seed();
    }

    /// Keep a pending seed in step with its message's current text.
    fn refresh_seed(&mut self) {
        let Some(id) = self.edit.seeded_for().map(str::to_string) else {
            return;
        };
        match self.messages.get(&id).map(|m| m.message.clone()) {
            Some(text) => self.edit.seed(&id, &text),
            None => self.edit.clear_seed(),
        }
    }

    /// Ask the backend for the channel and its messages.
    pub fn refresh(&self) {
        self.send(BackendAction::FetchChannel {
            server_id: self.server_id.clone(),
            channel_id: self.channel_id().to_string(),
        });
        self.send(BackendAction::FetchMessages {
            server_id: self.server_id.clone(),
            channel_id: self.channel_id().to_string(),
        });
    }

    /// Install a freshly fetched list.
    ///
    /// A menu or edit whose message disappeared is dropped; a surviving
    /// edit keeps its message in editing status.
    pub fn replace_messages(&mut self, messages: Vec<Message>) {
        self.messages.replace(messages);

        if let Some(target) = self.menu.target() {
            if !self.messages.contains(&target.message_id) {
                debug!(message_id = %target.message_id, "menu target vanished");
                self.menu.close();
            }
        }
        if let Some(id) = self.edit.editing_message_id().map(str::to_string) {
            if self.messages.contains(&id) {
                self.messages.set_status(&id, MessageStatus::Editing);
            } else {
                debug!(message_id = %id, "edited message vanished");
                self.edit.cancel(&id);
            }
        }
        self.messages_changed();
    }

    /// Right-click on a message at pointer position `(x, y)`.
    pub fn open_context_menu(&mut self, message_id: &str, x: f32, y: f32) -> Option<MenuTransition> {
        let Some(msg) = self.messages.get(message_id) else {
            warn!(message_id, "context menu requested for unknown message");
            return None;
        };
        let target = MenuTarget {
            message_id: msg.message_id.clone(),
            message: msg.message.clone(),
            created_at: msg.created_at,
        };
        let (id, text) = (target.message_id.clone(), target.message.clone());
        let transition = self.menu.right_click(target, x, y);
        if transition != MenuTransition::Closed {
            self.edit.seed(&id, &text);
        }
        Some(transition)
    }

    /// A primary click; `inside_menu` is true for clicks on the menu itself.
    pub fn primary_click(&mut self, inside_menu: bool) -> bool {
        self.menu.primary_click(inside_menu)
    }

    pub fn close_context_menu(&mut self) -> bool {
        self.menu.close()
    }

    /// Run a menu action on the menu's target. The menu closes either way.
    pub fn choose_menu_action(&mut self, action: MenuAction) {
        let Some(target) = self.menu.choose(action) else {
            return;
        };
        match action {
            MenuAction::Edit => self.start_edit(&target.message_id),
            MenuAction::Delete => self.request_delete(&target.message_id),
        }
    }

    /// Enter edit mode for `message_id`, using the seeded buffer when it
    /// belongs to the same message.
    pub fn start_edit(&mut self, message_id: &str) {
        let Some(msg) = self.messages.get(message_id) else {
            return;
        };
        let initial = msg.message.clone();
        if let Some(previous) = self.edit.start(message_id, &initial) {
            self.messages.set_status(&previous, MessageStatus::Normal);
        }
        self.messages.set_status(message_id, MessageStatus::Editing);
        info!(message_id, "editing message");
    }

    pub fn update_edit_buffer(&mut self, text: &str) -> bool {
        self.edit.update_buffer(text)
    }

    /// Send the edit buffer for `message_id` to the server.
    ///
    /// Edit mode stays on until [`GuiEvent::MessageUpdated`] arrives.
    pub fn commit_edit(&mut self, message_id: &str) -> bool {
        let Some(created_at) = self.messages.get(message_id).map(|m| m.created_at) else {
            return false;
        };
        let Some(request) = self.edit.commit(message_id, created_at) else {
            return false;
        };
        self.send(BackendAction::UpdateMessage {
            server_id: self.server_id.clone(),
            channel_id: self.channel_id().to_string(),
            message_id: request.message_id,
            created_at: request.created_at,
            text: request.new_text,
        });
        true
    }

    pub fn cancel_edit(&mut self, message_id: &str) -> bool {
        if !self.edit.cancel(message_id) {
            return false;
        }
        self.messages.set_status(message_id, MessageStatus::Normal);
        true
    }

    pub fn request_delete(&mut self, message_id: &str) {
        let Some(created_at) = self.messages.get(message_id).map(|m| m.created_at) else {
            return;
        };
        self.send(BackendAction::DeleteMessage {
            server_id: self.server_id.clone(),
            channel_id: self.channel_id().to_string(),
            message_id: message_id.to_string(),
            created_at,
        });
    }

    /// Apply a backend event. Returns a user-facing notice for failures.
    pub fn apply_event(&mut self, event: GuiEvent) -> Option<String> {
        match event {
            GuiEvent::ChannelLoaded { channel_id, name } => {
                if channel_id == self.channel_id() {
                    self.channel_name = Some(name);
                }
                None
            }
            GuiEvent::MessagesLoaded {
                channel_id,
                messages,
            } => {
                if channel_id == self.channel_id() {
                    self.replace_messages(messages);
                }
                None
            }
            GuiEvent::MessageUpdated {
                channel_id,
                message_id,
                text,
            } => {
                if channel_id != self.channel_id() {
                    return None;
                }
                let finished = self.edit.finish(&message_id, &text);
                let draft_open = !finished && self.edit.is_editing(&message_id);
                if self.messages.apply_update(&message_id, &text) {
                    if draft_open {
                        self.messages.set_status(&message_id, MessageStatus::Editing);
                    }
                    self.messages_changed();
                }
                if draft_open {
                    info!(%message_id, "earlier edit saved, draft kept open");
                    return Some("An earlier edit was saved. Your open draft was kept.".into());
                }
                None
            }
            GuiEvent::UpdateFailed {
                channel_id,
                message_id,
                reason,
            } => {
                if channel_id != self.channel_id() {
                    return None;
                }
                warn!(%message_id, "edit not saved: {}", reason);
                Some(format!("Could not save your edit: {}", reason))
            }
            GuiEvent::MessageDeleted {
                channel_id,
                message_id,
            } => {
                if channel_id == self.channel_id() && self.messages.remove(&message_id).is_some() {
                    if self.menu.target().is_some_and(|t| t.message_id == message_id) {
                        self.menu.close();
                    }
                    self.edit.cancel(&message_id);
                    self.messages_changed();
                }
                None
            }
            GuiEvent::DeleteFailed {
                channel_id,
                message_id,
                reason,
            } => {
                if channel_id != self.channel_id() {
                    return None;
                }
                warn!(%message_id, "delete failed: {}", reason);
                Some(format!("Could not delete the message: {}", reason))
            }
            GuiEvent::Error(reason) => Some(reason),
        }
    }
}
