//! Core ChatApp struct definition and initialization

use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;
use std::thread;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::backend::{run_backend, ApiClient};
use crate::channel_view::ChannelView;
use crate::config::{access_token, load_settings, save_settings, Settings};
use crate::protocol::{BackendAction, GuiEvent};
use crate::ui::theme::ChatTheme;

pub struct ChatApp {
    // The one channel on screen: messages, plan, menu and edit state
    pub view: ChannelView,

    // Channels for backend communication
    pub action_tx: Sender<BackendAction>,
    pub event_rx: Receiver<GuiEvent>,

    pub settings: Settings,
    pub theme: ChatTheme,

    // Status toast messages with creation time (auto-expire)
    pub status_messages: Vec<(String, Instant)>,

    // Whether settings are written back on exit
    persist_settings: bool,
}

impl ChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = load_settings();

        // Create channels for UI <-> Backend
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();

        // Spawn the backend thread
        let mut startup_error = None;
        match ApiClient::new(&settings.api_base_url, access_token()) {
            Ok(client) => {
                thread::spawn(move || {
                    run_backend(action_rx, event_tx, client);
                });
            }
            Err(e) => {
                error!("backend not started: {}", e);
                startup_error = Some(e.to_string());
            }
        }

        match settings.theme.as_str() {
            "light" => cc.egui_ctx.set_visuals(egui::Visuals::light()),
            _ => cc.egui_ctx.set_visuals(egui::Visuals::dark()),
        }
        cc.egui_ctx.set_fonts(crate::fonts::setup_fonts());

        let mut app = Self::with_channels(settings, action_tx, event_rx);
        app.persist_settings = true;
        if let Some(e) = startup_error {
            app.status_messages.push((e, Instant::now()));
        }
        app.view.refresh();
        app
    }

    /// Build the app around existing backend channels, without a window.
    pub fn with_channels(
        settings: Settings,
        action_tx: Sender<BackendAction>,
        event_rx: Receiver<GuiEvent>,
    ) -> Self {
        info!(
            server = %settings.server_id,
            channel = %settings.channel_id,
            "opening channel"
        );
        let view = ChannelView::new(
            settings.server_id.clone(),
            settings.channel_id.clone(),
            settings.display_offset(),
            action_tx.clone(),
        );
        Self {
            view,
            action_tx,
            event_rx,
            theme: ChatTheme::by_name(&settings.theme),
            settings,
            status_messages: Vec::new(),
            persist_settings: false,
        }
    }
}

impl Drop for ChatApp {
    fn drop(&mut self) {
        let _ = self.action_tx.send(BackendAction::Shutdown);
        if !self.persist_settings {
            return;
        }
        // Persist settings on exit
        if let Err(e) = save_settings(&self.settings) {
            warn!("failed to save settings: {}", e);
        }
    }
}
