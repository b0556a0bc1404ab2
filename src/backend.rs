//! Network backend: a thread running a Tokio runtime that serves
//! `BackendAction`s against the chat API and reports back `GuiEvent`s.

pub mod api;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::error::ClientError;
use crate::protocol::{BackendAction, GuiEvent};

pub use api::ApiClient;

/// How long the loop sleeps when no action is queued
const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_backend(action_rx: Receiver<BackendAction>, event_tx: Sender<GuiEvent>, client: ApiClient) {
    // Create a Tokio runtime for this thread
    let rt = match Runtime::new().map_err(ClientError::from) {
        Ok(rt) => rt,
        Err(e) => {
            let _ = event_tx.send(GuiEvent::Error(e.to_string()));
            return;
        }
    };

    rt.block_on(async move {
        info!("backend started");
        loop {
            match action_rx.try_recv() {
                Ok(action) => {
                    let Some(event) = handle_action(&client, action).await else {
                        break;
                    };
                    if event_tx.send(event).is_err() {
                        // UI is gone
                        break;
                    }
                }
                Err(TryRecvError::Disconnected) => break,
                Err(TryRecvError::Empty) => tokio::time::sleep(POLL_INTERVAL).await,
            }
        }
        info!("backend stopped");
    });
}

/// Run one action and turn its outcome into the event for the UI.
///
/// Returns None for [`BackendAction::Shutdown`].
pub(crate) async fn handle_action(client: &ApiClient, action: BackendAction) -> Option<GuiEvent> {
    let event = match action {
        BackendAction::FetchChannel {
            server_id,
            channel_id,
        } => match client.fetch_channel(&server_id, &channel_id).await {
            Ok(channel) => GuiEvent::ChannelLoaded {
                channel_id,
                name: channel.name,
            },
            Err(e) => {
                warn!(%channel_id, "channel lookup failed: {}", e);
                GuiEvent::Error(format!("Failed to load channel: {}", e))
            }
        },

        BackendAction::FetchMessages {
            server_id,
            channel_id,
        } => match client.fetch_messages(&server_id, &channel_id).await {
            Ok(messages) => {
                info!(%channel_id, count = messages.len(), "messages loaded");
                GuiEvent::MessagesLoaded {
                    channel_id,
                    messages,
                }
            }
            Err(e) => {
                warn!(%channel_id, "fetch failed: {}", e);
                GuiEvent::Error(format!("Failed to load messages: {}", e))
            }
        },

        BackendAction::UpdateMessage {
            server_id,
            channel_id,
            message_id,
            created_at,
            text,
        } => match client
            .update_message(&server_id, &channel_id, &message_id, created_at, &text)
            .await
        {
            Ok(()) => GuiEvent::MessageUpdated {
                channel_id,
                message_id,
                text,
            },
            Err(e) => {
                warn!(%message_id, "update failed: {}", e);
                GuiEvent::UpdateFailed {
                    channel_id,
                    message_id,
                    reason: e.to_string(),
                }
            }
        },

        BackendAction::DeleteMessage {
            server_id,
            channel_id,
            message_id,
            created_at,
        } => match client
            .delete_message(&server_id, &channel_id, &message_id, created_at)
            .await
        {
            Ok(()) => GuiEvent::MessageDeleted {
                channel_id,
                message_id,
            },
            Err(e) => {
                warn!(%message_id, "delete failed: {}", e);
                GuiEvent::DeleteFailed {
                    channel_id,
                    message_id,
                    reason: e.to_string(),
                }
            }
        },

        BackendAction::Shutdown => return None,
    };
    Some(event)
}
