use crate::message::Message;

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendAction {
    /// Load a channel's metadata
    FetchChannel { server_id: String, channel_id: String },
    /// Load the messages of a channel
    FetchMessages { server_id: String, channel_id: String },
    /// Persist an edited message
    UpdateMessage {
        server_id: String,
        channel_id: String,
        message_id: String,
        created_at: i64,
        text: String,
    },
    /// Delete a message
    DeleteMessage {
        server_id: String,
        channel_id: String,
        message_id: String,
        created_at: i64,
    },
    /// Stop the backend loop
    Shutdown,
}

/// Events sent from the Backend to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuiEvent {
    /// Channel metadata arrived
    ChannelLoaded { channel_id: String, name: String },
    /// Fresh message list for a channel
    MessagesLoaded {
        channel_id: String,
        messages: Vec<Message>,
    },
    /// The server accepted an edit
    MessageUpdated {
        channel_id: String,
        message_id: String,
        text: String,
    },
    /// An edit could not be saved
    UpdateFailed {
        channel_id: String,
        message_id: String,
        reason: String,
    },
    /// The server deleted a message
    MessageDeleted {
        channel_id: String,
        message_id: String,
    },
    /// A deletion failed
    DeleteFailed {
        channel_id: String,
        message_id: String,
        reason: String,
    },
    /// Backend-level error (fetch failures, runtime problems)
    Error(String),
}
