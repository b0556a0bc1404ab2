use serde::{Deserialize, Serialize};

/// Whether a message is displayed as plain text or as an inline edit box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Normal,
    Editing,
}

/// A single chat message as delivered by the chat API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: String,
    pub user_id: String,
    pub message: String,
    /// Epoch milliseconds. Also used by the server as part of the message key.
    pub created_at: i64,
    #[serde(default)]
    pub status: MessageStatus,
}

impl Message {
    pub fn new(
        message_id: impl Into<String>,
        user_id: impl Into<String>,
        message: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            user_id: user_id.into(),
            message: message.into(),
            created_at,
            status: MessageStatus::Normal,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.status == MessageStatus::Editing
    }
}

/// Channel metadata; only the display name is used.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChannelInfo {
    pub name: String,
}

/// The messages of one channel, kept in arrival order.
///
/// The list is never re-sorted by timestamp: the order the source delivered
/// is the order the grouping pass walks.
#[derive(Default, Clone, Debug)]
pub struct ChannelMessages {
    pub channel_id: String,
    messages: Vec<Message>,
}

impl ChannelMessages {
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            messages: Vec::new(),
        }
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Replace the whole list with a freshly fetched one.
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    pub fn get(&self, message_id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.message_id == message_id)
    }

    pub fn contains(&self, message_id: &str) -> bool {
        self.get(message_id).is_some()
    }

    /// Set the display status of a message. Returns false if it is not in the list.
    pub fn set_status(&mut self, message_id: &str, status: MessageStatus) -> bool {
        match self.messages.iter_mut().find(|m| m.message_id == message_id) {
            Some(msg) => {
                msg.status = status;
                true
            }
            None => false,
        }
    }

    /// Apply an acknowledged edit: new text, back to normal display.
    pub fn apply_update(&mut self, message_id: &str, text: &str) -> bool {
        match self.messages.iter_mut().find(|m| m.message_id == message_id) {
            Some(msg) => {
                msg.message = text.to_string();
                msg.status = MessageStatus::Normal;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, message_id: &str) -> Option<Message> {
        let pos = self.messages.iter().position(|m| m.message_id == message_id)?;
        Some(self.messages.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChannelMessages {
        let mut list = ChannelMessages::new("general");
        list.replace(vec![
            Message::new("m1", "alice", "hello", 1_000),
            Message::new("m2", "bob", "hi", 2_000),
        ]);
        list
    }

    #[test]
    fn test_message_wire_format() {
        let json = r#"{"messageId":"m1","userId":"alice","message":"hey","createdAt":1713789060000}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.message_id, "m1");
        assert_eq!(msg.created_at, 1_713_789_060_000);
        assert_eq!(msg.status, MessageStatus::Normal);

        let editing = r#"{"messageId":"m2","userId":"bob","message":"x","createdAt":0,"status":"editing"}"#;
        let msg: Message = serde_json::from_str(editing).unwrap();
        assert!(msg.is_editing());
    }

    #[test]
    fn test_set_status_and_apply_update() {
        let mut list = sample();
        assert!(list.set_status("m1", MessageStatus::Editing));
        assert!(list.get("m1").unwrap().is_editing());

        assert!(list.apply_update("m1", "hello there"));
        let msg = list.get("m1").unwrap();
        assert_eq!(msg.message, "hello there");
        assert_eq!(msg.status, MessageStatus::Normal);

        assert!(!list.set_status("missing", MessageStatus::Editing));
        assert!(!list.apply_update("missing", "x"));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut list = sample();
        list.replace(vec![
            Message::new("m1", "alice", "a", 1),
            Message::new("m2", "alice", "b", 2),
            Message::new("m3", "bob", "c", 3),
        ]);
        let removed = list.remove("m2").unwrap();
        assert_eq!(removed.message, "b");
        let ids: Vec<&str> = list.as_slice().iter().map(|m| m.message_id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m3"]);
        assert!(list.remove("m2").is_none());
    }
}
