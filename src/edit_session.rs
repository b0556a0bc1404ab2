//! Inline edit state for a single message.

use tracing::debug;

/// Edit request produced by a commit, to be sent to the chat API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateRequest {
    pub message_id: String,
    /// Original timestamp of the message, part of its server-side key.
    pub created_at: i64,
    pub new_text: String,
}

/// Which message (if any) is being edited, and the text typed so far.
///
/// Idle while `editing` is None. In that state the buffer only holds text
/// seeded from the context menu for `seeded_for`, ready for an edit to start.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditSession {
    editing: Option<String>,
    buffer: String,
    seeded_for: Option<String>,
    /// Text of the last commit still waiting for its acknowledgement
    pending: Option<String>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing_message_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn is_editing(&self, message_id: &str) -> bool {
        self.editing.as_deref() == Some(message_id)
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Mutable buffer for a text field; only available while editing.
    pub fn buffer_mut(&mut self) -> Option<&mut String> {
        if self.editing.is_some() {
            Some(&mut self.buffer)
        } else {
            None
        }
    }

    pub fn seeded_for(&self) -> Option<&str> {
        self.seeded_for.as_deref()
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Pre-load the buffer with the text of `message_id`.
    ///
    /// Ignored while an edit is in progress so typed text is never lost.
    pub fn seed(&mut self, message_id: &str, text: &str) {
        if self.editing.is_some() {
            debug!("edit in progress, seed ignored");
            return;
        }
        self.seeded_for = Some(message_id.to_string());
        self.buffer = text.to_string();
    }

    /// Drop a seed nobody will use.
    pub fn clear_seed(&mut self) {
        if self.editing.is_none() && self.seeded_for.take().is_some() {
            self.buffer.clear();
        }
    }

    /// Start editing `message_id`.
    ///
    /// Starts from the seeded buffer when the seed belongs to `message_id`,
    /// from `initial_text` otherwise. Returns the id of an edit that was
    /// cancelled to make room.
    pub fn start(&mut self, message_id: &str, initial_text: &str) -> Option<String> {
        let previous = self
            .editing
            .take()
            .filter(|id| id != message_id);
        if let Some(prev) = &previous {
            debug!(message_id = %prev, "edit cancelled by a new edit");
        }
        // A seed only exists while idle
        if self.seeded_for.as_deref() != Some(message_id) {
            self.buffer = initial_text.to_string();
        }
        debug!(message_id, "edit started");
        self.editing = Some(message_id.to_string());
        self.seeded_for = None;
        self.pending = None;
        previous
    }

    /// Replace the buffer. Returns false when idle.
    pub fn update_buffer(&mut self, text: &str) -> bool {
        match self.buffer_mut() {
            Some(buffer) => {
                *buffer = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Build the update request for `message_id` and remember its text.
    ///
    /// The session stays in edit mode; only a matching acknowledgement
    /// ends it (see [`EditSession::finish`]).
    pub fn commit(&mut self, message_id: &str, created_at: i64) -> Option<UpdateRequest> {
        if !self.is_editing(message_id) {
            return None;
        }
        self.pending = Some(self.buffer.clone());
        Some(UpdateRequest {
            message_id: message_id.to_string(),
            created_at,
            new_text: self.buffer.clone(),
        })
    }

    /// Leave edit mode for `message_id` discarding the buffer.
    pub fn cancel(&mut self, message_id: &str) -> bool {
        if !self.is_editing(message_id) {
            return false;
        }
        debug!(message_id, "edit cancelled");
        self.editing = None;
        self.buffer.clear();
        self.pending = None;
        true
    }

    /// The server saved `text` for `message_id`.
    ///
    /// Ends the edit only when `text` is what the last commit sent and the
    /// buffer has not changed since. An older acknowledgement leaves the
    /// draft alone and returns false.
    pub fn finish(&mut self, message_id: &str, text: &str) -> bool {
        if !self.is_editing(message_id) {
            return false;
        }
        if self.pending.as_deref() != Some(text) || self.buffer != text {
            debug!(message_id, "acknowledgement does not match the open draft");
            return false;
        }
        debug!(message_id, "edit saved");
        self.editing = None;
        self.buffer.clear();
        self.pending = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_update_commit() {
        let mut edit = EditSession::new();
        assert!(edit.start("m1", "hello").is_none());
        assert!(edit.is_editing("m1"));
        assert_eq!(edit.buffer(), "hello");

        assert!(edit.update_buffer("hello world"));
        let request = edit.commit("m1", 42).unwrap();
        assert_eq!(
            request,
            UpdateRequest {
                message_id: "m1".into(),
                created_at: 42,
                new_text: "hello world".into(),
            }
        );

        // Commit does not leave edit mode
        assert!(edit.is_editing("m1"));
        assert_eq!(edit.buffer(), "hello world");
    }

    #[test]
    fn test_commit_while_idle_is_noop() {
        let mut edit = EditSession::new();
        assert!(edit.commit("m1", 1).is_none());
    }

    #[test]
    fn test_commit_for_other_message_is_noop() {
        let mut edit = EditSession::new();
        edit.start("m1", "a");
        assert!(edit.commit("m2", 1).is_none());
    }

    #[test]
    fn test_update_buffer_requires_editing() {
        let mut edit = EditSession::new();
        assert!(!edit.update_buffer("x"));
        assert!(edit.buffer_mut().is_none());
        assert_eq!(edit.buffer(), "");
    }

    #[test]
    fn test_cancel_without_session_is_noop() {
        let mut edit = EditSession::new();
        edit.seed("m1", "seeded");
        let before = edit.clone();
        assert!(!edit.cancel("m1"));
        assert_eq!(edit, before);
    }

    #[test]
    fn test_cancel_discards_buffer() {
        let mut edit = EditSession::new();
        edit.start("m1", "draft");
        edit.update_buffer("changed");
        assert!(edit.cancel("m1"));
        assert!(edit.editing_message_id().is_none());
        assert_eq!(edit.buffer(), "");
    }

    #[test]
    fn test_new_start_replaces_previous_without_merging() {
        let mut edit = EditSession::new();
        edit.start("m1", "first");
        edit.update_buffer("first, edited");

        assert_eq!(edit.start("m2", "second").as_deref(), Some("m1"));
        assert!(edit.is_editing("m2"));
        assert!(!edit.is_editing("m1"));
        assert_eq!(edit.buffer(), "second");
    }

    #[test]
    fn test_restart_same_message_reports_nothing_cancelled() {
        let mut edit = EditSession::new();
        edit.start("m1", "a");
        assert!(edit.start("m1", "b").is_none());
        assert_eq!(edit.buffer(), "b");
    }

    #[test]
    fn test_seed_only_while_idle() {
        let mut edit = EditSession::new();
        edit.seed("m2", "from menu");
        assert_eq!(edit.buffer(), "from menu");
        assert_eq!(edit.seeded_for(), Some("m2"));
        assert!(edit.editing_message_id().is_none());

        edit.start("m1", "typing");
        edit.seed("m3", "other message");
        assert_eq!(edit.buffer(), "typing");
        assert!(edit.seeded_for().is_none());
    }

    #[test]
    fn test_start_uses_seed_for_same_message() {
        let mut edit = EditSession::new();
        edit.seed("m1", "seeded text");
        edit.start("m1", "fallback");
        assert_eq!(edit.buffer(), "seeded text");

        let mut edit = EditSession::new();
        edit.seed("m2", "seeded text");
        edit.start("m1", "fallback");
        assert_eq!(edit.buffer(), "fallback");
    }

    #[test]
    fn test_clear_seed() {
        let mut edit = EditSession::new();
        edit.seed("m1", "seeded");
        edit.clear_seed();
        assert!(edit.seeded_for().is_none());
        assert_eq!(edit.buffer(), "");
    }

    #[test]
    fn test_finish() {
        let mut edit = EditSession::new();
        assert!(!edit.finish("m1", "a"));
        edit.start("m1", "a");
        edit.commit("m1", 1);
        assert_eq!(edit.pending(), Some("a"));
        assert!(!edit.finish("m2", "a"));
        assert!(edit.finish("m1", "a"));
        assert!(edit.editing_message_id().is_none());
        assert!(edit.pending().is_none());
    }

    #[test]
    fn test_stale_acknowledgement_keeps_draft() {
        let mut edit = EditSession::new();
        edit.start("m1", "orig");
        edit.update_buffer("A");
        edit.commit("m1", 1);
        edit.cancel("m1");

        edit.start("m1", "orig");
        edit.update_buffer("B draft");
        assert!(!edit.finish("m1", "A"));
        assert!(edit.is_editing("m1"));
        assert_eq!(edit.buffer(), "B draft");
    }

    #[test]
    fn test_acknowledgement_after_further_typing_keeps_draft() {
        let mut edit = EditSession::new();
        edit.start("m1", "orig");
        edit.update_buffer("A");
        edit.commit("m1", 1);
        edit.update_buffer("A, then more");
        assert!(!edit.finish("m1", "A"));
        assert_eq!(edit.buffer(), "A, then more");
    }
}
