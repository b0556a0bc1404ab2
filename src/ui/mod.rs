//! egui rendering for the chat client.
//!
//! - `messages`: the message list, driven by the render plan
//! - `context_menu`: the per-message right-click menu
//! - `toasts`: transient error notices
//! - `theme`: colors and avatars

pub mod context_menu;
pub mod messages;
pub mod theme;
pub mod toasts;
