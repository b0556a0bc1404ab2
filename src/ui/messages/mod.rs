//! Message area rendering for the channel view.

mod format;
mod render;

pub use render::{render_channel_messages, MessageUiAction};
