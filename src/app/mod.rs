//! Application module structure for ChatApp
//!
//! - `core`: ChatApp struct, backend startup and teardown
//! - `events`: backend events and message-area interactions
//! - `update`: per-frame update loop

pub mod core;
pub mod events;
pub mod update;

// Re-export ChatApp for public API
pub use core::ChatApp;
