//! Channel Chat client library.
//!
//! The message grouping pass, context menu and edit session are plain
//! state with no UI dependency; `app` and `ui` put an egui front end on
//! top and `backend` talks to the chat API.

pub mod app;
pub mod backend;
pub mod channel_view;
pub mod config;
pub mod context_menu;
pub mod datefmt;
pub mod edit_session;
pub mod error;
pub mod fonts;
pub mod grouping;
pub mod logging;
pub mod message;
pub mod protocol;
pub mod ui;

#[cfg(test)]
mod integration_tests;
