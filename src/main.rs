//! Channel Chat - desktop client for a server/channel chat service.
//!
//! Architecture:
//! - Main thread: runs the egui UI and owns the channel view
//! - Backend thread: runs a Tokio runtime for the REST calls
//! - Communication via crossbeam channels

use eframe::egui;

use channel_chat::app::ChatApp;
use channel_chat::logging;

fn main() -> eframe::Result<()> {
    logging::init();
    tracing::info!("starting channel-chat");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("Channel Chat"),
        ..Default::default()
    };

    eframe::run_native(
        "Channel Chat",
        options,
        Box::new(|cc| Ok(Box::new(ChatApp::new(cc)))),
    )
}
