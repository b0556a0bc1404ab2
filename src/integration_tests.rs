//! Integration tests for channel-chat
//!
//! These tests run whole workflows through `ChatApp`: backend actions go
//! out over the real crossbeam channels and the events a backend would
//! send come back through `process_events`.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::time::Duration;

use crate::app::ChatApp;
use crate::config::Settings;
use crate::context_menu::{ListenerRegistry, MenuAction, MenuTransition};
use crate::grouping::count_day_dividers;
use crate::message::{Message, MessageStatus};
use crate::protocol::{BackendAction, GuiEvent};
use crate::ui::messages::MessageUiAction;

/// 2024-04-22 10:00 KST
const DAY1: i64 = 1_713_747_600_000;
const HOUR: i64 = 3_600_000;
const DAY: i64 = 24 * HOUR;

fn settings() -> Settings {
    Settings {
        server_id: "srv".into(),
        channel_id: "general".into(),
        ..Settings::default()
    }
}

fn app() -> (ChatApp, Receiver<BackendAction>, Sender<GuiEvent>) {
    let (action_tx, action_rx) = unbounded();
    let (event_tx, event_rx) = unbounded();
    (ChatApp::with_channels(settings(), action_tx, event_rx), action_rx, event_tx)
}

/// Newest first, as the API delivers them.
fn channel_history() -> Vec<Message> {
    vec![
        Message::new("m4", "bob", "see you tomorrow", DAY1 + DAY + 2 * HOUR),
        Message::new("m3", "bob", "morning", DAY1 + DAY + HOUR),
        Message::new("m2", "alice", "still here", DAY1 + HOUR),
        Message::new("m1", "alice", "hello", DAY1),
    ]
}

fn load(app: &mut ChatApp, event_tx: &Sender<GuiEvent>) {
    event_tx
        .send(GuiEvent::MessagesLoaded {
            channel_id: "general".into(),
            messages: channel_history(),
        })
        .unwrap();
    app.process_events();
}

#[test]
fn test_refresh_requests_configured_channel() {
    let (app, action_rx, _event_tx) = app();
    app.view.refresh();
    assert_eq!(
        action_rx.try_recv().unwrap(),
        BackendAction::FetchChannel {
            server_id: "srv".into(),
            channel_id: "general".into(),
        }
    );
    assert_eq!(
        action_rx.try_recv().unwrap(),
        BackendAction::FetchMessages {
            server_id: "srv".into(),
            channel_id: "general".into(),
        }
    );
}

#[test]
fn test_loaded_messages_are_grouped() {
    let (mut app, _action_rx, event_tx) = app();
    load(&mut app, &event_tx);

    let plan = app.view.plan();
    assert_eq!(plan.len(), 4);
    // m4 collapses onto m3; m3 starts bob's block and follows a day change
    assert!(!plan[0].show_header);
    assert!(plan[1].show_header);
    assert!(plan[1].show_day_divider);
    assert_eq!(
        plan[1].day_divider_label.as_deref(),
        Some("2024년 04월 23일 (화)")
    );
    assert!(!plan[2].show_header);
    assert!(plan[3].show_header);
    assert_eq!(count_day_dividers(plan), 1);
}

#[test]
fn test_edit_roundtrip_through_backend_events() {
    let (mut app, action_rx, event_tx) = app();
    load(&mut app, &event_tx);

    // Right-click seeds the buffer, the menu's edit action enters edit mode
    app.apply_message_actions(vec![MessageUiAction::OpenMenu {
        message_id: "m2".into(),
        x: 30.0,
        y: 40.0,
    }]);
    assert_eq!(app.view.edit_session().buffer(), "still here");
    app.view.choose_menu_action(MenuAction::Edit);
    assert!(app.view.context_menu().is_none());

    app.apply_message_actions(vec![
        MessageUiAction::EditBuffer("still here!".into()),
        MessageUiAction::Commit("m2".into()),
    ]);
    let action = action_rx.recv_timeout(Duration::from_secs(1)).unwrap();
    assert_eq!(
        action,
        BackendAction::UpdateMessage {
            server_id: "srv".into(),
            channel_id: "general".into(),
            message_id: "m2".into(),
            created_at: DAY1 + HOUR,
            text: "still here!".into(),
        }
    );

    // First attempt fails: nothing is lost
    event_tx
        .send(GuiEvent::UpdateFailed {
            channel_id: "general".into(),
            message_id: "m2".into(),
            reason: "PATCH returned 503".into(),
        })
        .unwrap();
    app.process_events();
    assert_eq!(app.status_messages.len(), 1);
    let m2 = &app.view.messages()[2];
    assert_eq!(m2.status, MessageStatus::Editing);
    assert_eq!(m2.message, "still here");
    assert_eq!(app.view.edit_session().buffer(), "still here!");

    // Retry succeeds
    app.apply_message_actions(vec![MessageUiAction::Commit("m2".into())]);
    assert!(action_rx.try_recv().is_ok());
    event_tx
        .send(GuiEvent::MessageUpdated {
            channel_id: "general".into(),
            message_id: "m2".into(),
            text: "still here!".into(),
        })
        .unwrap();
    app.process_events();

    let m2 = &app.view.messages()[2];
    assert_eq!(m2.status, MessageStatus::Normal);
    assert_eq!(m2.message, "still here!");
    assert!(app.view.edit_session().editing_message_id().is_none());
}

#[test]
fn test_delete_flow() {
    let (mut app, action_rx, event_tx) = app();
    load(&mut app, &event_tx);

    app.view.open_context_menu("m3", 0.0, 0.0);
    app.view.choose_menu_action(MenuAction::Delete);
    match action_rx.try_recv().unwrap() {
        BackendAction::DeleteMessage {
            message_id,
            created_at,
            ..
        } => {
            assert_eq!(message_id, "m3");
            assert_eq!(created_at, DAY1 + DAY + HOUR);
        }
        other => panic!("unexpected action: {:?}", other),
    }

    event_tx
        .send(GuiEvent::DeleteFailed {
            channel_id: "general".into(),
            message_id: "m3".into(),
            reason: "forbidden".into(),
        })
        .unwrap();
    app.process_events();
    assert_eq!(app.view.messages().len(), 4);
    assert_eq!(app.status_messages.len(), 1);

    event_tx
        .send(GuiEvent::MessageDeleted {
            channel_id: "general".into(),
            message_id: "m3".into(),
        })
        .unwrap();
    app.process_events();
    assert_eq!(app.view.messages().len(), 3);
    // m4 is now the only message of its day and heads its own block
    assert!(app.view.plan()[0].show_header);
    assert!(app.view.plan()[0].show_day_divider);
}

#[test]
fn test_menu_lifecycle_and_listener_release() {
    let (action_tx, _action_rx) = unbounded();
    let registry = ListenerRegistry::new();
    let mut view = crate::channel_view::ChannelView::with_listeners(
        "srv",
        "general",
        settings().display_offset(),
        action_tx,
        registry.clone(),
    );
    view.replace_messages(channel_history());

    assert_eq!(view.open_context_menu("m1", 1.0, 2.0), Some(MenuTransition::Opened));
    assert_eq!(view.open_context_menu("m2", 3.0, 4.0), Some(MenuTransition::Replaced));
    assert_eq!(registry.active(), 1);
    assert_eq!(view.edit_session().buffer(), "still here");

    // Clicking inside the menu keeps it, outside closes it
    assert!(!view.primary_click(true));
    assert!(view.primary_click(false));
    assert_eq!(registry.active(), 0);
    assert!(!view.close_context_menu());

    view.open_context_menu("m4", 0.0, 0.0);
    assert_eq!(registry.active(), 1);
    drop(view);
    assert_eq!(registry.active(), 0);
}

#[test]
fn test_backend_error_becomes_toast() {
    let (mut app, _action_rx, event_tx) = app();
    event_tx
        .send(GuiEvent::Error("Failed to load messages: timeout".into()))
        .unwrap();
    app.process_events();
    assert_eq!(app.status_messages[0].0, "Failed to load messages: timeout");
}
