//! Right-click context menu state for chat messages.
//!
//! Uses the `Option<..>` pattern: `None` = closed, `Some` = open. While a
//! menu is open it holds an [`OutsideClickGuard`], which stands for the
//! outside-click listener. The guard is released on every path out of the
//! open state, including dropping the controller with its view.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

/// The message a menu was opened on, captured at right-click time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuTarget {
    pub message_id: String,
    pub message: String,
    pub created_at: i64,
}

/// An open menu: its target and the pointer position it was opened at.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenuState {
    pub position_x: f32,
    pub position_y: f32,
    pub target: MenuTarget,
}

/// What a right-click did to the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuTransition {
    Opened,
    /// The open menu moved to another message.
    Replaced,
    /// Right-click on the message the menu was already open for.
    Closed,
}

/// Actions offered by the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Edit,
    Delete,
}

/// Counts live outside-click listeners.
#[derive(Clone, Debug, Default)]
pub struct ListenerRegistry {
    active: Rc<Cell<usize>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners currently attached.
    pub fn active(&self) -> usize {
        self.active.get()
    }

    fn attach(&self) -> OutsideClickGuard {
        self.active.set(self.active.get() + 1);
        debug!(active = self.active.get(), "outside-click listener attached");
        OutsideClickGuard {
            registry: self.clone(),
        }
    }
}

/// Attached outside-click listener; detaches on drop.
#[derive(Debug)]
pub struct OutsideClickGuard {
    registry: ListenerRegistry,
}

impl Drop for OutsideClickGuard {
    fn drop(&mut self) {
        let active = &self.registry.active;
        active.set(active.get().saturating_sub(1));
        debug!(active = active.get(), "outside-click listener detached");
    }
}

#[derive(Debug)]
struct OpenMenu {
    state: ContextMenuState,
    _listener: OutsideClickGuard,
}

/// Tracks at most one open context menu.
#[derive(Debug, Default)]
pub struct ContextMenuController {
    open: Option<OpenMenu>,
    listeners: ListenerRegistry,
}

impl ContextMenuController {
    pub fn new(listeners: ListenerRegistry) -> Self {
        Self {
            open: None,
            listeners,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn state(&self) -> Option<&ContextMenuState> {
        self.open.as_ref().map(|m| &m.state)
    }

    pub fn target(&self) -> Option<&MenuTarget> {
        self.state().map(|s| &s.target)
    }

    /// Whether outside clicks need to be watched for.
    pub fn is_listening(&self) -> bool {
        self.is_open()
    }

    /// Handle a right-click on a message at pointer position `(x, y)`.
    ///
    /// Same target as the open menu toggles it closed; any other target
    /// closes the current menu and opens a new one.
    pub fn right_click(&mut self, target: MenuTarget, x: f32, y: f32) -> MenuTransition {
        let previous = self.open.take();
        let transition = match &previous {
            Some(open) if open.state.target.message_id == target.message_id => {
                debug!(message_id = %target.message_id, "context menu toggled closed");
                return MenuTransition::Closed;
            }
            Some(_) => MenuTransition::Replaced,
            None => MenuTransition::Opened,
        };
        // Release the old listener before attaching a new one
        drop(previous);

        debug!(message_id = %target.message_id, x, y, ?transition, "context menu open");
        self.open = Some(OpenMenu {
            state: ContextMenuState {
                position_x: x,
                position_y: y,
                target,
            },
            _listener: self.listeners.attach(),
        });
        transition
    }

    /// Close the menu. Returns false if nothing was open.
    pub fn close(&mut self) -> bool {
        match self.open.take() {
            Some(open) => {
                debug!(message_id = %open.state.target.message_id, "context menu closed");
                true
            }
            None => false,
        }
    }

    /// A primary click somewhere. Clicks outside the menu close it.
    pub fn primary_click(&mut self, inside_menu: bool) -> bool {
        if inside_menu || !self.is_listening() {
            return false;
        }
        self.close()
    }

    /// Close the menu and hand back its target so the action can run on it.
    pub fn choose(&mut self, action: MenuAction) -> Option<MenuTarget> {
        let open = self.open.take()?;
        debug!(message_id = %open.state.target.message_id, ?action, "context menu action");
        Some(open.state.target)
    }
}
