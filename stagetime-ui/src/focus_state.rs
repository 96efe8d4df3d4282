//! # Focus State Management
//!
//! Each control owns a [`Focus`] handle with a unique id; a [`FocusRing`]
//! records which one currently holds keyboard focus. Only one control can be
//! focused at a time, and moving focus reports the control that lost it so
//! the host can deliver a blur.

use uuid::Uuid;

/// Identity of a focusable control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Focus {
    id: Uuid,
}

impl Default for Focus {
    fn default() -> Self {
        Self::new()
    }
}

impl Focus {
    /// Creates a focus handle with a fresh id.
    pub fn new() -> Self {
        Focus { id: Uuid::new_v4() }
    }

    /// The unique id of this handle.
    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Tracks the focused control of one host window.
#[derive(Debug, Default)]
pub struct FocusRing {
    focused: Option<Focus>,
}

impl FocusRing {
    /// Returns true when `focus` holds focus.
    pub fn is_focused(&self, focus: Focus) -> bool {
        self.focused == Some(focus)
    }

    /// The focused control, if any.
    pub fn focused(&self) -> Option<Focus> {
        self.focused
    }

    /// Gives focus to `focus`, returning the handle that lost it.
    ///
    /// Requesting focus for the already focused handle returns `None`.
    pub fn request_focus(&mut self, focus: Focus) -> Option<Focus> {
        match self.focused.replace(focus) {
            Some(previous) if previous != focus => Some(previous),
            _ => None,
        }
    }

    /// Clears focus if `focus` holds it. Returns true when focus was cleared.
    pub fn unfocus(&mut self, focus: Focus) -> bool {
        if self.focused == Some(focus) {
            self.focused = None;
            true
        } else {
            false
        }
    }
}
