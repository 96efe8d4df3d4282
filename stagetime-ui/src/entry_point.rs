//! Host entry point: registers controls and dispatches events to them.
//!
//! ## Usage
//!
//! Register every editor the window shows, then feed host events one at a
//! time. Dispatch is strictly serial; a frame runs after each event so
//! deferred caret updates land before the next keystroke.

use derive_setters::Setters;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    focus_state::{Focus, FocusRing},
    keyboard_state::{EventFlow, Key, KeyEvent, NamedKey},
    prop::Callback,
    state::State,
};

/// A keyboard-driven control the host can dispatch events to.
pub trait Control: Send + Sync {
    /// The focus identity of this control.
    fn focus_handle(&self) -> Focus;

    /// The control gained focus, optionally at a caret position.
    fn on_focus(&mut self, caret: Option<usize>);

    /// The control lost focus.
    fn on_blur(&mut self);

    /// A keyboard event arrived while the control was focused.
    fn on_key(&mut self, event: &KeyEvent) -> EventFlow;

    /// The host finished painting a frame.
    fn on_frame(&mut self);

    /// Current text shown by the control, for hosts without a renderer.
    fn display_text(&self) -> String;

    /// Change notifications queued by the last calls. The host runs them
    /// once it no longer holds the control.
    fn take_notifications(&mut self) -> Vec<Callback> {
        Vec::new()
    }
}

fn notify(notifications: Vec<Callback>) {
    for notification in notifications {
        notification.call();
    }
}

/// Notifications run after the write guard is released, so a change handler
/// may lock the same state again.
impl<C: Control> Control for State<C> {
    fn focus_handle(&self) -> Focus {
        self.with(|c| c.focus_handle())
    }

    fn on_focus(&mut self, caret: Option<usize>) {
        let notifications = self.with_mut(|c| {
            c.on_focus(caret);
            c.take_notifications()
        });
        notify(notifications);
    }

    fn on_blur(&mut self) {
        let notifications = self.with_mut(|c| {
            c.on_blur();
            c.take_notifications()
        });
        notify(notifications);
    }

    fn on_key(&mut self, event: &KeyEvent) -> EventFlow {
        let (flow, notifications) = self.with_mut(|c| (c.on_key(event), c.take_notifications()));
        notify(notifications);
        flow
    }

    fn on_frame(&mut self) {
        let notifications = self.with_mut(|c| {
            c.on_frame();
            c.take_notifications()
        });
        notify(notifications);
    }

    fn display_text(&self) -> String {
        self.with(|c| c.display_text())
    }
}

/// Events a host window delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A key event for the focused control.
    Key(KeyEvent),
    /// A click on control `control` at caret position `caret`.
    Click {
        /// Index of the control in registration order.
        control: usize,
        /// Caret position inside the control's text.
        caret: usize,
    },
    /// Focus leaves every control.
    Blur,
    /// A frame was painted.
    Frame,
}

/// Errors raised while dispatching host events.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    /// An event was dispatched before any control was registered.
    #[error("no control registered with the entry point")]
    NoControls,
    /// A click referenced a control index that does not exist.
    #[error("unknown control index {index} (registered: {registered})")]
    UnknownControl {
        /// The requested index.
        index: usize,
        /// How many controls are registered.
        registered: usize,
    },
}

/// Entry point configuration.
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
pub struct EntryConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[setters(into)]
    pub default_log_filter: String,
    /// Run a frame after every dispatched event.
    pub frame_after_event: bool,
    /// Move focus to the next control when `Tab` propagates.
    pub tab_traversal: bool,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            default_log_filter: "error,stagetime_ui=info".to_string(),
            frame_after_event: true,
            tab_traversal: true,
        }
    }
}

/// Serial event dispatcher for a set of controls.
pub struct EntryPoint {
    controls: SmallVec<[Box<dyn Control>; 4]>,
    focus: FocusRing,
    config: EntryConfig,
}

impl Default for EntryPoint {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryPoint {
    /// Creates an entry point with the default configuration.
    pub fn new() -> Self {
        Self {
            controls: SmallVec::new(),
            focus: FocusRing::default(),
            config: EntryConfig::default(),
        }
    }

    /// Overrides the configuration.
    pub fn config(mut self, config: EntryConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers a control. Registration order is the `Tab` order.
    pub fn control(mut self, control: impl Control + 'static) -> Self {
        self.controls.push(Box::new(control));
        self
    }

    /// Index of the focused control.
    pub fn focused_index(&self) -> Option<usize> {
        let focused = self.focus.focused()?;
        self.controls
            .iter()
            .position(|c| c.focus_handle() == focused)
    }

    /// Text of the control at `index`.
    pub fn display_text(&self, index: usize) -> Option<String> {
        self.controls.get(index).map(|c| c.display_text())
    }

    /// Dispatches a single event, then runs a frame if configured.
    pub fn dispatch(&mut self, event: HostEvent) -> Result<EventFlow, EntryError> {
        if self.controls.is_empty() {
            return Err(EntryError::NoControls);
        }
        trace!(?event, "dispatch");
        let flow = match event {
            HostEvent::Key(key) => self.dispatch_key(key),
            HostEvent::Click { control, caret } => {
                self.focus_control(control, Some(caret))?;
                EventFlow::Consumed
            }
            HostEvent::Blur => {
                self.blur_focused();
                EventFlow::Consumed
            }
            HostEvent::Frame => {
                self.frame();
                return Ok(EventFlow::Consumed);
            }
        };
        self.deliver_notifications();
        if self.config.frame_after_event {
            self.frame();
        }
        Ok(flow)
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> EventFlow {
        let Some(index) = self.focused_index() else {
            // Keys with nothing focused start at the first control.
            if key.logical_key == Key::Named(NamedKey::Tab) && self.config.tab_traversal {
                let _ = self.focus_control(0, None);
                return EventFlow::Consumed;
            }
            return EventFlow::Propagate;
        };
        let flow = self.controls[index].on_key(&key);
        if flow == EventFlow::Propagate
            && key.is_pressed()
            && key.logical_key == Key::Named(NamedKey::Tab)
            && self.config.tab_traversal
        {
            let len = self.controls.len();
            let next = if key.modifiers.shift {
                (index + len - 1) % len
            } else {
                (index + 1) % len
            };
            if next != index {
                let _ = self.focus_control(next, None);
                return EventFlow::Consumed;
            }
        }
        flow
    }

    fn focus_control(&mut self, index: usize, caret: Option<usize>) -> Result<(), EntryError> {
        let registered = self.controls.len();
        let handle = self
            .controls
            .get(index)
            .map(|c| c.focus_handle())
            .ok_or(EntryError::UnknownControl { index, registered })?;
        if let Some(previous) = self.focus.request_focus(handle) {
            if let Some(old) = self
                .controls
                .iter_mut()
                .find(|c| c.focus_handle() == previous)
            {
                old.on_blur();
            }
        }
        debug!(index, ?caret, "focus control");
        self.controls[index].on_focus(caret);
        Ok(())
    }

    fn blur_focused(&mut self) {
        if let Some(index) = self.focused_index() {
            let handle = self.controls[index].focus_handle();
            self.focus.unfocus(handle);
            self.controls[index].on_blur();
        }
    }

    fn frame(&mut self) {
        for control in self.controls.iter_mut() {
            control.on_frame();
        }
        self.deliver_notifications();
    }

    fn deliver_notifications(&mut self) {
        for control in self.controls.iter_mut() {
            notify(control.take_notifications());
        }
    }
}

/// Installs the global tracing subscriber once.
///
/// `RUST_LOG` wins over `default_filter`; later calls are no-ops.
pub fn init_tracing(default_filter: &str) {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(default_filter) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
