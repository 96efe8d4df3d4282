//! # Keyboard State Management
//!
//! Keyboard event model delivered to controls.

/// Keys that carry no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Tab.
    Tab,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
}

/// Logical key of a keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A named, non-text key.
    Named(NamedKey),
    /// A key that produced a character.
    Character(char),
}

/// Whether a key went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementState {
    /// Key pressed (including auto-repeat).
    #[default]
    Pressed,
    /// Key released.
    Released,
}

/// Modifier keys held while the event was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifiersState {
    /// Shift is held.
    pub shift: bool,
    /// Control (or Command) is held.
    pub control: bool,
    /// Alt (or Option) is held.
    pub alt: bool,
}

/// A single keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The logical key.
    pub logical_key: Key,
    /// Press or release.
    pub state: ElementState,
    /// Modifiers held at the time of the event.
    pub modifiers: ModifiersState,
}

impl KeyEvent {
    /// A press of a named key with no modifiers.
    pub fn named(key: NamedKey) -> Self {
        Self {
            logical_key: Key::Named(key),
            state: ElementState::Pressed,
            modifiers: ModifiersState::default(),
        }
    }

    /// A press of a character key with no modifiers.
    pub fn character(ch: char) -> Self {
        Self {
            logical_key: Key::Character(ch),
            state: ElementState::Pressed,
            modifiers: ModifiersState::default(),
        }
    }

    /// Returns the same event as a release.
    pub fn released(mut self) -> Self {
        self.state = ElementState::Released;
        self
    }

    /// Returns true for presses.
    pub fn is_pressed(&self) -> bool {
        self.state == ElementState::Pressed
    }
}

/// Whether a control consumed an event or left it for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    /// The control handled the event.
    Consumed,
    /// The event should continue to the host (e.g. `Tab` focus traversal).
    Propagate,
}

impl EventFlow {
    /// Returns true when the event was consumed.
    pub fn is_consumed(self) -> bool {
        self == EventFlow::Consumed
    }
}
