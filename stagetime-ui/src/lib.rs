//! Host runtime for stagetime editors.
//!
//! The editors in `stagetime-components` are plain state machines; this
//! crate supplies what a host window gives them: shared [`State`] handles,
//! identity-compared [`CallbackWith`] change handlers and the deferred
//! [`Callback`] notifications built from them, the
//! keyboard event model, focus tracking, and the serial [`EntryPoint`]
//! dispatcher with tracing initialisation.
//!
//! # Example
//!
//! ```
//! use stagetime_ui::{CallbackWith, State};
//!
//! let emitted = State::new(None);
//! let sink = emitted.clone();
//! let on_change = CallbackWith::new(move |value: String| sink.set(Some(value)));
//! on_change.call("07:30 PM".to_string());
//! assert_eq!(emitted.get().as_deref(), Some("07:30 PM"));
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod entry_point;
pub mod focus_state;
pub mod keyboard_state;
pub mod prop;
pub mod state;

pub use crate::{
    entry_point::{Control, EntryConfig, EntryError, EntryPoint, HostEvent, init_tracing},
    focus_state::{Focus, FocusRing},
    keyboard_state::{
        ElementState, EventFlow, Key, KeyEvent, ModifiersState, NamedKey,
    },
    prop::{Callback, CallbackWith},
    state::State,
};
