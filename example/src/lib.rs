//! Terminal host for the stagetime editors.
//!
//! Replays a keystroke script against a countdown or timer editor through
//! an [`EntryPoint`] and records every value the editor emits.

pub mod script;

use stagetime_components::{
    TimeField, TimeFieldArgs,
    time_field::{CountdownVariant, FieldVariant, TimerVariant, variant::timer_display},
    time_model::parse_duration,
};
use stagetime_ui::{CallbackWith, EntryConfig, EntryPoint, State};
use tracing::{debug, info};

pub use crate::script::{ScriptError, Step, parse_script};

/// Result of a replayed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Every emitted value, in order, as the host would print it.
    pub emitted: Vec<String>,
    /// The editor text after the last step.
    pub display: String,
}

/// Host-side handling of a variant's external value.
pub trait HostValue: FieldVariant {
    /// Reads a value given on the command line or by `set:`.
    fn read(text: &str) -> Option<Self::Value>;

    /// Renders an emitted value.
    fn describe(value: &Self::Value) -> String;
}

impl HostValue for CountdownVariant {
    fn read(text: &str) -> Option<String> {
        // The editor itself treats unparseable text as empty; the host
        // rejects it up front.
        Self::parse(&text.to_string()).map(|_| text.to_string())
    }

    fn describe(value: &String) -> String {
        value.clone()
    }
}

impl HostValue for TimerVariant {
    fn read(text: &str) -> Option<u64> {
        text.parse()
            .ok()
            .or_else(|| parse_duration(text).map(|parts| parts.total_seconds()))
    }

    fn describe(value: &u64) -> String {
        format!("{value} ({})", timer_display(*value))
    }
}

/// Replays `steps` against a fresh editor of variant `V`.
pub fn replay<V: HostValue>(
    value: Option<&str>,
    args: TimeFieldArgs,
    steps: &[Step],
    config: EntryConfig,
) -> Result<Transcript, ScriptError> {
    let value = value.map(|text| read_value::<V>(text)).transpose()?;

    let emitted = State::new(Vec::new());
    let sink = emitted.clone();
    let on_change = CallbackWith::new(move |value: V::Value| {
        let line = V::describe(&value);
        info!(value = %line, "value emitted");
        sink.with_mut(|lines| lines.push(line));
    });
    let field = State::new(TimeField::<V>::new(value, args, on_change));

    stagetime_ui::init_tracing(&config.default_log_filter);
    let mut host = EntryPoint::new().config(config).control(field.clone());

    for step in steps {
        match step {
            Step::Event(event) => {
                let flow = host.dispatch(*event)?;
                debug!(?event, ?flow, "step");
            }
            Step::SetValue(text) => {
                let value = read_value::<V>(text)?;
                field.with_mut(|field| field.set_value(Some(value)));
            }
        }
    }

    Ok(Transcript {
        emitted: emitted.get(),
        display: field.with(|field| field.display_text()),
    })
}

fn read_value<V: HostValue>(text: &str) -> Result<V::Value, ScriptError> {
    V::read(text).ok_or_else(|| ScriptError::InvalidValue {
        value: text.to_string(),
    })
}
