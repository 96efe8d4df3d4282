//! Keystroke scripts.
//!
//! A script is a whitespace-separated list of tokens:
//!
//! | token | effect |
//! |-------|--------|
//! | `up` `down` `left` `right` | arrow keys |
//! | `tab` `shift-tab` `esc` `enter` `backspace` | named keys |
//! | `blur` | focus leaves the editor |
//! | `frame` | a frame is painted |
//! | `click:N` | click at caret position `N` |
//! | `set:V` | the host replaces the value with `V` |
//! | anything else | typed character by character |

use stagetime_ui::{HostEvent, KeyEvent, ModifiersState, NamedKey};
use thiserror::Error;

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Delivered to the editor through the entry point.
    Event(HostEvent),
    /// Replaces the editor value from outside.
    SetValue(String),
}

/// Errors raised while reading or replaying a script.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    /// The script has no tokens.
    #[error("script is empty")]
    Empty,
    /// `click:` was not followed by a caret position.
    #[error("invalid click position in `{token}`")]
    InvalidClick {
        /// The offending token.
        token: String,
    },
    /// A value could not be read for the chosen editor.
    #[error("`{value}` is not a valid value for this editor")]
    InvalidValue {
        /// The offending value.
        value: String,
    },
    /// The entry point rejected an event.
    #[error(transparent)]
    Dispatch(#[from] stagetime_ui::EntryError),
}

/// Reads script tokens into steps.
pub fn parse_script<'a>(
    tokens: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for token in tokens.into_iter().flat_map(str::split_whitespace) {
        parse_token(token, &mut steps)?;
    }
    if steps.is_empty() {
        return Err(ScriptError::Empty);
    }
    Ok(steps)
}

fn parse_token(token: &str, steps: &mut Vec<Step>) -> Result<(), ScriptError> {
    let key = |key: NamedKey| Step::Event(HostEvent::Key(KeyEvent::named(key)));
    let step = match token.to_ascii_lowercase().as_str() {
        "up" => key(NamedKey::ArrowUp),
        "down" => key(NamedKey::ArrowDown),
        "left" => key(NamedKey::ArrowLeft),
        "right" => key(NamedKey::ArrowRight),
        "tab" => key(NamedKey::Tab),
        "shift-tab" => {
            let mut event = KeyEvent::named(NamedKey::Tab);
            event.modifiers = ModifiersState {
                shift: true,
                ..ModifiersState::default()
            };
            Step::Event(HostEvent::Key(event))
        }
        "esc" | "escape" => key(NamedKey::Escape),
        "enter" => key(NamedKey::Enter),
        "backspace" => key(NamedKey::Backspace),
        "blur" => Step::Event(HostEvent::Blur),
        "frame" => Step::Event(HostEvent::Frame),
        _ => {
            if let Some(caret) = token.strip_prefix("click:") {
                let caret = caret.parse().map_err(|_| ScriptError::InvalidClick {
                    token: token.to_string(),
                })?;
                Step::Event(HostEvent::Click { control: 0, caret })
            } else if let Some(value) = token.strip_prefix("set:") {
                Step::SetValue(value.to_string())
            } else {
                steps.extend(
                    token
                        .chars()
                        .map(|ch| Step::Event(HostEvent::Key(KeyEvent::character(ch)))),
                );
                return Ok(());
            }
        }
    };
    steps.push(step);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_tokens() {
        let steps = parse_script(["click:6 up", "Frame", "blur"]).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Event(HostEvent::Click {
                    control: 0,
                    caret: 6
                }),
                Step::Event(HostEvent::Key(KeyEvent::named(NamedKey::ArrowUp))),
                Step::Event(HostEvent::Frame),
                Step::Event(HostEvent::Blur),
            ]
        );
    }

    #[test]
    fn literal_tokens_are_typed() {
        let steps = parse_script(["99p"]).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(
            steps[2],
            Step::Event(HostEvent::Key(KeyEvent::character('p')))
        );
    }

    #[test]
    fn set_keeps_its_value() {
        let steps = parse_script(["set:6:30PM"]).unwrap();
        assert_eq!(steps, vec![Step::SetValue("6:30PM".to_string())]);
    }

    #[test]
    fn bad_scripts() {
        assert_eq!(parse_script(["  "]), Err(ScriptError::Empty));
        assert_eq!(
            parse_script(["click:x"]),
            Err(ScriptError::InvalidClick {
                token: "click:x".to_string()
            })
        );
    }
}
