//! Form events - inbound input that can move the form forward

use serde::{Deserialize, Serialize};
use signup_core::ButtonTag;

/// Defines the events that can trigger step transitions in the FSM.
///
/// Commands (`/start`, `/get_users`) never reach the machine; the dispatcher
/// handles them before a session is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormEvent {
    /// Free text typed by the user, already trimmed.
    Text(String),

    /// A click on one of the offered buttons.
    Button(ButtonTag),
}

impl FormEvent {
    pub fn text(text: impl AsRef<str>) -> Self {
        Self::Text(text.as_ref().trim().to_string())
    }

    /// Short name for logs, without the user's input.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Button(ButtonTag::Companions(_)) => "button:companions",
            Self::Button(ButtonTag::Major(_)) => "button:major",
            Self::Button(ButtonTag::Confirm) => "button:confirm",
            Self::Button(ButtonTag::Cancel) => "button:cancel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_constructor_trims() {
        assert_eq!(FormEvent::text("  09123456789 \n"), FormEvent::Text("09123456789".into()));
    }

    #[test]
    fn test_kind_does_not_leak_input() {
        assert_eq!(FormEvent::text("secret").kind(), "text");
        assert_eq!(FormEvent::Button(ButtonTag::Confirm).kind(), "button:confirm");
    }
}
