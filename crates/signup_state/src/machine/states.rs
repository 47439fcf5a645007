//! Form steps - Defines every stage of the guided signup form

use serde::{Deserialize, Serialize};
use signup_core::texts::STEP_MESSAGES;
use signup_core::Keyboard;

/// The stage a chat is at in the signup form.
///
/// Each variant carries a stable step number matching the fixed prompt
/// table. Number 8 has no variant: it is the success message emitted on the
/// way into `Registered`.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum FormStep {
    // ========== Text-driven fields ==========
    /// Waiting for first and last name.
    #[default]
    AwaitingFullName,
    /// Waiting for a mobile number.
    AwaitingPhone,

    // ========== Button-driven fields ==========
    /// Waiting for a `companions_N` click.
    AwaitingCompanions,
    /// Waiting for a `major_<value>` click.
    AwaitingMajor,

    // ========== Text-driven fields ==========
    /// Waiting for the student number.
    AwaitingStudentId,
    /// Waiting for the payment transaction reference.
    AwaitingTransactionRef,

    // ========== Control states ==========
    /// Summary shown, waiting for `confirm` or `cancel`.
    AwaitingConfirmation,
    /// Registration persisted. Only a restart leaves this state.
    Registered,
}

impl FormStep {
    pub fn number(&self) -> u8 {
        match self {
            Self::AwaitingFullName => 1,
            Self::AwaitingPhone => 2,
            Self::AwaitingCompanions => 3,
            Self::AwaitingMajor => 4,
            Self::AwaitingStudentId => 5,
            Self::AwaitingTransactionRef => 6,
            Self::AwaitingConfirmation => 7,
            Self::Registered => 9,
        }
    }

    /// The fixed prompt for this step.
    pub fn prompt(&self) -> &'static str {
        STEP_MESSAGES[self.number() as usize]
    }

    /// Buttons offered with the prompt, for button-driven steps.
    pub fn keyboard(&self) -> Option<Keyboard> {
        match self {
            Self::AwaitingCompanions => Some(Keyboard::companions()),
            Self::AwaitingMajor => Some(Keyboard::majors()),
            Self::AwaitingConfirmation => Some(Keyboard::confirmation()),
            _ => None,
        }
    }
}
