//! Step transitions - FSM transition logic
//!
//! Implements the per-chat session that applies form events to the current
//! step. Every (step, event) pair is handled in one exhaustive match, so the
//! set of legal transitions is visible in a single place.

use serde::{Deserialize, Serialize};
use signup_core::texts;
use signup_core::validation::{
    validate_full_name, validate_phone, validate_student_id, validate_transaction_ref,
};
use signup_core::{ButtonTag, ChatId, NewRegistration, ValidationError};
use thiserror::Error;

use super::events::FormEvent;
use super::states::FormStep;
use crate::draft::RegistrationDraft;
use crate::summary::format_summary;

/// Error type for transitions requested from outside the event table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Cannot mark chat as registered from step {0:?}")]
    NotAwaitingConfirmation(FormStep),
}

/// What applying one event did, for the dispatcher to turn into messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The field was stored and the session moved to `to`.
    Advanced {
        from: FormStep,
        to: FormStep,
        ack: &'static str,
    },

    /// The last field was stored; the session now waits for confirmation.
    ReadyForReview { summary: String },

    /// Input failed validation. Step and draft are unchanged.
    Rejected {
        step: FormStep,
        error: ValidationError,
    },

    /// Text arrived at a step that only takes a button click.
    ButtonRequired { step: FormStep },

    /// The user confirmed. The session stays at confirmation until the
    /// caller reports a successful save through [`Session::mark_registered`].
    ConfirmRequested(NewRegistration),

    /// The user cancelled at confirmation; the session is back at step 1.
    Cancelled,

    /// Any text after a completed registration.
    AlreadyRegistered,

    /// Text at a control step that has no meaning there.
    Unexpected { step: FormStep },

    /// A button that is not offered at this step, e.g. from a stale keyboard.
    Ignored { step: FormStep },
}

impl StepOutcome {
    /// Whether the session's step differs from before the event.
    pub fn changed_step(&self) -> bool {
        matches!(
            self,
            Self::Advanced { .. } | Self::ReadyForReview { .. } | Self::Cancelled
        )
    }
}

/// One chat's progress through the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    chat_id: ChatId,
    step: FormStep,
    draft: RegistrationDraft,
}

impl Session {
    /// A fresh session at the first data-entry step with an empty draft.
    pub fn new(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            step: FormStep::AwaitingFullName,
            draft: RegistrationDraft::default(),
        }
    }

    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Apply an event to the current step.
    pub fn handle_event(&mut self, event: FormEvent) -> StepOutcome {
        use FormEvent::{Button, Text};
        use FormStep::*;

        let outcome = match (self.step, event) {
            // ========== Text fields ==========
            (AwaitingFullName, Text(text)) => match validate_full_name(&text) {
                Ok(name) => {
                    self.draft.full_name = Some(name);
                    self.advance(AwaitingPhone, texts::ACK_FULL_NAME)
                }
                Err(error) => self.reject(error),
            },
            (AwaitingPhone, Text(text)) => match validate_phone(&text) {
                Ok(phone) => {
                    self.draft.phone = Some(phone);
                    self.advance(AwaitingCompanions, texts::ACK_PHONE)
                }
                Err(error) => self.reject(error),
            },
            (AwaitingStudentId, Text(text)) => match validate_student_id(&text) {
                Ok(id) => {
                    self.draft.student_id = Some(id);
                    self.advance(AwaitingTransactionRef, texts::ACK_STUDENT_ID)
                }
                Err(error) => self.reject(error),
            },
            (AwaitingTransactionRef, Text(text)) => match validate_transaction_ref(&text) {
                Ok(reference) => {
                    self.draft.transaction_ref = Some(reference);
                    self.step = AwaitingConfirmation;
                    StepOutcome::ReadyForReview {
                        summary: format_summary(&self.draft),
                    }
                }
                Err(error) => self.reject(error),
            },

            // ========== Button fields ==========
            (AwaitingCompanions, Button(ButtonTag::Companions(count))) => {
                self.draft.companion_count = Some(count);
                self.advance(AwaitingMajor, texts::ACK_COMPANIONS)
            }
            (AwaitingMajor, Button(ButtonTag::Major(major))) => {
                self.draft.major = Some(major);
                self.advance(AwaitingStudentId, texts::ACK_MAJOR)
            }
            (step @ (AwaitingCompanions | AwaitingMajor), Text(_)) => {
                StepOutcome::ButtonRequired { step }
            }

            // ========== Confirmation ==========
            (AwaitingConfirmation, Button(ButtonTag::Confirm)) => {
                match self.draft.to_new_registration(self.chat_id) {
                    Some(registration) => StepOutcome::ConfirmRequested(registration),
                    None => StepOutcome::Unexpected { step: self.step },
                }
            }
            (AwaitingConfirmation, Button(ButtonTag::Cancel)) => {
                *self = Self::new(self.chat_id);
                StepOutcome::Cancelled
            }
            (AwaitingConfirmation, Text(_)) => StepOutcome::Unexpected { step: self.step },

            // ========== Terminal ==========
            (Registered, Text(_)) => StepOutcome::AlreadyRegistered,

            // ========== Default: no transition ==========
            (step, Button(_)) => StepOutcome::Ignored { step },
        };

        tracing::debug!(
            chat_id = %self.chat_id,
            step = self.step.number(),
            changed = outcome.changed_step(),
            "form event applied"
        );

        outcome
    }

    /// Record that the confirmed registration was persisted.
    pub fn mark_registered(&mut self) -> Result<(), TransitionError> {
        if self.step != FormStep::AwaitingConfirmation {
            return Err(TransitionError::NotAwaitingConfirmation(self.step));
        }
        self.step = FormStep::Registered;
        Ok(())
    }

    fn advance(&mut self, to: FormStep, ack: &'static str) -> StepOutcome {
        let from = self.step;
        self.step = to;
        StepOutcome::Advanced { from, to, ack }
    }

    fn reject(&self, error: ValidationError) -> StepOutcome {
        StepOutcome::Rejected {
            step: self.step,
            error,
        }
    }
}
