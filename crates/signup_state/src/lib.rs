//! signup_state - State machine for the guided signup form
//!
//! This crate provides the per-chat form session, the step enum with its
//! transition table, and the review summary shown before confirmation.

pub mod draft;
pub mod machine;
pub mod summary;

// Re-export commonly used types
pub use draft::RegistrationDraft;
pub use machine::{FormEvent, FormStep, Session, StepOutcome, TransitionError};
pub use summary::format_summary;
