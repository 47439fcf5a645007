//! State machine module
//!
//! Contains the FSM implementation for the signup form lifecycle.

mod events;
mod states;
mod transitions;

pub use events::FormEvent;
pub use states::FormStep;
pub use transitions::{Session, StepOutcome, TransitionError};
