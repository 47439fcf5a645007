//! signup_core - Core types and rules for the graduation signup bot
//!
//! This crate provides the foundational types used across all signup crates:
//! - `registration` - ChatId, Major, NewRegistration, Registration
//! - `validation` - per-field validators and their error kinds
//! - `buttons` - the fixed button-tag vocabulary and keyboards
//! - `texts` - fixed prompt, acknowledgement and error texts

pub mod buttons;
pub mod registration;
pub mod texts;
pub mod validation;

// Re-export commonly used types
pub use buttons::{Button, ButtonTag, Keyboard};
pub use registration::{ChatId, Major, NewRegistration, Registration};
pub use validation::{ValidationError, ValidationResult};
