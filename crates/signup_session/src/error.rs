//! Session store error types

use signup_core::ChatId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found for chat {0}")]
    NotFound(ChatId),
}

pub type Result<T> = std::result::Result<T, SessionError>;
