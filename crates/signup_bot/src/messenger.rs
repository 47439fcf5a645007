//! Outbound messaging port.

use async_trait::async_trait;
use signup_core::{ChatId, Keyboard};

use crate::error::Result;

/// Delivers bot output to a chat.
///
/// Results are only used for logging; the dispatcher never retries.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str, keyboard: Option<&Keyboard>) -> Result<()>;

    async fn send_document(&self, chat_id: ChatId, file_name: &str, bytes: Vec<u8>) -> Result<()>;

    /// Stop the client's loading indicator for a button click.
    async fn acknowledge_button(&self, callback_id: &str) -> Result<()>;

    async fn delete_message(&self, chat_id: ChatId, message_id: i64) -> Result<()>;
}
