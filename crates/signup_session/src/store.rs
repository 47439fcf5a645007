//! Session store trait

use async_trait::async_trait;
use signup_core::ChatId;
use signup_state::Session;

use crate::error::Result;

/// Keyed storage for form sessions.
///
/// Implementations must be safe to share across tasks handling different
/// chats. Serializing access to a single chat is the caller's job.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up the session of a chat.
    async fn get(&self, chat_id: ChatId) -> Option<Session>;

    /// Create a fresh session, replacing whatever the chat had before.
    async fn create(&self, chat_id: ChatId) -> Session;

    /// Write back a session that already exists.
    async fn update(&self, session: Session) -> Result<()>;

    /// Drop a chat's session. Returns whether one existed.
    async fn delete(&self, chat_id: ChatId) -> bool;

    /// Number of live sessions.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
