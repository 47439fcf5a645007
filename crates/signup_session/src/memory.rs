//! In-memory session store

use async_trait::async_trait;
use dashmap::DashMap;
use signup_core::ChatId;
use signup_state::Session;

use crate::error::{Result, SessionError};
use crate::store::SessionStore;

/// Sessions held in a sharded concurrent map, one entry per chat.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<ChatId, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, chat_id: ChatId) -> Option<Session> {
        self.sessions.get(&chat_id).map(|entry| entry.value().clone())
    }

    async fn create(&self, chat_id: ChatId) -> Session {
        let session = Session::new(chat_id);
        if self.sessions.insert(chat_id, session.clone()).is_some() {
            tracing::debug!(%chat_id, "replaced existing session");
        }
        session
    }

    async fn update(&self, session: Session) -> Result<()> {
        let chat_id = session.chat_id();
        match self.sessions.get_mut(&chat_id) {
            Some(mut entry) => {
                *entry = session;
                Ok(())
            }
            None => Err(SessionError::NotFound(chat_id)),
        }
    }

    async fn delete(&self, chat_id: ChatId) -> bool {
        self.sessions.remove(&chat_id).is_some()
    }

    async fn len(&self) -> usize {
        self.sessions.len()
    }
}
