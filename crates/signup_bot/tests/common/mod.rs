#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use signup_bot::{BotError, Dispatcher, ExportGate, InboundEvent, Messenger, TranscriptLog};
use signup_core::{ChatId, Keyboard, NewRegistration, Registration};
use signup_session::InMemorySessionStore;
use signup_storage::{
    RegistrationRepository, StorageError, StorageResult, XlsxExportRenderer,
};

/// SHA-256 of "password".
pub const PASSWORD_DIGEST: &str =
    "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";
pub const PASSWORD: &str = "password";

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text {
        chat_id: ChatId,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Document {
        chat_id: ChatId,
        file_name: String,
        bytes: Vec<u8>,
    },
    Ack(String),
    Deleted {
        chat_id: ChatId,
        message_id: i64,
    },
}

/// Records everything the bot sends.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    fail_documents: AtomicBool,
}

impl RecordingMessenger {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    pub fn texts_for(&self, chat_id: ChatId) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Text { chat_id: to, text, .. } if to == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn documents(&self) -> Vec<(ChatId, String, Vec<u8>)> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Document {
                    chat_id,
                    file_name,
                    bytes,
                } => Some((chat_id, file_name, bytes)),
                _ => None,
            })
            .collect()
    }

    pub fn fail_documents(&self, fail: bool) {
        self.fail_documents.store(fail, Ordering::SeqCst);
    }

    fn push(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> signup_bot::Result<()> {
        self.push(Sent::Text {
            chat_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn send_document(
        &self,
        chat_id: ChatId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> signup_bot::Result<()> {
        if self.fail_documents.load(Ordering::SeqCst) {
            return Err(BotError::Api {
                code: Some(400),
                description: "upload rejected".to_string(),
            });
        }
        self.push(Sent::Document {
            chat_id,
            file_name: file_name.to_string(),
            bytes,
        });
        Ok(())
    }

    async fn acknowledge_button(&self, callback_id: &str) -> signup_bot::Result<()> {
        self.push(Sent::Ack(callback_id.to_string()));
        Ok(())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: i64) -> signup_bot::Result<()> {
        self.push(Sent::Deleted {
            chat_id,
            message_id,
        });
        Ok(())
    }
}

/// In-memory repository that can be told to fail.
#[derive(Default)]
pub struct MemoryRepository {
    records: Mutex<Vec<Registration>>,
    next_id: AtomicI64,
    fail_saves: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryRepository {
    pub fn records(&self) -> Vec<Registration> {
        self.records.lock().unwrap().clone()
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RegistrationRepository for MemoryRepository {
    async fn init(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn save(&self, registration: NewRegistration) -> StorageResult<Registration> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::other("disk full")));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let saved = Registration::from_new(id, registration, Utc::now());
        self.records.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn list_all(&self) -> StorageResult<Vec<Registration>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::other("locked")));
        }
        let mut records = self.records();
        records.reverse();
        Ok(records)
    }
}

pub struct Harness {
    pub dispatcher: Arc<Dispatcher>,
    pub messenger: Arc<RecordingMessenger>,
    pub repository: Arc<MemoryRepository>,
    pub sessions: Arc<InMemorySessionStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_transcript(Arc::new(TranscriptLog::disabled()))
    }

    pub fn with_transcript(transcript: Arc<TranscriptLog>) -> Self {
        let messenger = Arc::new(RecordingMessenger::default());
        let repository = Arc::new(MemoryRepository::default());
        let sessions = Arc::new(InMemorySessionStore::new());
        let gate = ExportGate::new("", PASSWORD_DIGEST).unwrap();
        let dispatcher = Dispatcher::new(
            sessions.clone(),
            repository.clone(),
            messenger.clone(),
            Arc::new(XlsxExportRenderer::default()),
            gate,
        )
        .with_transcript(transcript);

        Self {
            dispatcher: Arc::new(dispatcher),
            messenger,
            repository,
            sessions,
        }
    }

    pub async fn text(&self, chat_id: i64, text: &str) {
        self.dispatcher
            .handle(InboundEvent::text(ChatId(chat_id), Some("ali_h".to_string()), text))
            .await;
    }

    pub async fn button(&self, chat_id: i64, data: &str) {
        self.dispatcher
            .handle(InboundEvent::button(ChatId(chat_id), Some("ali_h".to_string()), data))
            .await;
    }

    /// Drive a chat from /start up to the confirmation step.
    pub async fn fill_form(&self, chat_id: i64) {
        self.text(chat_id, "/start").await;
        self.text(chat_id, "Ali Hosseini").await;
        self.text(chat_id, "09123456789").await;
        self.button(chat_id, "companions_2").await;
        self.button(chat_id, "major_کامپیوتر").await;
        self.text(chat_id, "4001234567").await;
        self.text(chat_id, "123456").await;
    }
}
