//! Per-chat routing of inbound events.
//!
//! Every chat gets its own worker task fed by an unbounded channel. Events of
//! one chat are handled one at a time in arrival order; different chats are
//! handled in parallel. A worker whose queue stays empty for the idle timeout
//! removes itself; the next event for that chat starts a new one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use signup_core::ChatId;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::dispatcher::Dispatcher;
use crate::event::InboundEvent;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

struct ChatWorker {
    id: u64,
    sender: mpsc::UnboundedSender<InboundEvent>,
    handle: JoinHandle<()>,
}

pub struct ChatRouter {
    dispatcher: Arc<Dispatcher>,
    workers: Arc<DashMap<ChatId, ChatWorker>>,
    idle_timeout: Duration,
    next_worker_id: AtomicU64,
}

impl ChatRouter {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            workers: Arc::new(DashMap::new()),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            next_worker_id: AtomicU64::new(0),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Hand an event to the worker of its chat, starting one if needed.
    pub fn route(&self, event: InboundEvent) {
        let chat_id = event.chat_id;
        let mut worker = self
            .workers
            .entry(chat_id)
            .or_insert_with(|| self.spawn_worker(chat_id));

        if let Err(mpsc::error::SendError(event)) = worker.sender.send(event) {
            // The worker died (a panic inside dispatch); replace it.
            tracing::warn!(%chat_id, "chat worker gone, restarting it");
            *worker = self.spawn_worker(chat_id);
            if worker.sender.send(event).is_err() {
                tracing::error!(%chat_id, "dropping event, chat worker unavailable");
            }
        }
    }

    pub fn active_chats(&self) -> usize {
        self.workers.len()
    }

    /// Stop accepting events and wait for every queued event to be handled.
    pub async fn shutdown(&self) {
        let chat_ids: Vec<ChatId> = self.workers.iter().map(|entry| *entry.key()).collect();
        for chat_id in chat_ids {
            if let Some((_, worker)) = self.workers.remove(&chat_id) {
                drop(worker.sender);
                if let Err(error) = worker.handle.await {
                    tracing::warn!(%chat_id, "chat worker ended abnormally: {}", error);
                }
            }
        }
    }

    fn spawn_worker(&self, chat_id: ChatId) -> ChatWorker {
        let (sender, mut receiver) = mpsc::unbounded_channel::<InboundEvent>();
        let id = self.next_worker_id.fetch_add(1, Ordering::Relaxed);
        let dispatcher = Arc::clone(&self.dispatcher);
        let workers = Arc::clone(&self.workers);
        let idle_timeout = self.idle_timeout;

        let handle = tokio::spawn(async move {
            tracing::debug!(%chat_id, "chat worker started");
            loop {
                match tokio::time::timeout(idle_timeout, receiver.recv()).await {
                    Ok(Some(event)) => dispatcher.handle(event).await,
                    Ok(None) => break,
                    Err(_) => {
                        // `route` sends under the same entry lock, so an
                        // empty queue here stays empty once removed.
                        let retired = workers
                            .remove_if(&chat_id, |_, worker| {
                                worker.id == id && receiver.is_empty()
                            })
                            .is_some();
                        if retired {
                            break;
                        }
                    }
                }
            }
            tracing::debug!(%chat_id, "chat worker stopped");
        });

        ChatWorker { id, sender, handle }
    }
}
