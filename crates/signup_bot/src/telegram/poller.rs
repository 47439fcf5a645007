use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::client::TelegramClient;
use super::types::Update;
use crate::router::ChatRouter;

const ERROR_BACKOFF: Duration = Duration::from_secs(3);

/// Long-polls `getUpdates` and feeds every usable update to the router.
pub struct UpdatePoller {
    client: Arc<TelegramClient>,
    router: Arc<ChatRouter>,
    timeout: Duration,
    offset: i64,
}

impl UpdatePoller {
    pub fn new(client: Arc<TelegramClient>, router: Arc<ChatRouter>, timeout: Duration) -> Self {
        Self {
            client,
            router,
            timeout,
            offset: 0,
        }
    }

    /// Poll until `shutdown` is cancelled.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        tracing::info!("Polling for updates");
        loop {
            let poll = tokio::select! {
                _ = shutdown.cancelled() => break,
                poll = self.client.get_updates(self.offset, self.timeout) => poll,
            };

            match poll {
                Ok(updates) => self.dispatch(updates),
                Err(error) => {
                    tracing::error!("Failed to fetch updates: {}", error);
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(ERROR_BACKOFF) => {}
                    }
                }
            }
        }
        tracing::info!("Update polling stopped");
    }

    /// Route a batch and move the offset past it.
    pub fn dispatch(&mut self, updates: Vec<Update>) {
        for update in updates {
            self.offset = self.offset.max(update.update_id + 1);
            let update_id = update.update_id;
            match update.into_event() {
                Some(event) => self.router.route(event),
                None => tracing::debug!(update_id, "skipping update"),
            }
        }
    }
}
