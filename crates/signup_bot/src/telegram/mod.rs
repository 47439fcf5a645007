//! Telegram Bot API transport: HTTP client and long-poll loop.

pub mod client;
pub mod poller;
pub mod types;

pub use client::TelegramClient;
pub use poller::UpdatePoller;
