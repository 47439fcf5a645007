//! Telegram front end for the graduation signup form.
//!
//! Inbound updates are polled from the Bot API, routed to one worker per chat
//! and handled by the [`Dispatcher`], which drives the form state machine and
//! the password-gated export.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod export_gate;
pub mod logging;
pub mod messenger;
pub mod router;
pub mod telegram;

pub use config::{BotConfig, Cli};
pub use dispatcher::Dispatcher;
pub use error::{BotError, Result};
pub use event::{InboundEvent, InboundPayload, EXPORT_COMMAND, START_COMMAND};
pub use export_gate::{hash_password, ExportGate, GateAttempt};
pub use logging::{init_tracing, TranscriptLog};
pub use messenger::Messenger;
pub use router::ChatRouter;
pub use telegram::{TelegramClient, UpdatePoller};
