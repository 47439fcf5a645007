//! Inbound events as handed over by the transport.

use signup_core::ChatId;

pub const START_COMMAND: &str = "/start";
pub const EXPORT_COMMAND: &str = "/get_users";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundPayload {
    /// A typed message.
    Text(String),

    /// A click on an inline button. `callback_id` and `message_id` let the
    /// transport acknowledge the click and remove the keyboard afterwards.
    Button {
        data: String,
        callback_id: Option<String>,
        message_id: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub chat_id: ChatId,
    /// Username of whoever sent the event, if they have one.
    pub sender: Option<String>,
    pub payload: InboundPayload,
}

impl InboundEvent {
    pub fn text(chat_id: ChatId, sender: Option<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            sender,
            payload: InboundPayload::Text(text.into()),
        }
    }

    pub fn button(chat_id: ChatId, sender: Option<String>, data: impl Into<String>) -> Self {
        Self {
            chat_id,
            sender,
            payload: InboundPayload::Button {
                data: data.into(),
                callback_id: None,
                message_id: None,
            },
        }
    }

    pub fn with_callback(mut self, callback_id: impl Into<String>, message_id: Option<i64>) -> Self {
        if let InboundPayload::Button {
            callback_id: ref mut id,
            message_id: ref mut message,
            ..
        } = self.payload
        {
            *id = Some(callback_id.into());
            *message = message_id;
        }
        self
    }
}
