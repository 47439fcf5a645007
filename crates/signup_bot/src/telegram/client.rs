use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use signup_core::{ChatId, Keyboard};

use super::types::{ApiResponse, InlineKeyboardMarkup, Update};
use crate::error::{BotError, Result};
use crate::messenger::Messenger;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Extra time granted on top of the long-poll timeout before giving up.
const POLL_GRACE: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, api_base, token))
    }

    pub fn with_client(client: Client, api_base: &str, token: &str) -> Self {
        Self {
            client,
            base_url: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Long-poll for updates with ids at or above `offset`.
    pub async fn get_updates(&self, offset: i64, timeout: Duration) -> Result<Vec<Update>> {
        let body = json!({
            "offset": offset,
            "timeout": timeout.as_secs(),
            "allowed_updates": ["message", "callback_query"],
        });
        let response = self
            .client
            .post(self.method_url("getUpdates"))
            .timeout(timeout + POLL_GRACE)
            .json(&body)
            .send()
            .await?;
        Self::unpack(response).await
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> Result<T> {
        let response = self
            .client
            .post(self.method_url(method))
            .timeout(REQUEST_TIMEOUT)
            .json(body)
            .send()
            .await?;
        Self::unpack(response).await
    }

    async fn unpack<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let bytes = response.bytes().await?;
        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes).map_err(|error| {
            if status.is_success() {
                BotError::Serialization(error)
            } else {
                BotError::Api {
                    code: Some(i64::from(status.as_u16())),
                    description: String::from_utf8_lossy(&bytes).into_owned(),
                }
            }
        })?;

        match envelope {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                description,
                error_code,
                ..
            } => Err(BotError::Api {
                code: error_code.or(Some(i64::from(status.as_u16()))),
                description: description.unwrap_or_else(|| "missing result".to_string()),
            }),
        }
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_text(&self, chat_id: ChatId, text: &str, keyboard: Option<&Keyboard>) -> Result<()> {
        let mut body = json!({
            "chat_id": chat_id.0,
            "text": text,
        });
        if let Some(keyboard) = keyboard {
            body["reply_markup"] = serde_json::to_value(InlineKeyboardMarkup::from(keyboard))?;
        }
        let _: Value = self.call("sendMessage", &body).await?;
        Ok(())
    }

    async fn send_document(&self, chat_id: ChatId, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new()
            .text("chat_id", chat_id.0.to_string())
            .part("document", part);

        let response = self
            .client
            .post(self.method_url("sendDocument"))
            .timeout(REQUEST_TIMEOUT)
            .multipart(form)
            .send()
            .await?;
        let _: Value = Self::unpack(response).await?;
        Ok(())
    }

    async fn acknowledge_button(&self, callback_id: &str) -> Result<()> {
        let _: Value = self
            .call("answerCallbackQuery", &json!({ "callback_query_id": callback_id }))
            .await?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: i64) -> Result<()> {
        let _: Value = self
            .call(
                "deleteMessage",
                &json!({ "chat_id": chat_id.0, "message_id": message_id }),
            )
            .await?;
        Ok(())
    }
}
