//! Minimal Telegram Bot API client over the core HTTP transport.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zararz_core::{HttpClient, HttpError, HttpRequest};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

const SEND_TIMEOUT: Duration = Duration::from_secs(10);
/// Extra time granted to the HTTP request on top of the long-poll timeout.
const POLL_GRACE: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("telegram transport error: {0}")]
    Transport(#[from] HttpError),
    #[error("telegram returned status {status}: {description}")]
    Status { status: u16, description: String },
    #[error("telegram rejected {method}: {description}")]
    Api {
        method: &'static str,
        description: String,
    },
    #[error("telegram response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_field_placeholder: Option<String>,
}

impl ReplyKeyboardMarkup {
    pub fn new(rows: &[&[&str]]) -> Self {
        Self {
            keyboard: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|text| KeyboardButton {
                            text: (*text).to_owned(),
                        })
                        .collect()
                })
                .collect(),
            resize_keyboard: true,
            input_field_placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.input_field_placeholder = Some(placeholder.into());
        self
    }
}

/// An outgoing text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMessage {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyKeyboardMarkup>,
}

impl SendMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
            reply_markup: None,
        }
    }

    pub fn html(mut self) -> Self {
        self.parse_mode = Some(ParseMode::Html);
        self
    }

    pub fn with_keyboard(mut self, keyboard: ReplyKeyboardMarkup) -> Self {
        self.reply_markup = Some(keyboard);
        self
    }
}

#[derive(Debug, Serialize)]
struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: [&'static str; 1],
}

#[derive(Debug, Serialize)]
struct SendChatAction {
    chat_id: i64,
    action: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramClient {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
}

impl TelegramClient {
    pub fn new(http_client: Arc<dyn HttpClient>, token: &str) -> Self {
        Self::with_api_base(http_client, DEFAULT_API_BASE, token)
    }

    pub fn with_api_base(http_client: Arc<dyn HttpClient>, api_base: &str, token: &str) -> Self {
        Self {
            http_client,
            base_url: format!("{}/bot{token}", api_base.trim_end_matches('/')),
        }
    }

    /// Returns the bot's own account; fails fast on a bad token.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({}), SEND_TIMEOUT)
            .await?
            .ok_or(TelegramError::Api {
                method: "getMe",
                description: String::from("empty result"),
            })
    }

    /// Long-polls for message updates after `offset`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let payload = GetUpdates {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: ["message"],
        };
        let updates = self
            .call("getUpdates", &payload, timeout + POLL_GRACE)
            .await?;
        Ok(updates.unwrap_or_default())
    }

    pub async fn send_message(&self, message: &SendMessage) -> Result<(), TelegramError> {
        self.call::<_, serde_json::Value>("sendMessage", message, SEND_TIMEOUT)
            .await
            .map(|_| ())
    }

    pub async fn send_typing(&self, chat_id: i64) -> Result<(), TelegramError> {
        let payload = SendChatAction {
            chat_id,
            action: "typing",
        };
        self.call::<_, serde_json::Value>("sendChatAction", &payload, SEND_TIMEOUT)
            .await
            .map(|_| ())
    }

    async fn call<P, R>(
        &self,
        method: &'static str,
        payload: &P,
        timeout: Duration,
    ) -> Result<Option<R>, TelegramError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = HttpRequest::post(format!("{}/{method}", self.base_url))
            .with_json_body(serde_json::to_string(payload)?)
            .with_timeout(timeout);

        let response = self.http_client.execute(request).await?;
        let decoded: Result<ApiResponse<R>, _> = serde_json::from_str(&response.body);

        if !response.is_success() {
            let description = decoded
                .ok()
                .and_then(|body| body.description)
                .unwrap_or_else(|| response.body.clone());
            return Err(TelegramError::Status {
                status: response.status,
                description,
            });
        }

        let body = decoded?;
        if !body.ok {
            return Err(TelegramError::Api {
                method,
                description: body.description.unwrap_or_default(),
            });
        }
        Ok(body.result)
    }
}
