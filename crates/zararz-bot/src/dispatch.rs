//! Maps incoming chat messages to replies.

use tracing::{debug, info, warn};
use zararz_core::{texts, Category, PricePipeline, Report, UserRecord, UserRegistry};

use crate::telegram::{
    Message, ReplyKeyboardMarkup, SendMessage, TelegramClient, TelegramError, User,
};

pub const GOLD_BUTTON: &str = "قیمت طلا و سکه";
pub const CURRENCY_BUTTON: &str = "نرخ ارز";
pub const CRYPTO_BUTTON: &str = "بازار کریپتوکارنسی";
pub const HELP_BUTTON: &str = "راهنمایی";
pub const ABOUT_BUTTON: &str = "درباره ما";
pub const CONTACT_BUTTON: &str = "تماس با ما";

/// What the bot does for one text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Prices(Category),
    Help,
    About,
    Contact,
    Hint,
}

impl Action {
    pub fn from_text(text: &str) -> Self {
        if let Some(command) = command_name(text) {
            return match command {
                "start" => Self::Start,
                "help" => Self::Help,
                "about" => Self::About,
                "contact" => Self::Contact,
                _ => Self::Hint,
            };
        }

        match text {
            GOLD_BUTTON => Self::Prices(Category::Gold),
            CURRENCY_BUTTON => Self::Prices(Category::Currency),
            CRYPTO_BUTTON => Self::Prices(Category::Cryptocurrency),
            HELP_BUTTON => Self::Help,
            ABOUT_BUTTON => Self::About,
            CONTACT_BUTTON => Self::Contact,
            _ => Self::Hint,
        }
    }
}

/// `/start@zararz_bot payload` -> `start`.
fn command_name(text: &str) -> Option<&str> {
    let token = text.strip_prefix('/')?.split_whitespace().next()?;
    let name = token.split_once('@').map_or(token, |(name, _)| name);
    (!name.is_empty()).then_some(name)
}

pub fn main_keyboard() -> ReplyKeyboardMarkup {
    ReplyKeyboardMarkup::new(&[
        &[CURRENCY_BUTTON, GOLD_BUTTON],
        &[HELP_BUTTON, CRYPTO_BUTTON],
    ])
    .with_placeholder(texts::KEYBOARD_PLACEHOLDER)
}

fn user_record(user: &User) -> UserRecord {
    UserRecord {
        id: user.id,
        first_name: user.first_name.clone().unwrap_or_default(),
        last_name: user.last_name.clone().unwrap_or_default(),
        username: user.username.clone().unwrap_or_default(),
    }
}

pub struct Dispatcher {
    telegram: TelegramClient,
    pipeline: PricePipeline,
    registry: UserRegistry,
}

impl Dispatcher {
    pub fn new(telegram: TelegramClient, pipeline: PricePipeline, registry: UserRegistry) -> Self {
        Self {
            telegram,
            pipeline,
            registry,
        }
    }

    /// Handles one message to completion. Non-text messages are ignored.
    pub async fn handle(&self, message: &Message) -> Result<(), TelegramError> {
        let Some(text) = message.text.as_deref() else {
            debug!(chat_id = message.chat.id, "ignoring non-text message");
            return Ok(());
        };
        let chat_id = message.chat.id;
        let action = Action::from_text(text);
        debug!(chat_id, ?action, "dispatching message");

        match action {
            Action::Start => {
                if let Some(user) = &message.from {
                    self.register(user);
                }
                self.telegram.send_typing(chat_id).await?;
                let reply = SendMessage::new(chat_id, texts::START)
                    .html()
                    .with_keyboard(main_keyboard());
                self.telegram.send_message(&reply).await
            }
            Action::Prices(category) => match self.pipeline.report(category).await {
                Report::Ready(text) => {
                    self.telegram.send_typing(chat_id).await?;
                    self.telegram
                        .send_message(&SendMessage::new(chat_id, text).html())
                        .await
                }
                Report::NoData => {
                    self.telegram
                        .send_message(&SendMessage::new(chat_id, texts::NO_DATA))
                        .await
                }
            },
            Action::Help => self.reply_typed(chat_id, texts::HELP).await,
            Action::About => self.reply_typed(chat_id, texts::ABOUT).await,
            Action::Contact => self.reply_typed(chat_id, texts::CONTACT).await,
            Action::Hint => {
                self.telegram
                    .send_message(&SendMessage::new(chat_id, texts::HINT))
                    .await
            }
        }
    }

    async fn reply_typed(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        self.telegram.send_typing(chat_id).await?;
        self.telegram
            .send_message(&SendMessage::new(chat_id, text))
            .await
    }

    fn register(&self, user: &User) {
        match self.registry.register(user_record(user)) {
            Ok(true) => info!(user_id = user.id, "registered new user"),
            Ok(false) => {}
            Err(error) => warn!(
                user_id = user.id,
                path = %self.registry.path().display(),
                "failed to record user: {error}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::{Arc, Mutex};

    use serde_json::{json, Value};
    use tempfile::tempdir;
    use zararz_core::{
        FetchSettings, FixedClock, HttpClient, HttpError, HttpRequest, HttpResponse,
        RecordingObserver,
    };

    use super::*;
    use crate::telegram::Chat;

    /// Answers feed requests with a fixed body and records Telegram calls.
    struct FakeNetwork {
        feed: Value,
        telegram_calls: Mutex<Vec<(String, Value)>>,
    }

    impl FakeNetwork {
        fn new(feed: Value) -> Arc<Self> {
            Arc::new(Self {
                feed,
                telegram_calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, Value)> {
            self.telegram_calls.lock().expect("not poisoned").clone()
        }

        fn methods(&self) -> Vec<String> {
            self.calls().into_iter().map(|(method, _)| method).collect()
        }

        fn last_message(&self) -> Value {
            self.calls()
                .into_iter()
                .rev()
                .find(|(method, _)| method == "sendMessage")
                .map(|(_, body)| body)
                .expect("a message was sent")
        }
    }

    impl HttpClient for FakeNetwork {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            let response = if request.url.starts_with("https://tg.test/") {
                let method = request.url.rsplit('/').next().unwrap_or_default().to_owned();
                let body = request
                    .body
                    .as_deref()
                    .map(|raw| serde_json::from_str(raw).expect("json payload"))
                    .unwrap_or(Value::Null);
                self.telegram_calls
                    .lock()
                    .expect("not poisoned")
                    .push((method, body));
                HttpResponse::ok_json(json!({"ok": true, "result": true}).to_string())
            } else {
                HttpResponse::ok_json(self.feed.to_string())
            };
            Box::pin(async move { Ok(response) })
        }
    }

    fn dispatcher(feed: Value, data_dir: &std::path::Path) -> (Dispatcher, Arc<FakeNetwork>) {
        let network = FakeNetwork::new(feed);
        let now = time::OffsetDateTime::UNIX_EPOCH;
        let pipeline = PricePipeline::new(
            FetchSettings::with_url("https://prices.test/api"),
            network.clone(),
            Arc::new(FixedClock(now)),
            Arc::new(RecordingObserver::new()),
        );
        let telegram = TelegramClient::with_api_base(network.clone(), "https://tg.test", "TOKEN");
        (
            Dispatcher::new(telegram, pipeline, UserRegistry::in_dir(data_dir)),
            network,
        )
    }

    fn text_message(text: &str) -> Message {
        Message {
            chat: Chat { id: 77 },
            from: Some(User {
                id: 501,
                first_name: Some(String::from("Sara")),
                last_name: None,
                username: Some(String::from("sara")),
            }),
            text: Some(text.to_owned()),
        }
    }

    #[test]
    fn recognises_commands_and_buttons() {
        assert_eq!(Action::from_text("/start"), Action::Start);
        assert_eq!(Action::from_text("/start@zararz_bot"), Action::Start);
        assert_eq!(Action::from_text("/help extra"), Action::Help);
        assert_eq!(Action::from_text(HELP_BUTTON), Action::Help);
        assert_eq!(Action::from_text("/about"), Action::About);
        assert_eq!(Action::from_text(ABOUT_BUTTON), Action::About);
        assert_eq!(Action::from_text("/contact"), Action::Contact);
        assert_eq!(Action::from_text(CONTACT_BUTTON), Action::Contact);
        assert_eq!(Action::from_text(GOLD_BUTTON), Action::Prices(Category::Gold));
        assert_eq!(Action::from_text(CURRENCY_BUTTON), Action::Prices(Category::Currency));
        assert_eq!(
            Action::from_text(CRYPTO_BUTTON),
            Action::Prices(Category::Cryptocurrency)
        );
    }

    #[test]
    fn unknown_text_gets_the_hint() {
        assert_eq!(Action::from_text("سلام"), Action::Hint);
        assert_eq!(Action::from_text("/prices"), Action::Hint);
        assert_eq!(Action::from_text("/"), Action::Hint);
        assert_eq!(Action::from_text(" قیمت طلا و سکه"), Action::Hint);
    }

    #[test]
    fn keyboard_has_two_rows_of_two() {
        let keyboard = serde_json::to_value(main_keyboard()).expect("serializable");

        assert_eq!(
            keyboard["keyboard"],
            json!([
                [{"text": CURRENCY_BUTTON}, {"text": GOLD_BUTTON}],
                [{"text": HELP_BUTTON}, {"text": CRYPTO_BUTTON}]
            ])
        );
        assert_eq!(keyboard["input_field_placeholder"], texts::KEYBOARD_PLACEHOLDER);
    }

    #[tokio::test]
    async fn start_registers_user_and_sends_keyboard() {
        // Given: A first-time user
        let dir = tempdir().expect("tempdir");
        let (dispatcher, network) = dispatcher(json!({}), dir.path());

        // When: They send /start
        dispatcher.handle(&text_message("/start")).await.expect("handled");

        // Then: They are recorded and greeted with the keyboard
        let users = UserRegistry::in_dir(dir.path()).load().expect("load");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 501);
        assert_eq!(users[0].last_name, "");
        assert_eq!(network.methods(), vec!["sendChatAction", "sendMessage"]);
        let reply = network.last_message();
        assert_eq!(reply["text"], texts::START);
        assert_eq!(reply["parse_mode"], "HTML");
        assert!(reply["reply_markup"]["keyboard"].is_array());
    }

    #[tokio::test]
    async fn registry_failure_does_not_block_the_welcome() {
        // Given: A data directory path occupied by a regular file
        let dir = tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").expect("seed file");
        let (dispatcher, network) = dispatcher(json!({}), &blocker);

        // When: A user sends /start
        dispatcher.handle(&text_message("/start")).await.expect("handled");

        // Then: The welcome is still sent
        assert_eq!(network.last_message()["text"], texts::START);
    }

    #[tokio::test]
    async fn price_button_sends_the_html_report() {
        let dir = tempdir().expect("tempdir");
        let feed = json!({"gold": [{"name": "سکه امامی", "price": 80000000}]});
        let (dispatcher, network) = dispatcher(feed, dir.path());

        dispatcher.handle(&text_message(GOLD_BUTTON)).await.expect("handled");

        assert_eq!(network.methods(), vec!["sendChatAction", "sendMessage"]);
        let reply = network.last_message();
        assert_eq!(reply["parse_mode"], "HTML");
        assert!(reply["text"]
            .as_str()
            .expect("text")
            .ends_with("- سکه امامی: 80,000,000 \n"));
    }

    #[tokio::test]
    async fn empty_category_sends_the_plain_fallback() {
        let dir = tempdir().expect("tempdir");
        let (dispatcher, network) = dispatcher(json!({"gold": []}), dir.path());

        dispatcher.handle(&text_message(CRYPTO_BUTTON)).await.expect("handled");

        assert_eq!(network.methods(), vec!["sendMessage"]);
        let reply = network.last_message();
        assert_eq!(reply["text"], texts::NO_DATA);
        assert!(reply.get("parse_mode").is_none());
    }

    #[tokio::test]
    async fn unknown_text_sends_hint_without_typing() {
        let dir = tempdir().expect("tempdir");
        let (dispatcher, network) = dispatcher(json!({}), dir.path());

        dispatcher.handle(&text_message("hello")).await.expect("handled");

        assert_eq!(network.methods(), vec!["sendMessage"]);
        assert_eq!(network.last_message()["text"], texts::HINT);
    }

    #[tokio::test]
    async fn non_text_messages_are_ignored() {
        let dir = tempdir().expect("tempdir");
        let (dispatcher, network) = dispatcher(json!({}), dir.path());
        let mut message = text_message("");
        message.text = None;

        dispatcher.handle(&message).await.expect("handled");

        assert!(network.calls().is_empty());
    }
}
