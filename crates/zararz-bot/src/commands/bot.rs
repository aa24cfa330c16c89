use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use zararz_core::{HttpClient, Settings, UserRegistry};

use crate::cli::RunArgs;
use crate::dispatch::Dispatcher;
use crate::error::CliError;
use crate::telegram::TelegramClient;

const RETRY_PAUSE: Duration = Duration::from_secs(3);

/// Long-polls Telegram and answers updates one at a time until Ctrl-C.
pub async fn run(
    settings: &Settings,
    http_client: Arc<dyn HttpClient>,
    args: &RunArgs,
) -> Result<ExitCode, CliError> {
    let token = settings.require_bot_token()?;
    let telegram = TelegramClient::new(http_client.clone(), token);

    let me = telegram.get_me().await?;
    info!(
        bot_id = me.id,
        username = me.username.as_deref().unwrap_or_default(),
        data_dir = %settings.data_dir.display(),
        "bot started"
    );

    let dispatcher = Dispatcher::new(
        telegram.clone(),
        super::price_pipeline(settings, http_client),
        UserRegistry::in_dir(&settings.data_dir),
    );
    let poll_timeout = Duration::from_secs(args.poll_timeout);
    let mut offset = None;

    loop {
        let polled = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, stopping");
                break;
            }
            polled = telegram.get_updates(offset, poll_timeout) => polled,
        };

        let updates = match polled {
            Ok(updates) => updates,
            Err(error) => {
                warn!("polling failed: {error}");
                tokio::time::sleep(RETRY_PAUSE).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            let Some(message) = update.message else {
                continue;
            };
            if let Err(error) = dispatcher.handle(&message).await {
                warn!(
                    update_id = update.update_id,
                    chat_id = message.chat.id,
                    "failed to answer: {error}"
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
