mod bot;
mod show;

use std::process::ExitCode;
use std::sync::Arc;

use zararz_core::{
    HttpClient, PricePipeline, ReqwestHttpClient, Settings, SystemClock, TracingObserver,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let mut settings = Settings::from_env()?;
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }
    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());

    match &cli.command {
        Command::Run(args) => bot::run(&settings, http_client, args).await,
        Command::Show(args) => show::run(&settings, http_client, args).await,
    }
}

fn price_pipeline(settings: &Settings, http_client: Arc<dyn HttpClient>) -> PricePipeline {
    PricePipeline::new(
        settings.fetch.clone(),
        http_client,
        Arc::new(SystemClock::new(settings.utc_offset)),
        Arc::new(TracingObserver),
    )
}
