use std::process::ExitCode;
use std::sync::Arc;

use zararz_core::{Category, HttpClient, Settings};

use crate::cli::ShowArgs;
use crate::error::CliError;

/// Prints the reply the bot would send for a category.
/// Exits with 3 when only the no-data fallback could be produced.
pub async fn run(
    settings: &Settings,
    http_client: Arc<dyn HttpClient>,
    args: &ShowArgs,
) -> Result<ExitCode, CliError> {
    let pipeline = super::price_pipeline(settings, http_client);
    let report = pipeline.report(Category::from(args.category)).await;

    println!("{}", report.text());

    if report.is_ready() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(3))
    }
}
