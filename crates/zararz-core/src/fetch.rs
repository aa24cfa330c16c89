use std::sync::Arc;

use serde_json::Value;

use crate::config::FetchSettings;
use crate::error::FetchError;
use crate::http_client::{HttpClient, HttpErrorKind, HttpRequest};
use crate::observer::PipelineObserver;

/// Issues the single upstream GET and parses its JSON body.
///
/// There is no caching and no retry: every call performs one request and
/// every outcome is reported to the observer.
#[derive(Clone)]
pub struct FetchClient {
    settings: FetchSettings,
    http_client: Arc<dyn HttpClient>,
    observer: Arc<dyn PipelineObserver>,
}

impl FetchClient {
    pub fn new(
        settings: FetchSettings,
        http_client: Arc<dyn HttpClient>,
        observer: Arc<dyn PipelineObserver>,
    ) -> Self {
        Self {
            settings,
            http_client,
            observer,
        }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    pub async fn fetch(&self) -> Result<Value, FetchError> {
        let result = self.fetch_inner().await;
        match &result {
            Ok(_) => {
                let url = self.settings.api_url.as_deref().unwrap_or_default();
                self.observer.fetch_succeeded(url);
            }
            Err(error) => self.observer.fetch_failed(error),
        }
        result
    }

    async fn fetch_inner(&self) -> Result<Value, FetchError> {
        let url = self
            .settings
            .api_url
            .as_deref()
            .ok_or(FetchError::ConfigurationMissing)?;

        let request = HttpRequest::get(url)
            .with_header("user-agent", self.settings.user_agent.as_str())
            .with_header("accept", self.settings.accept.as_str())
            .with_timeout(self.settings.timeout);

        let response = self.http_client.execute(request).await.map_err(|e| {
            match e.kind() {
                HttpErrorKind::Timeout | HttpErrorKind::Connect | HttpErrorKind::Other => {
                    FetchError::Network(e.message().to_owned())
                }
                HttpErrorKind::Body => FetchError::Unexpected(e.message().to_owned()),
            }
        })?;

        if !response.is_success() {
            return Err(FetchError::Network(format!(
                "upstream returned status {}",
                response.status
            )));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| FetchError::Unexpected(format!("failed to parse response body: {e}")))
    }
}
