use std::sync::Arc;

use crate::category::Category;
use crate::config::FetchSettings;
use crate::extract::{classify, Extraction};
use crate::fetch::FetchClient;
use crate::http_client::HttpClient;
use crate::jalali::Clock;
use crate::observer::PipelineObserver;
use crate::report::ReportFormatter;
use crate::texts;

/// What the delivery layer should send for a category request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Ready(String),
    /// No prices could be produced; the generic retry-later text applies.
    NoData,
}

impl Report {
    pub fn text(&self) -> &str {
        match self {
            Self::Ready(text) => text,
            Self::NoData => texts::NO_DATA,
        }
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Fetch → extract → format, one fresh fetch per call.
///
/// The pipeline holds no mutable state and may be shared between tasks.
#[derive(Clone)]
pub struct PricePipeline {
    fetch: FetchClient,
    formatter: ReportFormatter,
    observer: Arc<dyn PipelineObserver>,
}

impl PricePipeline {
    pub fn new(
        settings: FetchSettings,
        http_client: Arc<dyn HttpClient>,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn PipelineObserver>,
    ) -> Self {
        Self {
            fetch: FetchClient::new(settings, http_client, observer.clone()),
            formatter: ReportFormatter::new(clock, observer.clone()),
            observer,
        }
    }

    pub async fn extract(&self, category: Category) -> Extraction {
        let body = match self.fetch.fetch().await {
            Ok(body) => body,
            Err(_) => return Extraction::Unavailable,
        };

        let (extraction, error) = classify(&body, category);
        if let Some(error) = error {
            self.observer.category_unavailable(category, &error);
        }
        extraction
    }

    pub async fn report(&self, category: Category) -> Report {
        match self.extract(category).await {
            Extraction::Prices(prices) => Report::Ready(self.formatter.format(category, &prices)),
            Extraction::Unavailable | Extraction::CategoryEmpty => Report::NoData,
        }
    }
}
