//! Pipeline observation hooks.
//!
//! The fetch/extract/format pipeline reports what happened through a
//! [`PipelineObserver`] it is handed at construction, instead of writing to
//! a process-wide logger itself. [`TracingObserver`] forwards events to
//! `tracing` at the severity of each outcome class.

use std::sync::Mutex;

use crate::category::Category;
use crate::error::{ExtractError, FetchError};
use crate::price::PriceValue;

pub trait PipelineObserver: Send + Sync {
    fn fetch_succeeded(&self, url: &str);

    fn fetch_failed(&self, error: &FetchError);

    fn category_unavailable(&self, category: Category, error: &ExtractError);

    fn price_unparsed(&self, category: Category, name: &str, value: &PriceValue);
}

/// Emits pipeline events as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn fetch_succeeded(&self, url: &str) {
        tracing::info!(url, "API data successfully fetched");
    }

    fn fetch_failed(&self, error: &FetchError) {
        match error {
            FetchError::Network(_) => tracing::warn!(code = error.code(), "{error}"),
            FetchError::ConfigurationMissing | FetchError::Unexpected(_) => {
                tracing::error!(code = error.code(), "{error}")
            }
        }
    }

    fn category_unavailable(&self, category: Category, error: &ExtractError) {
        tracing::error!(category = category.key(), "{error}");
    }

    fn price_unparsed(&self, category: Category, name: &str, value: &PriceValue) {
        tracing::warn!(category = category.key(), "invalid price format for {name}: {value}");
    }
}

/// One recorded pipeline event.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    FetchSucceeded { url: String },
    FetchFailed(FetchError),
    CategoryUnavailable(Category, ExtractError),
    PriceUnparsed {
        category: Category,
        name: String,
        value: PriceValue,
    },
}

/// Observer that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: PipelineEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl PipelineObserver for RecordingObserver {
    fn fetch_succeeded(&self, url: &str) {
        self.push(PipelineEvent::FetchSucceeded {
            url: url.to_owned(),
        });
    }

    fn fetch_failed(&self, error: &FetchError) {
        self.push(PipelineEvent::FetchFailed(error.clone()));
    }

    fn category_unavailable(&self, category: Category, error: &ExtractError) {
        self.push(PipelineEvent::CategoryUnavailable(category, error.clone()));
    }

    fn price_unparsed(&self, category: Category, name: &str, value: &PriceValue) {
        self.push(PipelineEvent::PriceUnparsed {
            category,
            name: name.to_owned(),
            value: value.clone(),
        });
    }
}
