//! # Zararz Core
//!
//! Fetches the gold, currency and cryptocurrency price feed, normalizes each
//! category into a name→price map and renders it as a chat report.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`category`] | Category identifiers and per-category report rules |
//! | [`config`] | Environment configuration |
//! | [`error`] | Error types |
//! | [`extract`] | Category extraction and the tri-state outcome |
//! | [`fetch`] | Upstream fetch client |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`jalali`] | Jalali calendar and clocks |
//! | [`observer`] | Pipeline event reporting |
//! | [`pipeline`] | Fetch → extract → format |
//! | [`price`] | Price values, price maps and number formatting |
//! | [`report`] | Report rendering |
//! | [`texts`] | Static reply texts |
//! | [`users`] | User registry file |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use zararz_core::{Category, PricePipeline, ReqwestHttpClient, Settings, SystemClock, TracingObserver};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env()?;
//!     let pipeline = PricePipeline::new(
//!         settings.fetch,
//!         Arc::new(ReqwestHttpClient::new()),
//!         Arc::new(SystemClock::new(settings.utc_offset)),
//!         Arc::new(TracingObserver),
//!     );
//!
//!     println!("{}", pipeline.report(Category::Gold).await.text());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ Delivery (bot)  │
//! └────────┬────────┘
//!          │ Category
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ PricePipeline   │────▶│ FetchClient      │──▶ HttpClient
//! └────────┬────────┘     └──────────────────┘
//!          │ Extraction
//!          ▼
//! ┌─────────────────┐
//! │ ReportFormatter │──▶ Report
//! └─────────────────┘
//! ```

pub mod category;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod http_client;
pub mod jalali;
pub mod observer;
pub mod pipeline;
pub mod price;
pub mod report;
pub mod texts;
pub mod users;

pub use category::{Category, CategoryProfile, PriceStyle};
pub use config::{FetchSettings, Settings};
pub use error::{ConfigError, ExtractError, FetchError, RegistryError};
pub use extract::{extract_prices, Extraction};
pub use fetch::FetchClient;
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};
pub use jalali::{Clock, FixedClock, JalaliDate, JalaliStamp, SystemClock};
pub use observer::{PipelineEvent, PipelineObserver, RecordingObserver, TracingObserver};
pub use pipeline::{PricePipeline, Report};
pub use price::{PriceMap, PriceValue, RenderedPrice};
pub use report::ReportFormatter;
pub use users::{UserRecord, UserRegistry};
