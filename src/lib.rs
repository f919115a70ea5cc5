mod display;
mod error;
mod extraction;
mod feed;
mod pipeline;
mod store;
mod types;

pub use error::ForecastError;
pub use pipeline::*;

pub use extraction::extractor::{extract, extract_traced, Extraction};
pub use extraction::strategy::Strategy;

pub use feed::client::FeedClient;
pub use feed::config::*;
pub use feed::error::FeedError;

pub use store::error::StoreError;
pub use store::filter::ForecastFilter;
pub use store::forecast_store::{ForecastStore, ForecastSummary, DEFAULT_STORE_PATH};

pub use display::{render_summary, render_table};
pub use types::forecast_record::{ForecastRecord, StoredForecast};
