//! One ingestion run: fetch the feed, extract records, append them as a snapshot.

use crate::error::ForecastError;
use crate::extraction::extractor::{extract_traced, Extraction};
use crate::extraction::strategy::Strategy;
use crate::feed::client::FeedClient;
use crate::store::error::StoreError;
use crate::store::forecast_store::ForecastStore;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::path::PathBuf;
use tokio::task;

/// Outcome of a successful [`ingest`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    /// Strategy that matched the document, `None` if nothing did.
    pub strategy: Option<Strategy>,
    pub inserted: usize,
    /// Timestamp stamped on every row of this snapshot.
    pub fetched_at: DateTime<Utc>,
}

/// Fetches the feed once, extracts it and appends the records to the store at
/// `db_path`.
///
/// A document with no recognisable forecasts is not an error: the run
/// succeeds with `inserted == 0`. Fetch and store failures abort the run and
/// leave previously stored snapshots untouched.
pub async fn ingest(
    client: &FeedClient,
    db_path: impl Into<PathBuf>,
) -> Result<IngestReport, ForecastError> {
    let document = client.fetch_document().await?;
    let fetched_at = Utc::now();

    let Extraction { strategy, records } = extract_traced(&document);
    match strategy {
        Some(strategy) => info!(
            "Extracted {} forecast records using strategy '{}'",
            records.len(),
            strategy
        ),
        None => warn!("No forecast records found in feed document"),
    }

    let db_path = db_path.into();
    let inserted = task::spawn_blocking(move || {
        let mut store = ForecastStore::open(&db_path)?;
        store.append(&records, fetched_at)
    })
    .await??;

    Ok(IngestReport {
        strategy,
        inserted,
        fetched_at,
    })
}

/// Creates the store at `db_path` if it does not exist yet.
pub async fn init_store(db_path: impl Into<PathBuf>) -> Result<(), ForecastError> {
    let db_path = db_path.into();
    task::spawn_blocking(move || {
        ForecastStore::open(&db_path)?;
        info!("Forecast store ready at {}", db_path.display());
        Ok::<(), StoreError>(())
    })
    .await??;
    Ok(())
}
