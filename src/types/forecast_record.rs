//! Defines the flat forecast record produced by the extractor and the row type
//! read back from the snapshot store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One forecast entry for a single location, and optionally a single day.
///
/// Records are built by [`crate::extract`] and handed straight to persistence.
/// Every field except `location` may be absent; temperatures are either a
/// finite Celsius value or `None`, never a placeholder like `0.0`.
///
/// # Examples
///
/// ```
/// use forecast_ingest::ForecastRecord;
///
/// let record = ForecastRecord {
///     location: "Taipei".to_string(),
///     date: Some("2025-01-10".to_string()),
///     description: Some("Cloudy".to_string()),
///     min_temp: Some(14.0),
///     max_temp: Some(19.5),
/// };
/// assert!(!record.is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Human readable place name. Empty when the source omits it.
    pub location: String,
    /// Date token copied verbatim from the feed (never parsed or reformatted).
    pub date: Option<String>,
    /// Free-text weather condition label.
    pub description: Option<String>,
    /// Minimum temperature in °C.
    pub min_temp: Option<f64>,
    /// Maximum temperature in °C.
    pub max_temp: Option<f64>,
}

impl ForecastRecord {
    /// Returns `true` when none of `location`, `description` or `date` carry text.
    ///
    /// Blank records are dropped by every extraction strategy except the
    /// single-object fallback.
    pub fn is_blank(&self) -> bool {
        self.location.is_empty()
            && self.description.as_deref().map_or(true, str::is_empty)
            && self.date.as_deref().map_or(true, str::is_empty)
    }
}

/// A forecast row as stored in the snapshot table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredForecast {
    /// Autoincrement row id; insertion order.
    pub id: i64,
    /// Time the ingestion run that wrote this row started.
    pub fetched_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: ForecastRecord,
}
