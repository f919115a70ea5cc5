//! Append-only SQLite storage of forecast snapshots.

use crate::store::error::StoreError;
use crate::store::filter::ForecastFilter;
use crate::types::forecast_record::{ForecastRecord, StoredForecast};
use chrono::{DateTime, Utc};
use log::info;
use rusqlite::{params, params_from_iter, Connection};
use std::fs;
use std::path::Path;

/// Default database file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "data.db";
pub const TABLE: &str = "forecasts";

const SCHEMA_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS forecasts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        fetched_at TEXT NOT NULL,
        location TEXT NOT NULL,
        date TEXT,
        min_temp REAL,
        max_temp REAL,
        description TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_forecasts_location_date ON forecasts(location, date);
"#;

const SELECT_COLUMNS: &str = "id, fetched_at, location, date, min_temp, max_temp, description";

/// Aggregate view over the rows matching a filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastSummary {
    pub rows: usize,
    /// Mean of the non-null maximum temperatures.
    pub mean_max_temp: Option<f64>,
    /// Smallest non-empty date token.
    pub first_date: Option<String>,
    /// Largest non-empty date token.
    pub last_date: Option<String>,
}

/// Snapshot table of extracted forecasts.
///
/// Rows are only ever inserted. Running the same ingestion twice stores both
/// snapshots, told apart by `fetched_at`.
pub struct ForecastStore {
    conn: Connection,
}

impl ForecastStore {
    /// Opens (creating if needed) the database at `path` and ensures the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::DirCreation(parent.to_path_buf(), e))?;
        }
        let conn = Connection::open(path).map_err(|e| StoreError::Open(path.to_path_buf(), e))?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Open(":memory:".into(), e))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_SQL).map_err(StoreError::Schema)?;
        Ok(ForecastStore { conn })
    }

    /// Appends `records` as one transaction stamped with `fetched_at`.
    ///
    /// Returns the number of rows written. Either the whole batch lands or
    /// none of it does.
    pub fn append(
        &mut self,
        records: &[ForecastRecord],
        fetched_at: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }
        let count = records.len();
        let append_err = |source: rusqlite::Error| StoreError::Append { count, source };

        let tx = self.conn.transaction().map_err(append_err)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO forecasts (fetched_at, location, date, min_temp, max_temp, description)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .map_err(append_err)?;
            for record in records {
                stmt.execute(params![
                    fetched_at,
                    record.location,
                    record.date,
                    record.min_temp,
                    record.max_temp,
                    record.description,
                ])
                .map_err(append_err)?;
            }
        }
        tx.commit().map_err(append_err)?;

        info!("Appended {} rows to {}", count, TABLE);
        Ok(count)
    }

    /// Rows matching `filter`, oldest first.
    pub fn query(&self, filter: &ForecastFilter) -> Result<Vec<StoredForecast>, StoreError> {
        let (clause, values) = filter.where_clause();
        let mut sql = format!("SELECT {SELECT_COLUMNS} FROM {TABLE}{clause} ORDER BY id");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut stmt = self.conn.prepare(&sql).map_err(StoreError::Query)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), Self::row_to_forecast)
            .map_err(StoreError::Query)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::Query)?;
        Ok(rows)
    }

    /// Count, mean max temperature and date span of the rows matching `filter`.
    pub fn summary(&self, filter: &ForecastFilter) -> Result<ForecastSummary, StoreError> {
        let (clause, values) = filter.where_clause();
        let sql = format!(
            "SELECT COUNT(*), AVG(max_temp), MIN(NULLIF(date, '')), MAX(NULLIF(date, ''))
             FROM {TABLE}{clause}"
        );
        self.conn
            .query_row(&sql, params_from_iter(values.iter()), |row| {
                Ok(ForecastSummary {
                    rows: row.get::<_, i64>(0)? as usize,
                    mean_max_temp: row.get(1)?,
                    first_date: row.get(2)?,
                    last_date: row.get(3)?,
                })
            })
            .map_err(StoreError::Query)
    }

    /// Distinct location names, sorted.
    pub fn locations(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT DISTINCT location FROM {TABLE} ORDER BY location"))
            .map_err(StoreError::Query)?;
        let locations = stmt
            .query_map([], |row| row.get(0))
            .map_err(StoreError::Query)?
            .collect::<Result<Vec<String>, _>>()
            .map_err(StoreError::Query)?;
        Ok(locations)
    }

    fn row_to_forecast(row: &rusqlite::Row) -> rusqlite::Result<StoredForecast> {
        Ok(StoredForecast {
            id: row.get(0)?,
            fetched_at: row.get(1)?,
            record: ForecastRecord {
                location: row.get(2)?,
                date: row.get(3)?,
                min_temp: row.get(4)?,
                max_temp: row.get(5)?,
                description: row.get(6)?,
            },
        })
    }
}
