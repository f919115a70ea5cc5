//! Terminal rendering of stored forecasts for the `show` command.

use crate::store::forecast_store::ForecastSummary;
use crate::types::forecast_record::StoredForecast;
use tabled::{Style, Table, Tabled};

#[derive(Tabled)]
struct ForecastRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Fetched")]
    fetched_at: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Min °C")]
    min_temp: String,
    #[tabled(rename = "Max °C")]
    max_temp: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&StoredForecast> for ForecastRow {
    fn from(row: &StoredForecast) -> Self {
        let record = &row.record;
        ForecastRow {
            id: row.id,
            fetched_at: row.fetched_at.format("%Y-%m-%d %H:%M").to_string(),
            location: record.location.clone(),
            date: record.date.clone().unwrap_or_default(),
            min_temp: format_temp(record.min_temp),
            max_temp: format_temp(record.max_temp),
            description: record.description.clone().unwrap_or_default(),
        }
    }
}

fn format_temp(value: Option<f64>) -> String {
    value.map(|t| format!("{t:.1}")).unwrap_or_else(|| "-".to_string())
}

/// Renders `rows` as a table, or a short notice when there are none.
pub fn render_table(rows: &[StoredForecast]) -> String {
    if rows.is_empty() {
        return "No stored forecasts match.".to_string();
    }
    let table_rows: Vec<ForecastRow> = rows.iter().map(ForecastRow::from).collect();
    Table::new(table_rows).with(Style::modern()).to_string()
}

/// One-line digest of a [`ForecastSummary`].
pub fn render_summary(summary: &ForecastSummary) -> String {
    let mean = summary
        .mean_max_temp
        .map(|t| format!("{t:.1} °C"))
        .unwrap_or_else(|| "n/a".to_string());
    let span = match (&summary.first_date, &summary.last_date) {
        (Some(first), Some(last)) if first == last => first.clone(),
        (Some(first), Some(last)) => format!("{first} .. {last}"),
        _ => "n/a".to_string(),
    };
    format!(
        "{} rows, mean max temperature {}, dates {}",
        summary.rows, mean, span
    )
}
