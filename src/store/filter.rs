//! Row filters for reading snapshots back out of the store.

use bon::Builder;
use rusqlite::types::Value as SqlValue;

/// Narrows the rows returned by [`crate::ForecastStore::query`] and
/// [`crate::ForecastStore::summary`]. Every criterion is optional and they
/// combine with AND.
///
/// Dates are compared as text, the same way the feed's date tokens sort. An
/// upper bound matches on prefix, so `date_to("2025-01-10")` keeps
/// `"2025-01-10 18:00:00"`.
///
/// # Examples
///
/// ```
/// use forecast_ingest::ForecastFilter;
///
/// let filter = ForecastFilter::builder()
///     .locations(vec!["Taipei".to_string(), "Keelung".to_string()])
///     .date_from("2025-01-10")
///     .keyword("rain")
///     .build();
/// assert_eq!(filter.date_to, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct ForecastFilter {
    /// Keep rows whose location is any of these. Empty keeps all.
    #[builder(default)]
    pub locations: Vec<String>,
    /// Inclusive lower bound on the date token.
    #[builder(into)]
    pub date_from: Option<String>,
    /// Inclusive upper bound on the date token (prefix match).
    #[builder(into)]
    pub date_to: Option<String>,
    /// Substring of the description. Case is folded for ASCII letters only.
    #[builder(into)]
    pub keyword: Option<String>,
    /// Maximum number of rows returned by a query. Ignored by summaries.
    pub limit: Option<usize>,
}

impl ForecastFilter {
    /// Builds the `WHERE` clause (with a leading space, or empty) and its
    /// positional parameters.
    pub(crate) fn where_clause(&self) -> (String, Vec<SqlValue>) {
        let mut conditions: Vec<String> = Vec::new();
        let mut values: Vec<SqlValue> = Vec::new();

        if !self.locations.is_empty() {
            let placeholders = vec!["?"; self.locations.len()].join(", ");
            conditions.push(format!("location IN ({placeholders})"));
            values.extend(self.locations.iter().cloned().map(SqlValue::Text));
        }
        if let Some(from) = &self.date_from {
            conditions.push("date >= ?".to_string());
            values.push(SqlValue::Text(from.clone()));
        }
        if let Some(to) = &self.date_to {
            conditions.push("substr(date, 1, length(?)) <= ?".to_string());
            values.push(SqlValue::Text(to.clone()));
            values.push(SqlValue::Text(to.clone()));
        }
        if let Some(keyword) = self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            conditions.push("description LIKE ? ESCAPE '\\'".to_string());
            values.push(SqlValue::Text(format!("%{}%", escape_like(keyword))));
        }

        if conditions.is_empty() {
            (String::new(), values)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), values)
        }
    }
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
