//! The precise strategy: the agricultural forecast dataset's known layout.
//!
//! ```text
//! cwaopendata.resources.resource.data.agrWeatherForecasts.weatherForecasts.location[]
//!   locationName
//!   weatherElements.{Wx, MaxT, MinT}.daily[] = { dataDate, weather | temperature }
//! ```
//!
//! The three daily series are aligned on the union of their dates.

use crate::extraction::coerce::{read_f64, read_text, text_field};
use crate::types::forecast_record::ForecastRecord;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

pub(crate) const DATASET_WRAPPER: &str = "cwaopendata";

const ELEMENT_DESCRIPTION: &str = "Wx";
const ELEMENT_MAX_TEMP: &str = "MaxT";
const ELEMENT_MIN_TEMP: &str = "MinT";

const DESCRIPTION_VALUE_KEYS: &[&str] = &["weather", "value"];
const TEMPERATURE_VALUE_KEYS: &[&str] = &["temperature", "value"];
const SAMPLE_DATE_KEYS: &[&str] = &["dataDate", "date"];
const ELEMENT_NAME_KEYS: &[&str] = &["elementName", "name"];

/// Daily samples of one element, keyed by their date token. A date whose value
/// failed coercion is still present (mapped to `None`) so it joins the union.
type DailySeries<T> = BTreeMap<String, Option<T>>;

/// `value[key]`, unwrapping a list to its first entry.
fn descend<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value.get(key)? {
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

/// `cwaopendata.resources.resource.data`, when it is an object.
pub(crate) fn resource_data(document: &Value) -> Option<&Value> {
    let wrapper = descend(document, DATASET_WRAPPER)?;
    let resource = descend(descend(wrapper, "resources")?, "resource")?;
    descend(resource, "data").filter(|data| data.is_object())
}

pub(crate) fn precise(document: &Value) -> Option<Vec<ForecastRecord>> {
    let forecasts = descend(descend(resource_data(document)?, "agrWeatherForecasts")?, "weatherForecasts")?;
    let locations: Vec<&Value> = match forecasts.get("location")? {
        Value::Array(items) => items.iter().filter(|item| item.is_object()).collect(),
        single @ Value::Object(_) => vec![single],
        _ => return None,
    };
    if locations.is_empty() {
        return None;
    }

    Some(locations.into_iter().flat_map(daily_records).collect())
}

/// One record per date found in any of the location's three series.
fn daily_records(location: &Value) -> Vec<ForecastRecord> {
    let name = text_field(location, &["locationName", "name"]).unwrap_or_default();
    let Some(elements) = location.get("weatherElements") else {
        return Vec::new();
    };

    let descriptions = daily_series(elements, ELEMENT_DESCRIPTION, DESCRIPTION_VALUE_KEYS, read_text);
    let max_temps = daily_series(elements, ELEMENT_MAX_TEMP, TEMPERATURE_VALUE_KEYS, read_f64);
    let min_temps = daily_series(elements, ELEMENT_MIN_TEMP, TEMPERATURE_VALUE_KEYS, read_f64);

    let dates: BTreeSet<&String> = descriptions
        .keys()
        .chain(max_temps.keys())
        .chain(min_temps.keys())
        .collect();

    dates
        .into_iter()
        .map(|date| ForecastRecord {
            location: name.clone(),
            date: Some(date.clone()),
            description: descriptions.get(date).cloned().flatten(),
            min_temp: min_temps.get(date).copied().flatten(),
            max_temp: max_temps.get(date).copied().flatten(),
        })
        .filter(|record| !record.is_blank())
        .collect()
}

/// Collects the daily samples of `element`.
///
/// `elements` is either a map keyed by element name or a list of elements
/// tagged with `elementName`. The series sits under `daily` (or `time`), or is
/// the element itself when that is already a list.
fn daily_series<T>(
    elements: &Value,
    element: &str,
    value_keys: &[&str],
    read: fn(&Value, &[&str]) -> Option<T>,
) -> DailySeries<T> {
    let mut series = DailySeries::new();

    let found = match elements {
        Value::Object(map) => map.get(element),
        Value::Array(items) => items.iter().find(|item| {
            text_field(item, ELEMENT_NAME_KEYS).as_deref() == Some(element)
        }),
        _ => None,
    };
    let samples = match found {
        // A list is either the element wrapped in a list or the samples themselves
        Some(Value::Array(items)) => match items.first().and_then(sample_list) {
            Some(samples) => samples,
            None => items,
        },
        Some(element) => match sample_list(element) {
            Some(samples) => samples,
            None => return series,
        },
        None => return series,
    };

    for sample in samples {
        let Some(date) = text_field(sample, SAMPLE_DATE_KEYS) else {
            continue;
        };
        // Later samples for the same date replace earlier ones.
        series.insert(date, read(sample, value_keys));
    }
    series
}

/// The `daily` (or `time`) sample list of an element object.
fn sample_list(element: &Value) -> Option<&Vec<Value>> {
    element
        .get("daily")
        .or_else(|| element.get("time"))
        .and_then(Value::as_array)
}
