//! Permissive strategies tried when the precise layout is absent.

use crate::extraction::coerce::{
    as_object_list, coerce_scalar, number_field, object_list, read_f64, read_text, text_field,
    VALUE_KEYS,
};
use crate::extraction::precise::{resource_data, DATASET_WRAPPER};
use crate::types::forecast_record::ForecastRecord;
use serde_json::Value;

/// Keys probed, in order, for a list of location objects.
const LOCATION_LIST_KEYS: &[&str] = &["locations", "location", "weatherForecasts", "weather", "data"];

const NAME_KEYS: &[&str] = &["locationName", "location", "name"];
const ELEMENT_LIST_KEYS: &[&str] = &["weatherElement", "elements"];
const ELEMENT_NAME_KEYS: &[&str] = &["elementName", "name"];
const ELEMENT_SAMPLES_KEYS: &[&str] = &["time", "values"];
const SAMPLE_DATE_KEYS: &[&str] = &["startTime", "dataTime", "dataDate", "time"];

// Element tags in priority order.
const DESCRIPTION_ELEMENTS: &[&str] = &["Wx", "weather", "Weather", "description"];
const MAX_TEMP_ELEMENTS: &[&str] = &["MaxT", "max_temp", "MaxTemperature", "T"];
const MIN_TEMP_ELEMENTS: &[&str] = &["MinT", "min_temp", "MinTemperature"];

// Flat fields read directly off a location object.
const FLAT_LOCATION_KEYS: &[&str] = &["location", "locationName", "name"];
const FLAT_DATE_KEYS: &[&str] = &["date"];
const FLAT_DESCRIPTION_KEYS: &[&str] = &["weather", "description"];
const FLAT_MAX_TEMP_KEYS: &[&str] = &["max_temp"];
const FLAT_MIN_TEMP_KEYS: &[&str] = &["min_temp"];

/// Strategy 2: a location list under one of the well-known keys.
pub(crate) fn named_location_list(document: &Value) -> Option<Vec<ForecastRecord>> {
    let locations = search_scopes(document)
        .into_iter()
        .find_map(find_location_list)?;
    Some(summarize_locations(locations))
}

/// Strategy 3: the first list of objects among the values of a `data` object.
pub(crate) fn data_scan(document: &Value) -> Option<Vec<ForecastRecord>> {
    let data_objects = [
        document.get("data"),
        document.get(DATASET_WRAPPER).and_then(|wrapper| wrapper.get("data")),
        resource_data(document),
    ];
    let locations = data_objects
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .find_map(|data| data.values().find_map(as_object_list))?;
    Some(summarize_locations(locations))
}

/// Strategy 4: the document is an array of flat location objects.
pub(crate) fn top_level_array(document: &Value) -> Option<Vec<ForecastRecord>> {
    let items = document.as_array()?;
    Some(
        items
            .iter()
            .filter(|item| item.is_object())
            .map(flat_record)
            .filter(|record| !record.is_blank())
            .collect(),
    )
}

/// Strategy 5: a lone object becomes exactly one record, blank or not.
pub(crate) fn singleton(document: &Value) -> Option<Vec<ForecastRecord>> {
    document.is_object().then(|| vec![flat_record(document)])
}

/// Objects that may hold a location list: the root, the dataset wrapper and
/// any `records` object beneath either.
fn search_scopes(document: &Value) -> Vec<&Value> {
    let mut scopes = vec![document];
    scopes.extend(document.get(DATASET_WRAPPER));
    let records: Vec<&Value> = scopes
        .iter()
        .copied()
        .filter_map(|scope| scope.get("records"))
        .collect();
    scopes.extend(records);
    scopes.retain(|scope| scope.is_object());
    scopes
}

/// First of [`LOCATION_LIST_KEYS`] holding a non-empty list of objects.
///
/// A matching key whose value is an object is followed once more, which covers
/// layouts such as `records.locations.location[]`.
fn find_location_list(scope: &Value) -> Option<Vec<&Value>> {
    LOCATION_LIST_KEYS.iter().find_map(|key| {
        let value = scope.get(*key)?;
        as_object_list(value).or_else(|| {
            value
                .as_object()
                .and_then(|_| LOCATION_LIST_KEYS.iter().find_map(|inner| object_list(value, inner)))
        })
    })
}

fn summarize_locations(locations: Vec<&Value>) -> Vec<ForecastRecord> {
    locations
        .into_iter()
        .map(summarize_location)
        .filter(|record| !record.is_blank())
        .collect()
}

/// The first sample of one weather element: its date (if any) and its value.
struct FirstSample<'a> {
    date: Option<String>,
    value: Option<&'a Value>,
}

impl<'a> FirstSample<'a> {
    fn of(element: &'a Value) -> Option<Self> {
        let first = ELEMENT_SAMPLES_KEYS
            .iter()
            .filter_map(|key| element.get(*key))
            .find_map(|samples| samples.as_array().and_then(|s| s.first()))?;

        Some(Self {
            date: text_field(first, SAMPLE_DATE_KEYS),
            value: coerce_scalar(first, VALUE_KEYS),
        })
    }
}

/// One record for a location object: named elements first, flat fields after.
fn summarize_location(location: &Value) -> ForecastRecord {
    let elements: Vec<&Value> = ELEMENT_LIST_KEYS
        .iter()
        .find_map(|key| object_list(location, key))
        .unwrap_or_default();

    let description = tagged(&elements, DESCRIPTION_ELEMENTS)
        .into_iter()
        .find_map(|sample| sample.value.and_then(|v| read_text(v, VALUE_KEYS)));
    let max_temp = tagged(&elements, MAX_TEMP_ELEMENTS)
        .into_iter()
        .find_map(|sample| sample.value.and_then(|v| read_f64(v, VALUE_KEYS)));
    let min_temp = tagged(&elements, MIN_TEMP_ELEMENTS)
        .into_iter()
        .find_map(|sample| sample.value.and_then(|v| read_f64(v, VALUE_KEYS)));
    let date = elements
        .iter()
        .copied()
        .filter_map(FirstSample::of)
        .find_map(|sample| sample.date);

    ForecastRecord {
        location: text_field(location, NAME_KEYS).unwrap_or_default(),
        date: date.or_else(|| text_field(location, FLAT_DATE_KEYS)),
        description: description.or_else(|| text_field(location, FLAT_DESCRIPTION_KEYS)),
        min_temp: min_temp.or_else(|| number_field(location, FLAT_MIN_TEMP_KEYS)),
        max_temp: max_temp.or_else(|| number_field(location, FLAT_MAX_TEMP_KEYS)),
    }
}

/// First samples of the elements tagged with any of `aliases`, in alias order.
fn tagged<'a>(elements: &[&'a Value], aliases: &[&str]) -> Vec<FirstSample<'a>> {
    aliases
        .iter()
        .flat_map(|alias| {
            elements
                .iter()
                .copied()
                .filter(move |element| {
                    text_field(element, ELEMENT_NAME_KEYS).as_deref() == Some(*alias)
                })
                .filter_map(FirstSample::of)
        })
        .collect()
}

/// A record from the object's own fields, without any nested search.
fn flat_record(object: &Value) -> ForecastRecord {
    ForecastRecord {
        location: text_field(object, FLAT_LOCATION_KEYS).unwrap_or_default(),
        date: text_field(object, FLAT_DATE_KEYS),
        description: text_field(object, FLAT_DESCRIPTION_KEYS),
        min_temp: number_field(object, FLAT_MIN_TEMP_KEYS),
        max_temp: number_field(object, FLAT_MAX_TEMP_KEYS),
    }
}
