//! Turns a forecast document of unknown shape into flat [`ForecastRecord`]s.

use crate::extraction::strategy::Strategy;
use crate::types::forecast_record::ForecastRecord;
use log::debug;
use serde_json::Value;

/// Records produced by one extraction, with the strategy that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// `None` when no strategy found anything.
    pub strategy: Option<Strategy>,
    pub records: Vec<ForecastRecord>,
}

/// Extracts forecast records from any JSON value.
///
/// Strategies from [`Strategy::CASCADE`] are tried in order and the first
/// non-empty result is returned. Unrecognised shapes never fail: they only
/// reduce the output, down to an empty vector for scalars.
///
/// # Examples
///
/// ```
/// use forecast_ingest::extract;
/// use serde_json::json;
///
/// let records = extract(&json!([
///     {"location": "Taipei", "description": "Cloudy", "min_temp": 15, "max_temp": "21"}
/// ]));
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].max_temp, Some(21.0));
///
/// assert!(extract(&json!(42)).is_empty());
/// ```
pub fn extract(document: &Value) -> Vec<ForecastRecord> {
    extract_traced(document).records
}

/// Like [`extract`], also reporting which strategy matched.
pub fn extract_traced(document: &Value) -> Extraction {
    for strategy in Strategy::CASCADE {
        match strategy.apply(document) {
            Some(records) if !records.is_empty() => {
                debug!("Strategy '{}' produced {} records", strategy, records.len());
                return Extraction {
                    strategy: Some(strategy),
                    records,
                };
            }
            _ => debug!("Strategy '{}' produced nothing", strategy),
        }
    }
    Extraction {
        strategy: None,
        records: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn agr_document(locations: Value) -> Value {
        json!({
            "cwaopendata": {
                "resources": {
                    "resource": {
                        "metadata": {"resourceDescription": "agricultural forecast"},
                        "data": {
                            "agrWeatherForecasts": {
                                "weatherForecasts": { "location": locations }
                            }
                        }
                    }
                }
            }
        })
    }

    fn daily(samples: &[(&str, Value)], value_key: &str) -> Value {
        let samples: Vec<Value> = samples
            .iter()
            .map(|(date, value)| json!({"dataDate": date, value_key: value}))
            .collect();
        json!({ "daily": samples })
    }

    #[test]
    fn test_precise_three_aligned_days() {
        let document = agr_document(json!([{
            "locationName": "Taichung",
            "weatherElements": {
                "Wx": daily(&[
                    ("2025-01-12", json!("Cloudy")),
                    ("2025-01-10", json!("Sunny")),
                    ("2025-01-11", json!("Rain")),
                ], "weather"),
                "MaxT": daily(&[
                    ("2025-01-10", json!("24")),
                    ("2025-01-11", json!(22)),
                    ("2025-01-12", json!(23.5)),
                ], "temperature"),
                "MinT": daily(&[
                    ("2025-01-10", json!("15")),
                    ("2025-01-11", json!(14)),
                    ("2025-01-12", json!(16.5)),
                ], "temperature"),
            }
        }]));

        let extraction = extract_traced(&document);
        assert_eq!(extraction.strategy, Some(Strategy::Precise));
        let records = extraction.records;
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.location == "Taichung"));

        let dates: Vec<_> = records.iter().map(|r| r.date.as_deref().unwrap()).collect();
        assert_eq!(dates, ["2025-01-10", "2025-01-11", "2025-01-12"]);

        assert_eq!(records[0].description.as_deref(), Some("Sunny"));
        assert_eq!(records[0].max_temp, Some(24.0));
        assert_eq!(records[0].min_temp, Some(15.0));
        assert_eq!(records[1].description.as_deref(), Some("Rain"));
        assert_eq!(records[2].max_temp, Some(23.5));
        assert_eq!(records[2].min_temp, Some(16.5));
    }

    #[test]
    fn test_precise_union_of_dates() {
        let document = agr_document(json!([{
            "locationName": "Pingtung",
            "weatherElements": {
                "MaxT": daily(&[("2025-06-01", json!(33)), ("2025-06-02", json!(34))], "temperature"),
                "MinT": daily(&[("2025-06-01", json!(26))], "temperature"),
            }
        }]));

        let records = extract(&document);
        assert_eq!(records.len(), 2);
        let second = &records[1];
        assert_eq!(second.date.as_deref(), Some("2025-06-02"));
        assert_eq!(second.max_temp, Some(34.0));
        assert_eq!(second.min_temp, None);
        assert_eq!(second.description, None);
    }

    #[test]
    fn test_precise_element_wrapped_in_list() {
        let document = agr_document(json!([{
            "locationName": "Nantou",
            "weatherElements": {
                "MaxT": [daily(&[("2025-01-01", json!(20))], "temperature")]
            }
        }]));
        let extraction = extract_traced(&document);
        assert_eq!(extraction.strategy, Some(Strategy::Precise));
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].location, "Nantou");
        assert_eq!(extraction.records[0].max_temp, Some(20.0));
    }

    #[test]
    fn test_precise_multiple_locations_keep_input_order() {
        let document = agr_document(json!([
            {"locationName": "Yunlin", "weatherElements": {"Wx": daily(&[("2025-01-01", json!("Fog"))], "weather")}},
            {"locationName": "Changhua", "weatherElements": {"Wx": daily(&[("2025-01-01", json!("Fair"))], "weather")}},
        ]));
        let records = extract(&document);
        let names: Vec<_> = records.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(names, ["Yunlin", "Changhua"]);
    }

    #[test]
    fn test_precise_with_nothing_usable_falls_through() {
        // Location list exists but carries no series and no name.
        let document = agr_document(json!([{"weatherElements": {}}]));
        let extraction = extract_traced(&document);
        assert_ne!(extraction.strategy, Some(Strategy::Precise));
    }

    #[test]
    fn test_bare_array_of_flat_objects() {
        let document = json!([
            {"location": "Taipei", "min_temp": 14.5, "max_temp": 20, "description": "Cloudy"},
            {"location": "Kaohsiung", "min_temp": "19", "max_temp": 27.25, "description": "Sunny"}
        ]);
        let extraction = extract_traced(&document);
        assert_eq!(extraction.strategy, Some(Strategy::TopLevelArray));
        assert_eq!(
            extraction.records,
            vec![
                ForecastRecord {
                    location: "Taipei".into(),
                    date: None,
                    description: Some("Cloudy".into()),
                    min_temp: Some(14.5),
                    max_temp: Some(20.0),
                },
                ForecastRecord {
                    location: "Kaohsiung".into(),
                    date: None,
                    description: Some("Sunny".into()),
                    min_temp: Some(19.0),
                    max_temp: Some(27.25),
                },
            ]
        );
    }

    #[test]
    fn test_unrecognised_object_gives_singleton() {
        let extraction = extract_traced(&json!({"foo": "bar"}));
        assert_eq!(extraction.strategy, Some(Strategy::Singleton));
        assert_eq!(extraction.records, vec![ForecastRecord::default()]);
        assert_eq!(extraction.records[0].location, "");
    }

    #[test]
    fn test_not_available_temperature_in_every_strategy() {
        let precise = agr_document(json!([{
            "locationName": "Hsinchu",
            "weatherElements": {"MaxT": daily(&[("2025-01-01", json!("N/A"))], "temperature")}
        }]));
        let named = json!({"locations": [{"name": "Hsinchu", "max_temp": "N/A"}]});
        let scanned = json!({"data": {"rows": [{"name": "Hsinchu", "max_temp": "N/A"}]}});
        let array = json!([{"location": "Hsinchu", "max_temp": "N/A"}]);
        let single = json!({"location": "Hsinchu", "max_temp": "N/A"});

        for (document, expected) in [
            (precise, Strategy::Precise),
            (named, Strategy::NamedLocationList),
            (scanned, Strategy::DataScan),
            (array, Strategy::TopLevelArray),
            (single, Strategy::Singleton),
        ] {
            let extraction = extract_traced(&document);
            assert_eq!(extraction.strategy, Some(expected));
            assert_eq!(extraction.records.len(), 1);
            assert_eq!(extraction.records[0].max_temp, None, "{expected}");
        }
    }

    #[test]
    fn test_named_location_list_with_elements() {
        let document = json!({
            "success": "true",
            "records": {
                "location": [{
                    "locationName": "Hualien",
                    "weatherElement": [
                        {"elementName": "Wx", "time": [{"startTime": "2025-02-01 06:00:00", "parameter": {"parameterName": "Showers"}}]},
                        {"elementName": "MinT", "time": [{"startTime": "2025-02-01 06:00:00", "parameter": {"parameterName": "17"}}]},
                        {"elementName": "MaxT", "time": [{"startTime": "2025-02-01 06:00:00", "parameter": {"parameterName": "23"}}]}
                    ]
                }]
            }
        });
        let extraction = extract_traced(&document);
        assert_eq!(extraction.strategy, Some(Strategy::NamedLocationList));
        assert_eq!(
            extraction.records,
            vec![ForecastRecord {
                location: "Hualien".into(),
                date: Some("2025-02-01 06:00:00".into()),
                description: Some("Showers".into()),
                min_temp: Some(17.0),
                max_temp: Some(23.0),
            }]
        );
    }

    #[test]
    fn test_total_over_odd_documents() {
        let documents = [
            json!(null),
            json!(true),
            json!(0),
            json!("text"),
            json!([]),
            json!([[], [1, 2], null]),
            json!({}),
            json!({"cwaopendata": []}),
            json!({"cwaopendata": {"resources": {"resource": [{"data": [1]}]}}}),
            json!({"locations": {"location": "nope"}}),
            json!({"data": {"a": [], "b": [1, 2, 3]}}),
            json!({"records": {"location": [{"weatherElement": [{"elementName": "Wx", "time": "bad"}]}]}}),
        ];
        for document in documents {
            let _ = extract(&document);
        }
        assert!(extract(&json!(null)).is_empty());
        assert!(extract(&json!([])).is_empty());
        assert_eq!(extract(&json!({})).len(), 1);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let document = json!({
            "data": {"zz": [{"name": "B"}, {"name": "A"}]},
            "meta": {"b": 1, "a": 2}
        });
        let first = serde_json::to_string(&extract(&document)).unwrap();
        let second = serde_json::to_string(&extract(&document)).unwrap();
        assert_eq!(first, second);
    }
}
