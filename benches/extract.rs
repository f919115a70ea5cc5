use criterion::{black_box, criterion_group, criterion_main, Criterion};
use forecast_ingest::extract;
use serde_json::{json, Value};

fn precise_document(locations: usize, days: usize) -> Value {
    let series = |key: &str, value: fn(usize) -> Value| -> Value {
        (0..days)
            .map(|d| json!({"dataDate": format!("2025-01-{:02}", d + 1), key: value(d)}))
            .collect()
    };
    let location: Vec<Value> = (0..locations)
        .map(|i| {
            json!({
                "locationName": format!("Station {i}"),
                "weatherElements": {
                    "Wx": {"daily": series("weather", |d| json!(if d % 2 == 0 { "Cloudy" } else { "Rain" }))},
                    "MaxT": {"daily": series("temperature", |d| json!((20 + d).to_string()))},
                    "MinT": {"daily": series("temperature", |d| json!(12 + d))},
                }
            })
        })
        .collect();
    json!({"cwaopendata": {"resources": {"resource": {"data": {"agrWeatherForecasts": {
        "weatherForecasts": {"location": location}
    }}}}}})
}

fn flat_array(rows: usize) -> Value {
    (0..rows)
        .map(|i| json!({"location": format!("Town {i}"), "date": "2025-01-10", "weather": "Sunny", "min_temp": "N/A", "max_temp": 28.5}))
        .collect()
}

fn bench_extract(c: &mut Criterion) {
    let precise = precise_document(22, 7);
    let array = flat_array(500);
    let nothing = json!({"meta": {"generated": "2025-01-10"}, "data": {"count": 0}});

    c.bench_function("extract_precise", |b| b.iter(|| extract(black_box(&precise))));
    c.bench_function("extract_top_level_array", |b| b.iter(|| extract(black_box(&array))));
    c.bench_function("extract_singleton", |b| b.iter(|| extract(black_box(&nothing))));
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
