//! Runs the extractor over a JSON file and prints what it found.
//!
//! cargo run --example extract_document -- path/to/F-A0010-001.json

use forecast_ingest::extract_traced;
use serde_json::Value;
use std::env;
use std::error::Error;
use std::fs;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .ok_or("usage: extract_document <file.json>")?;
    let document: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;

    let extraction = extract_traced(&document);
    match extraction.strategy {
        Some(strategy) => println!(
            "{} records from {} (strategy: {})",
            extraction.records.len(),
            path,
            strategy
        ),
        None => println!("No records found in {}", path),
    }
    for record in &extraction.records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}
