pub(crate) mod coerce;
pub mod extractor;
mod fallback;
mod precise;
pub mod strategy;
