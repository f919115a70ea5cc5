//! The ordered set of extraction strategies.

use crate::extraction::fallback::{data_scan, named_location_list, singleton, top_level_array};
use crate::extraction::precise::precise;
use crate::types::forecast_record::ForecastRecord;
use serde_json::Value;
use std::fmt;

/// One candidate parsing path, from most precise to most permissive.
///
/// # Examples
///
/// ```
/// use forecast_ingest::Strategy;
///
/// assert_eq!(Strategy::CASCADE[0], Strategy::Precise);
/// assert_eq!(Strategy::Singleton.to_string(), "singleton");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// The agricultural forecast layout with per-day series for every location.
    Precise,
    /// A list of location objects under a well-known key.
    NamedLocationList,
    /// The first list of objects found among the values of a `data` object.
    DataScan,
    /// The document itself is an array of flat location objects.
    TopLevelArray,
    /// The document is one object; its flat fields become a single record.
    Singleton,
}

impl Strategy {
    /// All strategies in the order the extractor tries them.
    pub const CASCADE: [Strategy; 5] = [
        Strategy::Precise,
        Strategy::NamedLocationList,
        Strategy::DataScan,
        Strategy::TopLevelArray,
        Strategy::Singleton,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Precise => "precise",
            Strategy::NamedLocationList => "named-location-list",
            Strategy::DataScan => "data-scan",
            Strategy::TopLevelArray => "top-level-array",
            Strategy::Singleton => "singleton",
        }
    }

    /// Runs this strategy. `None` means the document does not have the shape it
    /// looks for; `Some` may still be empty when nothing usable was found.
    pub(crate) fn apply(&self, document: &Value) -> Option<Vec<ForecastRecord>> {
        match self {
            Strategy::Precise => precise(document),
            Strategy::NamedLocationList => named_location_list(document),
            Strategy::DataScan => data_scan(document),
            Strategy::TopLevelArray => top_level_array(document),
            Strategy::Singleton => singleton(document),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
