//! Settings for reaching the forecast feed.

use bon::Builder;
use std::env;
use std::time::Duration;

/// Agricultural weather forecast dataset of the Central Weather Administration open data API.
pub const DEFAULT_FEED_URL: &str =
    "https://opendata.cwa.gov.tw/fileapi/v1/opendataapi/F-A0010-001?downloadType=WEB&format=JSON";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Overrides the feed URL.
pub const ENV_FEED_URL: &str = "CWA_API_URL";
/// API key sent as the `Authorization` query parameter.
pub const ENV_API_KEY: &str = "CWA_API_KEY";
/// Request deadline in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "CWA_TIMEOUT_SECS";

/// Where and how to fetch the forecast document.
///
/// # Examples
///
/// ```
/// use forecast_ingest::FeedConfig;
/// use std::time::Duration;
///
/// let config = FeedConfig::builder()
///     .feed_url("http://localhost:8080/forecast.json")
///     .timeout(Duration::from_secs(5))
///     .build();
/// assert_eq!(config.api_key, None);
///
/// let defaults = FeedConfig::builder().build();
/// assert_eq!(defaults.feed_url, forecast_ingest::DEFAULT_FEED_URL);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct FeedConfig {
    #[builder(into, default = DEFAULT_FEED_URL.to_string())]
    pub feed_url: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    #[builder(into)]
    pub api_key: Option<String>,
}

impl FeedConfig {
    /// Reads `CWA_API_URL`, `CWA_API_KEY` and `CWA_TIMEOUT_SECS`, falling back
    /// to the defaults for anything unset, empty or unparsable.
    pub fn from_env() -> Self {
        let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        let timeout = non_empty(ENV_TIMEOUT_SECS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        FeedConfig::builder()
            .maybe_feed_url(non_empty(ENV_FEED_URL))
            .maybe_timeout(timeout)
            .maybe_api_key(non_empty(ENV_API_KEY))
            .build()
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig::builder().build()
    }
}
