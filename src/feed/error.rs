use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    // Connection dropped or deadline hit while streaming the body
    #[error("Failed to read response body from {0}")]
    BodyRead(String, #[source] reqwest::Error),

    #[error("Response from {url} is not valid JSON")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FeedError {
    /// `true` when the body arrived but could not be parsed.
    pub fn is_decode(&self) -> bool {
        matches!(self, FeedError::Decode { .. })
    }
}
