use crate::feed::error::FeedError;
use crate::store::error::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Store(#[from] StoreError),

    // Covers errors joining the blocking store task
    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ForecastError {
    /// Process exit status for this failure.
    ///
    /// `3` network or HTTP status, `4` body is not JSON, `5` store, `1` anything
    /// else. `2` is left to argument parsing.
    pub fn exit_code(&self) -> u8 {
        match self {
            ForecastError::Feed(e) if e.is_decode() => 4,
            ForecastError::Feed(FeedError::ClientBuild(_)) => 1,
            ForecastError::Feed(_) => 3,
            ForecastError::Store(_) => 5,
            ForecastError::TaskJoin(_) => 1,
        }
    }
}
