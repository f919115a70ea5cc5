use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create store directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to open forecast store '{0}'")]
    Open(PathBuf, #[source] rusqlite::Error),

    #[error("Failed to initialise forecast store schema")]
    Schema(#[source] rusqlite::Error),

    // Rows committed by earlier runs stay in place
    #[error("Failed to append {count} forecast rows")]
    Append {
        count: usize,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to query forecast store")]
    Query(#[source] rusqlite::Error),
}
