use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Validation(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("backup is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("backup is not a JSON object")]
    NotAnObject,
    #[error("backup is missing the `{0}` array")]
    MissingCollection(&'static str),
    #[error("backup has an invalid `{collection}` record: {source}")]
    InvalidRecord {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StoreError {
    /// Prefix used when the error crosses the command boundary as a string.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Storage(_) => "STORAGE",
            StoreError::Serialize { .. } => "STORAGE",
            StoreError::Validation(_) => "INVALID",
        }
    }
}
