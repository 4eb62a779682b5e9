use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by store, segment, and import/export operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The backing store could not be opened or written. Fatal to the
    /// calling operation; never retried internally.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),

    /// Reserved for required-field validation. No storage operation emits
    /// this today; required-field checks (name, phone) live with the caller.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// A CSV stream could not be read or written during import/export.
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Underlying cause of [`Error::StorageUnavailable`].
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::StorageUnavailable(StorageError::Sqlite(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::StorageUnavailable(StorageError::Io(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::StorageUnavailable(StorageError::Json(e))
    }
}
