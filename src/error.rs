use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Lookup did not finish within {0} ms")]
    DeadlineExceeded(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LookupError {
    /// True for failures reaching the store, as opposed to bad input or setup.
    pub fn is_data_access(&self) -> bool {
        matches!(self, LookupError::Database(_) | LookupError::Pool(_))
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
