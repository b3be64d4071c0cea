use thiserror::Error;

/// tbmtrack error types
#[derive(Error, Debug)]
pub enum TbmError {
    /// Failed to parse a dataset row or field
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write failed
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for tbmtrack
pub type Result<T> = std::result::Result<T, TbmError>;
