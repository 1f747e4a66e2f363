use thiserror::Error;

/// Domain-level errors for the shift board
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid view mode: {0}")]
    InvalidViewMode(String),

    #[error("Date out of range")]
    DateOutOfRange,

    #[error("Malformed row: {0}")]
    MalformedRow(String),

    #[error("Invalid shift configuration: {0}")]
    InvalidShiftConfig(String),
}

pub type BoardResult<T> = std::result::Result<T, BoardError>;
