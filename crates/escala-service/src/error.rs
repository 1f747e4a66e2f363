use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] escala_db::error::DbError),

    #[error(transparent)]
    BoardError(#[from] escala_board::error::BoardError),

    #[error(transparent)]
    ExportError(#[from] escala_board::export::ExportError),

    #[error(transparent)]
    CoreError(#[from] escala_core::error::CoreError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
