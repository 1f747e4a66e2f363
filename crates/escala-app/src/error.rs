use salvo::http::StatusCode;
use salvo::prelude::Json;
use serde::Serialize;
use thiserror::Error;

use escala_db::error::DbError;
use escala_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    BoardError(#[from] escala_board::error::BoardError),

    #[error(transparent)]
    CoreError(#[from] escala_core::error::CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::BoardError(_) => StatusCode::BAD_REQUEST,
            Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceError(err) => match err {
                ServiceError::BoardError(_) => StatusCode::BAD_REQUEST,
                ServiceError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                ServiceError::StorageUnavailable(_)
                | ServiceError::DatabaseError(DbError::PoolError(_)) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                ServiceError::DatabaseError(_)
                | ServiceError::DieselError(_)
                | ServiceError::ExportError(_)
                | ServiceError::CoreError(_)
                | ServiceError::InvalidConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// ## Summary
    /// Writes the error as a JSON body with the matching status code.
    ///
    /// Internal failures are logged and reported without details.
    pub fn render(&self, res: &mut salvo::Response) {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::warn!(error = %self, status = %status, "Request rejected");
            self.to_string()
        };

        res.status_code(status);
        res.render(Json(ErrorResponse { error: message }));
    }
}
