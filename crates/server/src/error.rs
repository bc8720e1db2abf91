//! Application error handling

use std::error::Error as _;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hms_core::DashboardError;
use serde::Serialize;
use thiserror::Error;
use tokio_postgres::error::SqlState;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    /// The store could not be reached
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Internal(String),
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = %status.as_u16(), error = %self, "Request rejected");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<deadpool_postgres::PoolError> for AppError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        AppError::Unavailable(format!("Database pool error: {}", err))
    }
}

impl From<tokio_postgres::Error> for AppError {
    fn from(err: tokio_postgres::Error) -> Self {
        match err.code() {
            Some(code) if *code == SqlState::UNIQUE_VIOLATION => {
                AppError::Conflict(format!("Duplicate record: {}", db_message(&err)))
            }
            Some(code) if *code == SqlState::FOREIGN_KEY_VIOLATION => {
                AppError::Conflict(format!("Broken reference: {}", db_message(&err)))
            }
            Some(code)
                if *code == SqlState::CHECK_VIOLATION
                    || *code == SqlState::NOT_NULL_VIOLATION
                    || *code == SqlState::INVALID_TEXT_REPRESENTATION
                    || *code == SqlState::CHARACTER_NOT_IN_REPERTOIRE =>
            {
                AppError::BadRequest(format!("Rejected by database: {}", db_message(&err)))
            }
            Some(_) => AppError::Internal(format!("Database error: {}", db_message(&err))),
            None if err.is_closed()
                || err.source().is_some_and(|s| s.is::<std::io::Error>()) =>
            {
                AppError::Unavailable(format!("Database connection error: {}", err))
            }
            None => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("Malformed row: {}", err))
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::NotFound(_) => AppError::NotFound(err.to_string()),
            DashboardError::Invalid(_) => AppError::BadRequest(err.to_string()),
            DashboardError::SelectionUnavailable(_) => AppError::Conflict(err.to_string()),
            DashboardError::DuplicateIdentifier { .. } | DashboardError::Store(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

/// Server-side message of a database error, falling back to its display form
fn db_message(err: &tokio_postgres::Error) -> String {
    err.as_db_error()
        .map(|db| db.message().to_string())
        .unwrap_or_else(|| err.to_string())
}
