use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::{
    booking::SeatError,
    response::{ApiResponse, Meta},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Validation failed on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Unauthorized {0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Conflict {0}")]
    Conflict(String),

    #[error("Payload Too Large")]
    PayloadTooLarge,

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Entity hooks reject rows with `DbErr::Custom`; unique indexes surface as
/// `SqlErr::UniqueConstraintViolation`. Both are caller errors, not server faults.
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return AppError::Conflict(detail);
        }
        match err {
            DbErr::Custom(message) => AppError::validation("non_field_errors", message),
            other => AppError::OrmError(other),
        }
    }
}

impl From<SeatError> for AppError {
    fn from(err: SeatError) -> Self {
        AppError::validation("seat", err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let (message, data) = match &self {
            AppError::Validation { field, message } => (
                "Validation failed".to_string(),
                ErrorData {
                    error: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            _ => (
                self.to_string(),
                ErrorData {
                    error: self.to_string(),
                    field: None,
                },
            ),
        };

        let body = ApiResponse {
            message,
            data: Some(data),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_rejections_become_validation_errors() {
        let err: AppError = DbErr::Custom("seat \"10G\" is not valid".into()).into();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn seat_errors_point_at_the_seat_field() {
        let seat_err = crate::booking::seat::validate("10G", 10, 6, 20).unwrap_err();
        match AppError::from(seat_err) {
            AppError::Validation { field, message } => {
                assert_eq!(field, "seat");
                assert!(message.contains("first 6 letters"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Unauthorized("missing token".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::Conflict("seat taken".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
