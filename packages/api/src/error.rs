use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::utils::transform::TransformError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `CONFLICT`, `MALFORMED_RECORD`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub error: &'static str,
    /// Human-readable error description.
    #[schema(example = "Missing required fields: address")]
    pub message: String,
    /// Offending field names, when the failure concerns specific fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = json!(["address"]))]
    pub details: Option<Vec<String>>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// Required fields absent from a payload.
    MissingFields(Vec<String>),
    NotFound(String),
    Conflict(String),
    /// A stored row could not be decoded into its API shape.
    MalformedRecord(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "VALIDATION_ERROR",
                    message: msg,
                    details: None,
                },
            ),
            AppError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "VALIDATION_ERROR",
                    message: format!("Missing required fields: {}", fields.join(", ")),
                    details: Some(fields),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: "NOT_FOUND",
                    message: msg,
                    details: None,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    error: "CONFLICT",
                    message: msg,
                    details: None,
                },
            ),
            AppError::MalformedRecord(detail) => {
                tracing::error!("Malformed record: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "MALFORMED_RECORD",
                        message: "A stored record could not be read".into(),
                        details: None,
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                        details: None,
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<TransformError> for AppError {
    fn from(err: TransformError) -> Self {
        AppError::MalformedRecord(err.to_string())
    }
}
