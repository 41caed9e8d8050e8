//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pipeline::extraction::ExtractionError;
use crate::pipeline::parsing::ParsingError;
use crate::pipeline::validate::ValidationError;
use crate::pipeline::ProcessingError;
use crate::store::StoreError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("File too large")]
    FileTooLarge { size: usize, max: usize },
    #[error("Request body too large")]
    RequestTooLarge,
    #[error("Uploaded file is empty")]
    EmptyFile,
    #[error("Uploaded file is not a PDF")]
    InvalidPdf,
    #[error("No machine-readable text in document")]
    NoExtractableText,
    #[error("Document text too short")]
    InsufficientText { chars: usize },
    #[error("Rule extraction service failed: {0}")]
    ExtractionService(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Execution backend rejected the policy")]
    BackendRejected { status: u16, body: String },
    #[error("Execution backend unreachable: {0}")]
    BackendUnreachable(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::FileTooLarge { size, max } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "FILE_TOO_LARGE",
                format!("File is {size} bytes, maximum allowed is {max}"),
            ),
            ApiError::RequestTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "FILE_TOO_LARGE",
                "Request body exceeds the upload limit".to_string(),
            ),
            ApiError::EmptyFile => (
                StatusCode::BAD_REQUEST,
                "EMPTY_FILE",
                "Uploaded file is empty".to_string(),
            ),
            ApiError::InvalidPdf => (
                StatusCode::BAD_REQUEST,
                "NOT_A_PDF",
                "Uploaded file is not a PDF".to_string(),
            ),
            ApiError::NoExtractableText => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_TEXT",
                "No machine-readable text layer found in the document".to_string(),
            ),
            ApiError::InsufficientText { chars } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INSUFFICIENT_TEXT",
                format!("Extracted text too short to be meaningful: {chars} characters"),
            ),
            ApiError::ExtractionService(detail) => {
                tracing::error!(detail, "rule extraction service failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_SERVICE_FAILED",
                    format!("Rule extraction service failed: {detail}"),
                )
            }
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::BackendRejected { status, body } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "BACKEND_REJECTED",
                format!("Execution backend rejected the policy: {body}"),
            ),
            ApiError::BackendUnreachable(cause) => {
                tracing::error!(cause, "execution backend unreachable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "BACKEND_UNREACHABLE",
                    format!("Could not reach the execution backend: {cause}"),
                )
            }
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::TooLarge { size, max } => ApiError::FileTooLarge { size, max },
            ValidationError::Empty => ApiError::EmptyFile,
            ValidationError::NotAPdf => ApiError::InvalidPdf,
        }
    }
}

impl From<ExtractionError> for ApiError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::NoText => ApiError::NoExtractableText,
            ExtractionError::InsufficientText { chars } => ApiError::InsufficientText { chars },
            // An engine crash on an otherwise valid PDF means the
            // document had no usable text layer for us.
            ExtractionError::Engine(_) => ApiError::NoExtractableText,
        }
    }
}

impl From<ParsingError> for ApiError {
    fn from(err: ParsingError) -> Self {
        ApiError::ExtractionService(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PolicyNotFound(id) => ApiError::NotFound(format!("Policy not found: {id}")),
            StoreError::RuleNotFound { policy_id, rule_id } => {
                ApiError::NotFound(format!("Rule {rule_id} not found in policy {policy_id}"))
            }
            StoreError::LockPoisoned => ApiError::Internal("store lock poisoned".into()),
        }
    }
}

impl From<ProcessingError> for ApiError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Validation(e) => e.into(),
            ProcessingError::Extraction(e) => e.into(),
            ProcessingError::Service(e) => e.into(),
        }
    }
}
