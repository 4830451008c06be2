//! HTTP adapter mapping for domain failures.
//!
//! Purpose: keep [`Failure`] transport agnostic while giving Actix handlers a
//! single JSON error envelope and a total mapping onto status codes:
//!
//! | failure        | status | code              |
//! |----------------|--------|-------------------|
//! | `Validation`   | 400    | `invalid_request` |
//! | `NotFound`     | 404    | `not_found`       |
//! | `Database`     | 500    | `internal_error`  |
//! | anything else  | 500    | `internal_error`  |
//!
//! Internal errors never carry details and always use a fixed message.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::Failure;
use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};

/// Message returned for storage failures.
pub const DATABASE_ERROR_MESSAGE: &str = "A database error occurred.";
/// Message returned for every other internal error.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Stable machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// API error response payload.
///
/// # Examples
/// ```
/// use backend::inbound::http::error::{ApiError, ErrorCode};
///
/// let err = ApiError::not_found("User '0xABC' not found");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    pub code: ErrorCode,
    /// Human-readable error message.
    #[schema(example = "User '0xABC' not found")]
    pub message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Structured context, e.g. `{ "subject": "User", "key": "0xABC" }`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    /// Create a new error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &ApiError) -> ApiError {
    if error.code == ErrorCode::InternalError && error.details.is_some() {
        ApiError {
            details: None,
            ..error.clone()
        }
    } else {
        error.clone()
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code)
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        builder.json(redact_if_internal(self))
    }
}

impl From<Failure> for ApiError {
    fn from(failure: Failure) -> Self {
        let message = failure.to_string();
        match failure {
            Failure::Validation {
                subject,
                invalid_value,
            } => Self::invalid_request(message)
                .with_details(json!({ "subject": subject, "value": invalid_value })),
            Failure::NotFound { subject, key } => {
                Self::not_found(message).with_details(json!({ "subject": subject, "key": key }))
            }
            Failure::Database { message: detail } => {
                warn!(failure = %detail, "database failure reported to client");
                Self::internal(DATABASE_ERROR_MESSAGE)
            }
        }
    }
}

/// Catch-all arm of the mapping: framework errors that are not domain
/// failures render as a generic 500 without echoing their cause.
///
/// Extractor errors do not come through here; `json_config` and
/// `query_config` turn them into `invalid_request` first.
impl From<actix_web::Error> for ApiError {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to API error");
        Self::internal(UNEXPECTED_ERROR_MESSAGE)
    }
}
