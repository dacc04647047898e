//! Error types for the reporting API.
//!
//! All errors are returned as a JSON object with a single `error` field:
//!
//! ```json
//! { "error": "need `tenant` header" }
//! ```
//!
//! # Error Mapping
//!
//! Errors from the search layer are mapped to HTTP status codes:
//!
//! | Search Error | HTTP Status |
//! |--------------|-------------|
//! | ValidationError | 400 |
//! | TranslationError | 500 |
//! | UpstreamError | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reporting_search::ReportingError;
use thiserror::Error;
use tracing::error;

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// Bad request - malformed or invalid search (HTTP 400).
    #[error("{message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// The search engine is not usable (HTTP 503).
    #[error("{message}")]
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    #[error("{message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

impl From<ReportingError> for RestError {
    fn from(err: ReportingError) -> Self {
        if err.is_client_error() {
            return RestError::BadRequest {
                message: err.to_string(),
            };
        }

        error!(error = %err, "Device search failed");
        RestError::InternalError {
            message: "internal error".to_string(),
        }
    }
}

/// Result type for REST API operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reporting_search::{TranslationError, UpstreamError, ValidationError};

    #[test]
    fn test_bad_request_display() {
        let err = RestError::BadRequest {
            message: "need `tenant` header".to_string(),
        };
        assert_eq!(err.to_string(), "need `tenant` header");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: RestError = ReportingError::from(ValidationError::UnknownScope {
            scope: "system".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("system"));
    }

    #[test]
    fn test_server_errors_are_not_leaked() {
        let err: RestError = ReportingError::from(TranslationError::MissingField {
            field: "_source.id".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "internal error");

        let err: RestError = ReportingError::from(UpstreamError::Status {
            status: 500,
            message: "boom".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_service_unavailable() {
        let err = RestError::ServiceUnavailable {
            message: "not ready".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
