//! Error types for query translation and device search.
//!
//! Errors are split by who is at fault: [`ValidationError`] for malformed
//! client input, [`TranslationError`] for search documents that do not have
//! the shape the decoder expects, and [`UpstreamError`] for failures of the
//! search engine call itself.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::types::{Operator, Scope};

/// The primary error type for reporting search operations.
#[derive(Error, Debug)]
pub enum ReportingError {
    /// Malformed search request (client-side failure).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unexpected document shape while compiling or decoding (server-side failure).
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// The search engine call failed (server-side failure).
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ReportingError {
    /// Returns true if the caller is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ReportingError::Validation(_))
    }
}

/// Errors caused by a malformed search request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The scope is not one of identity, inventory or custom.
    #[error("unknown attribute scope: {scope}")]
    UnknownScope { scope: String },

    /// The filter operator is not supported.
    #[error("unknown filter operator: {operator}")]
    UnknownOperator { operator: String },

    /// The sort order is neither asc nor desc.
    #[error("unknown sort order: {order}")]
    UnknownSortOrder { order: String },

    /// The filter value has a shape no search field can hold.
    #[error("unsupported value type for attribute '{attribute}': {reason}")]
    UnsupportedValueType { attribute: String, reason: String },

    /// The value shape does not fit the operator.
    #[error("invalid value for {scope}/{attribute} with operator {operator}: {expected}")]
    InvalidValueShape {
        scope: Scope,
        attribute: String,
        operator: Operator,
        expected: &'static str,
    },

    /// Missing required field.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    /// Page or page size is not a positive integer.
    #[error("invalid paging: {field} must be a positive integer, got {value}")]
    InvalidPaging { field: &'static str, value: i64 },
}

/// Errors caused by a search document that does not match the expected layout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslationError {
    /// A required field of the search response is missing.
    #[error("search response is missing '{field}'")]
    MissingField { field: String },

    /// A field of the search response has the wrong JSON type.
    #[error("search response field '{field}' should be {expected}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
    },

    /// A stored attribute entry could not be decoded.
    #[error("malformed stored attribute in {scope} scope at index {index}: {message}")]
    MalformedAttribute {
        scope: Scope,
        index: usize,
        message: String,
    },
}

/// Errors returned by the search engine transport.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The search engine could not be reached.
    #[error("search engine unavailable: {message}")]
    Unavailable { message: String },

    /// The search engine answered with a non-success status.
    #[error("search engine returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The search engine response could not be read.
    #[error("invalid search engine response: {message}")]
    InvalidResponse { message: String },

    /// The search client could not be configured.
    #[error("search client configuration error: {message}")]
    Configuration { message: String },
}

/// Result type for reporting search operations.
pub type ReportingResult<T> = Result<T, ReportingError>;

/// Result type for request validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for response decoding.
pub type TranslationResult<T> = Result<T, TranslationError>;

impl From<serde_json::Error> for ReportingError {
    fn from(err: serde_json::Error) -> Self {
        ReportingError::Upstream(UpstreamError::InvalidResponse {
            message: err.to_string(),
        })
    }
}
