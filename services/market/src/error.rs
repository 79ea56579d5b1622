//! Error types for the market API

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use produce::{Field, InvalidField, RegistryError};

/// Result type for market handlers
pub type MarketResult<T> = Result<T, MarketError>;

/// Error types for market requests
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    /// The request body could not be decoded
    #[error("unable to process request: {0}")]
    BadRequest(#[from] serde_json::Error),

    /// The query string could not be decoded
    #[error("unable to process query: {0}")]
    BadQuery(#[from] QueryRejection),

    /// A produce field failed validation
    #[error(transparent)]
    InvalidField(#[from] InvalidField),

    /// The registry rejected the operation
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// No route matched the request path
    #[error("page not found")]
    PageNotFound,
}

impl MarketError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            MarketError::BadRequest(_)
            | MarketError::BadQuery(_)
            | MarketError::InvalidField(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            MarketError::Registry(RegistryError::Duplicate(_)) => StatusCode::CONFLICT,
            MarketError::Registry(RegistryError::NotFound(_)) | MarketError::PageNotFound => {
                StatusCode::NOT_FOUND
            }
        }
    }

    /// Get the error code for error responses
    pub fn error_code(&self) -> &'static str {
        match self {
            MarketError::BadRequest(_) | MarketError::BadQuery(_) => "BAD_REQUEST",
            MarketError::InvalidField(error) => match error.field() {
                Field::Name => "NAME_INVALID",
                Field::Code => "CODE_INVALID",
                Field::Price => "PRICE_INVALID",
            },
            MarketError::Registry(RegistryError::Duplicate(_)) => "ENTRY_EXISTS",
            MarketError::Registry(RegistryError::NotFound(_)) => "ENTRY_UNKNOWN",
            MarketError::PageNotFound => "PAGE_NOT_FOUND",
        }
    }
}

/// Error response format
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, serde::Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let message = self.to_string();

        tracing::debug!(%status, code, "{message}");

        let body = ErrorResponse {
            errors: vec![ErrorDetail { code, message }],
        };

        (status, axum::Json(body)).into_response()
    }
}
