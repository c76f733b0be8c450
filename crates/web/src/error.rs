//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fifthworld_core::{Error, ErrorCode};
use fifthworld_wizard::WizardError;

/// An error that ends a request, rendered as a JSON [`ErrorReport`].
///
/// [`ErrorReport`]: fifthworld_core::error::ErrorReport
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    /// Malformed request input
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(Error::invalid_input(message))
    }

    /// Status code for the wrapped error
    pub fn status(&self) -> StatusCode {
        match self.0.code {
            ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<WizardError> for ApiError {
    fn from(err: WizardError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = %self.0.code, error = %self.0, "Request failed");
        } else {
            tracing::debug!(code = %self.0.code, error = %self.0.message, "Request refused");
        }
        (status, Json(self.0.to_report())).into_response()
    }
}
