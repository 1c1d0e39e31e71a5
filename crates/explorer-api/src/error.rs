//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use explorer_core::error::{AppError, ErrorKind};
use explorer_core::types::ApiEnvelope;

/// HTTP-facing wrapper around [`AppError`].
///
/// Handlers return `Result<_, ApiError>` and use `?` on service calls;
/// the conversion from `AppError` is implicit.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Status code for the wrapped error kind.
    pub fn status(&self) -> StatusCode {
        match self.0.kind {
            ErrorKind::Validation | ErrorKind::InvalidParent => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Storage
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let source = std::error::Error::source(&self.0).map(ToString::to_string);
            tracing::error!(
                kind = %self.0.kind,
                error = %self.0.message,
                source = ?source,
                "Request failed"
            );
        }

        let body: ApiEnvelope<()> = ApiEnvelope::error(self.0.message);
        (status, Json(body)).into_response()
    }
}
