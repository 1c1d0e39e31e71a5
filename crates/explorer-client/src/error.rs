//! Client error types.

use reqwest::StatusCode;

/// Errors raised while talking to the tree API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with `{success: false, message}`.
    #[error("{message}")]
    Api {
        /// HTTP status of the response.
        status: StatusCode,
        /// Server-supplied message.
        message: String,
    },

    /// The response body was not the expected envelope.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Text to surface to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Http(e) if e.is_timeout() => "The server did not respond in time".to_string(),
            Self::Http(_) => "Could not reach the server".to_string(),
            Self::Decode(_) => "The server sent an unexpected response".to_string(),
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            Self::Decode(_) => None,
        }
    }
}
