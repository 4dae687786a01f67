//! Error taxonomy for backend calls.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by [`super::ApiClient`].
///
/// Only `Unauthorized` is handled centrally: by the time a caller sees it,
/// the client has already cleared the session and requested navigation.
/// Every other variant is interpreted by the calling view, with no global
/// handling and no retries.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the attached credential (401). The session has
    /// already been cleared when this is returned.
    #[error("session expired or unauthorized")]
    Unauthorized,

    /// Any other non-2xx response, including a 401 on an uncredentialed
    /// request such as a failed login; `message` carries the backend body
    /// (validation/business errors) for inline display.
    #[error("{message}")]
    Backend {
        status: StatusCode,
        message: String,
    },

    /// Network or protocol failure, including response decode errors.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Message suitable for inline display next to a form or widget.
    ///
    /// Backend messages pass through unmodified; transport failures get a
    /// generic message since the raw error is only useful in logs.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Backend { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Unauthorized => "Session expired. Please log in again.".to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}
