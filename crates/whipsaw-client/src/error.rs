//! Client-side error taxonomy.

use reqwest::StatusCode;
use thiserror::Error;
use whipsaw_shared::ErrorResponse;

pub const TRY_AGAIN: &str = "Something went wrong, please try again";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The credential was missing or rejected. The session has been cleared
    /// by the time the caller sees this.
    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("{message}")]
    Validation {
        message: String,
        problems: Vec<String>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Server(String),

    #[error("{}", TRY_AGAIN)]
    Network(#[source] reqwest::Error),
}

impl ClientError {
    /// Map a non-success response to the error a page shows.
    pub(crate) fn from_status(status: StatusCode, body: Option<ErrorResponse>) -> Self {
        let message = body
            .as_ref()
            .map(|b| b.display_message().to_string())
            .unwrap_or_else(|| TRY_AGAIN.to_string());

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation {
                message,
                problems: body.map(|b| b.problems).unwrap_or_default(),
            },
            // server-side faults are opaque on the wire already
            _ => ClientError::Server(message),
        }
    }

    /// Whether the caller should send the user back to the login page.
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}
