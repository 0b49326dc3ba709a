//! Per-request failures of the message push handler and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Why a message push request was rejected. Each maps to a status code and a short plain-text
/// body terminated by a newline.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Failed to read request body")]
    ReadBody(#[source] axum::Error),
    #[error("Failed to parse JSON")]
    ParseJson(#[source] serde_json::Error),
    #[error("Failed to generate reply")]
    EncodeReply(#[source] serde_json::Error),
}

impl PushError {
    pub fn status(&self) -> StatusCode {
        match self {
            PushError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            PushError::ReadBody(_) | PushError::ParseJson(_) => StatusCode::BAD_REQUEST,
            PushError::EncodeReply(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PushError {
    fn into_response(self) -> Response {
        (self.status(), format!("{}\n", self)).into_response()
    }
}
