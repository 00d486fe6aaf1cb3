//! Error taxonomy for the game backend and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::protocol::ErrorOut;

#[derive(Error, Debug)]
pub enum GameError {
    /// The country data file could not be read or parsed.
    #[error("country data unavailable: {0}")]
    DataUnavailable(String),

    /// The client sent a request we cannot score or parse.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GameError {
    pub fn status(&self) -> StatusCode {
        match self {
            GameError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(target: "gdp_matcher", error = %self, "request failed");
        } else {
            tracing::warn!(target: "gdp_matcher", error = %self, "rejected request");
        }
        (status, Json(ErrorOut { error: self.to_string() })).into_response()
    }
}
