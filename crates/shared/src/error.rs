use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    Internal,
    Other(u16),
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            404 => Self::NotFound,
            500 => Self::Internal,
            other => Self::Other(other),
        }
    }
}

/// Error body the catalog service attaches to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{code:?} ({status}): {message}")]
pub struct ServiceError {
    pub code: ErrorCode,
    pub status: u16,
    pub message: String,
}

impl ServiceError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::from_status(status),
            status,
            message: message.into(),
        }
    }

    /// Builds from a raw response body, preferring the service's own `error` text.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ApiError>(body)
            .map(|api| api.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(body).trim().to_string());
        Self::new(status, message)
    }
}
