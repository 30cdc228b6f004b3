use shared::domain::Filename;
use thiserror::Error;

pub const CATALOG_FAILURE_MESSAGE: &str =
    "There was an issue loading the videos. Please try again later.";
pub const STREAM_FAILURE_MESSAGE: &str = "Failed to fetch the video stream. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Catalog,
    Stream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CatalogFetchFailed,
    CatalogParseFailed,
    StreamFetchFailed,
    StreamUrlMissing,
    Config,
}

impl ErrorKind {
    pub fn operation(self) -> Operation {
        match self {
            Self::CatalogFetchFailed | Self::CatalogParseFailed => Operation::Catalog,
            Self::StreamFetchFailed | Self::StreamUrlMissing => Operation::Stream,
            // Only raised while building the transport, before any request.
            Self::Config => Operation::Catalog,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("catalog request failed: {reason}")]
    CatalogFetchFailed { reason: String },
    #[error("catalog response malformed: {reason}")]
    CatalogParseFailed { reason: String },
    #[error("stream request for {filename} failed: {reason}")]
    StreamFetchFailed { filename: Filename, reason: String },
    #[error("stream response for {filename} has no presigned_url")]
    StreamUrlMissing { filename: Filename },
    #[error("invalid client configuration: {reason}")]
    Config { reason: String },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CatalogFetchFailed { .. } => ErrorKind::CatalogFetchFailed,
            Self::CatalogParseFailed { .. } => ErrorKind::CatalogParseFailed,
            Self::StreamFetchFailed { .. } => ErrorKind::StreamFetchFailed,
            Self::StreamUrlMissing { .. } => ErrorKind::StreamUrlMissing,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    pub fn operation(&self) -> Operation {
        self.kind().operation()
    }

    /// Fixed text shown to the user; the variant detail only goes to the logs.
    pub fn user_message(&self) -> &'static str {
        match self.operation() {
            Operation::Catalog => CATALOG_FAILURE_MESSAGE,
            Operation::Stream => STREAM_FAILURE_MESSAGE,
        }
    }
}
