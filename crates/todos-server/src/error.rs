//! Server and request error types

use http::StatusCode;
use thiserror::Error;

/// Errors that can occur while starting or stopping the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Store error: {0}")]
    Store(#[from] todos_store::StoreError),

    #[error("Server already stopped")]
    AlreadyStopped,
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Errors raised while handling a single request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    UnknownDay(#[from] crate::model::UnknownDay),

    #[error("store error: {0}")]
    Store(#[from] todos_store::StoreError),

    #[error("invalid todo payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("corrupt todo at {key}: {source}")]
    Record {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read request body: {0}")]
    Body(#[from] hyper::Error),

    #[error("encoding error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Unknown days are missing resources; everything else is a server fault.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownDay(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
