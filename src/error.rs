//! Error types.
//!
//! Two families live here:
//!
//! - [`ApiError`] – every request-level failure. Stages and handlers return
//!   it, the pipeline catches it exactly once and translates it into a JSON
//!   response via [`IntoResponse`].
//! - [`Error`] – infrastructure failures: loading configuration, binding a
//!   port, accepting a connection. These never reach a client.

use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::middleware::API_KEY_HEADER;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

/// A request-level failure.
///
/// The `Display` output is the client-facing `error` string, except for
/// [`ApiError::Internal`] whose detail is logged and replaced by a generic
/// message on the wire.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Route not found")]
    RouteNotFound { method: String, path: String },

    #[error("{resource} not found")]
    ResourceNotFound { resource: &'static str, id: String },

    #[error("Unauthorized. Provide a valid API key in the {} header", API_KEY_HEADER)]
    Unauthorized,

    #[error("Validation failed")]
    InvalidInput(Vec<String>),

    #[error("Page and limit must be positive integers")]
    InvalidPagination,

    #[error("Search query parameter \"q\" is required")]
    MissingQuery,

    #[error("Invalid JSON payload")]
    MalformedPayload(String),

    #[error("Request timed out")]
    Timeout,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::ResourceNotFound { resource, id: id.into() }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    pub fn status(&self) -> Status {
        match self {
            Self::RouteNotFound { .. } | Self::ResourceNotFound { .. } => Status::NotFound,
            Self::Unauthorized => Status::Unauthorized,
            Self::InvalidInput(_)
            | Self::InvalidPagination
            | Self::MissingQuery
            | Self::MalformedPayload(_) => Status::BadRequest,
            Self::Timeout => Status::ServiceUnavailable,
            Self::Internal(_) => Status::InternalServerError,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::RouteNotFound { method, path } => ErrorBody {
                error: self.to_string(),
                message: Some(format!("Cannot {method} {path}")),
                details: Vec::new(),
            },
            Self::InvalidInput(details) => ErrorBody {
                error: self.to_string(),
                message: None,
                details: details.clone(),
            },
            Self::Internal(_) => ErrorBody::plain("Internal server error"),
            _ => ErrorBody::plain(self.to_string()),
        }
    }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl ErrorBody {
    fn plain(error: impl Into<String>) -> Self {
        Self { error: error.into(), message: None, details: Vec::new() }
    }
}

/// The error translator. Logs the failure server-side, then renders it.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = u16::from(status);
        if status.is_server_error() {
            error!(status = code, error = %self, detail = ?self, "request failed");
        } else {
            warn!(status = code, error = %self, detail = ?self, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

/// Infrastructure failure returned by [`Config::load`](crate::Config::load)
/// and [`Server::serve`](crate::Server::serve).
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address `{0}`")]
    Address(String),
}
