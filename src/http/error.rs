//! Failure taxonomy for a single relayed transaction.
//!
//! Failures are reported once, to the caller of the failing transaction;
//! nothing here is fatal to the listener. Once upstream headers have been
//! relayed, a body failure can no longer become one of these responses and
//! hyper aborts the caller connection instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Error raised while handling one inbound transaction.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The inbound connection failed while its body was being collected.
    #[error("failed to read request body")]
    Transport(#[source] axum::Error),

    /// The upstream could not be reached or dropped the exchange.
    #[error("upstream request failed")]
    Upstream(#[source] hyper_util::client::legacy::Error),

    /// The outbound request could not be constructed.
    #[error("failed to build outbound request")]
    Request(#[from] axum::http::Error),
}

/// Machine-parseable body of a failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    pub message: String,
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            RelayError::Transport(_) | RelayError::Request(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Failure kind as reported in the `error` field.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Upstream(_) => "Proxy Error",
            RelayError::Transport(_) | RelayError::Request(_) => "Server Error",
        }
    }

    /// The underlying cause and every error beneath it, joined with `": "`.
    /// Wrappers that print their inner error are only listed once.
    pub fn detail(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            let text = err.to_string();
            if !parts.last().is_some_and(|prev| prev.contains(&text)) {
                parts.push(text);
            }
            source = err.source();
        }
        if parts.is_empty() {
            self.to_string()
        } else {
            parts.join(": ")
        }
    }

    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: self.kind().to_string(),
            message: self.detail(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.payload())).into_response()
    }
}
