use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Error surface of the proxy operations.
///
/// Each handler returns `Result<_, ProxyError>`; this is the only place
/// status codes are assigned, so upstream diagnostics survive untouched.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The client request is unusable; nothing was sent upstream.
    #[error("{0}")]
    BadRequest(String),

    /// Bhashini answered with a non-success status. Status and raw body are
    /// forwarded verbatim, never reshaped.
    #[error("upstream responded with status {status}")]
    Upstream { status: u16, body: String },

    /// Network failure, malformed upstream payload, or anything else that
    /// broke mid-flight.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Transport(err.into())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            ProxyError::Upstream { status, body } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, body).into_response()
            }
            ProxyError::Transport(err) => {
                error!("proxy request failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}
