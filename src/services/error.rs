// ============================================================================
// API ERRORS
// ============================================================================
// Every failure of an outbound call lands here and is handed back to the
// calling view unchanged. Nothing is retried or recovered in this layer.
// ============================================================================

use serde::Deserialize;
use thiserror::Error;

use super::transport::ApiResponse;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The timer fired before the server answered
    #[error("timeout of {ms}ms exceeded")]
    Timeout { ms: u32 },

    /// Connection refused, DNS failure, aborted fetch...
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status; the raw response is kept
    #[error("HTTP {}: {}", .0.status, .0.body)]
    Status(ApiResponse),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("parse error: {0}")]
    Decode(String),

    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),
}

/// Error body produced by the backend (`{"detail": "..."}`)
#[derive(Deserialize)]
struct ErrorDetail {
    detail: String,
}

impl ApiError {
    /// Raw response behind an HTTP status error
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            ApiError::Status(response) => Some(response),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }

    /// Short text for display in a view. Uses the backend's `detail` field
    /// when the body carries one.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status(response) => {
                match serde_json::from_str::<ErrorDetail>(&response.body) {
                    Ok(err) => format!("HTTP {}: {}", response.status, err.detail),
                    Err(_) => self.to_string(),
                }
            }
            _ => self.to_string(),
        }
    }
}
