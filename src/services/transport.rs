// ============================================================================
// TRANSPORT - wire-level request/response types
// ============================================================================
// The API client only builds requests and interprets status codes; moving
// bytes is the job of a `Transport`. The browser uses `GlooTransport`, tests
// plug in an in-memory one.
// ============================================================================

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Body of an outbound POST
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// A single POST request against an absolute URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub url: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Server response as received: status code and raw body text
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body on demand. The client itself never does this.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Moves an `ApiRequest` over the network and provides the timer used for
/// request timeouts.
///
/// `send` must resolve with the response for every status code; only
/// transport failures are errors. Dropping the `send` future abandons the
/// request.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;

    async fn sleep(&self, ms: u32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoanCount;

    #[test]
    fn success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(304, "").is_success());
        assert!(!ApiResponse::new(404, "").is_success());
    }

    #[test]
    fn json_decodes_body() {
        let response = ApiResponse::new(200, r#"{"borrowed_count":3}"#);
        let count: LoanCount = response.json().unwrap();
        assert_eq!(count.borrowed_count, 3);
    }

    #[test]
    fn json_reports_decode_error() {
        let response = ApiResponse::new(200, "<html>");
        let err = response.json::<LoanCount>().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
