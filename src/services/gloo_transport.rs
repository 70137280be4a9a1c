// ============================================================================
// GLOO TRANSPORT - fetch() through gloo-net
// ============================================================================

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;
use web_sys::{AbortController, Blob, BlobPropertyBag, FormData};

use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, FormPart, RequestBody, Transport};

/// Browser transport (stateless)
#[derive(Debug, Clone, Default)]
pub struct GlooTransport;

impl GlooTransport {
    pub fn new() -> Self {
        Self
    }
}

/// Aborts the fetch when the request future is dropped (timeout)
struct AbortOnDrop(Option<AbortController>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if let Some(controller) = &self.0 {
            controller.abort();
        }
    }
}

impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let guard = AbortOnDrop(AbortController::new().ok());
        let signal = guard.0.as_ref().map(|controller| controller.signal());

        let builder = Request::post(&request.url).abort_signal(signal.as_ref());
        let prepared = match &request.body {
            RequestBody::Empty => builder
                .build()
                .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?,
            RequestBody::Json(value) => builder
                .json(value)
                .map_err(|e| ApiError::Serialize(e.to_string()))?,
            RequestBody::Multipart(parts) => builder
                .body(form_data(parts)?)
                .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?,
        };

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Body read error: {}", e)))?;

        drop(guard);
        Ok(ApiResponse { status, body })
    }

    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

fn form_data(parts: &[FormPart]) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;

    for part in parts {
        match part {
            FormPart::Text { name, value } => {
                form.append_with_str(name, value).map_err(js_error)?;
            }
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let array = js_sys::Uint8Array::from(bytes.as_slice());
                let sequence = js_sys::Array::of1(&array);
                let options = BlobPropertyBag::new();
                options.set_type(content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&sequence, &options)
                    .map_err(js_error)?;
                form.append_with_blob_and_filename(name, &blob, file_name)
                    .map_err(js_error)?;
            }
        }
    }

    Ok(form)
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", value))
}
