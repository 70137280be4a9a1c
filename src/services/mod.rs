pub mod api_client;
pub mod error;
pub mod gloo_transport;
pub mod transport;

pub use api_client::ApiClient;
pub use error::ApiError;
pub use gloo_transport::GlooTransport;
pub use transport::{ApiRequest, ApiResponse, FormPart, RequestBody, Transport};
