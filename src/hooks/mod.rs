pub mod use_request;

pub use use_request::{use_request, RequestState, UseRequestHandle};
