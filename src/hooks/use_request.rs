// ============================================================================
// USE REQUEST - async API call state for a view
// ============================================================================

use std::future::Future;
use yew::prelude::*;

use crate::services::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Done(T),
    Failed(String),
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            RequestState::Done(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

pub struct UseRequestHandle<T> {
    state: UseStateHandle<RequestState<T>>,
}

impl<T> Clone for UseRequestHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: 'static> UseRequestHandle<T> {
    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    /// Spawn the request; the state goes Loading -> Done / Failed
    pub fn run<F>(&self, request: F)
    where
        F: Future<Output = Result<T, ApiError>> + 'static,
    {
        let state = self.state.clone();
        state.set(RequestState::Loading);

        wasm_bindgen_futures::spawn_local(async move {
            match request.await {
                Ok(value) => state.set(RequestState::Done(value)),
                Err(e) => {
                    log::error!("❌ [VIEW] Request failed: {}", e);
                    state.set(RequestState::Failed(failure_message(&e)));
                }
            }
        });
    }

    /// Report a problem found before any request was sent
    pub fn fail(&self, message: impl Into<String>) {
        self.state.set(RequestState::Failed(message.into()));
    }

    pub fn reset(&self) {
        self.state.set(RequestState::Idle);
    }
}

/// Text shown for a failed request; timeouts get a hint to try again
pub fn failure_message(error: &ApiError) -> String {
    let message = error.user_message();
    if error.is_timeout() {
        format!("{}. The server is slow, please try again.", message)
    } else {
        message
    }
}

#[hook]
pub fn use_request<T: 'static>() -> UseRequestHandle<T> {
    let state = use_state(|| RequestState::Idle);
    UseRequestHandle { state }
}
