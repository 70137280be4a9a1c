// ============================================================================
// API CLIENT - HTTP only (stateless)
// ============================================================================
// No business logic: every operation is one POST whose outcome (raw response
// or error) is returned to the caller unchanged. No retries, no caching.
// ============================================================================

use futures::future::{select, Either};
use futures::pin_mut;
use serde::Serialize;
use serde_json::json;
use std::future::Future;

use super::error::ApiError;
use super::gloo_transport::GlooTransport;
use super::transport::{ApiRequest, ApiResponse, FormPart, RequestBody, Transport};
use crate::config::ApiConfig;
use crate::models::{NewBook, ScanImage, ScanKind};

/// API client bound to one backend configuration
#[derive(Debug, Clone)]
pub struct ApiClient<T = GlooTransport> {
    config: ApiConfig,
    transport: T,
}

impl ApiClient<GlooTransport> {
    /// Client using the browser's fetch
    pub fn browser(config: ApiConfig) -> Self {
        Self::new(config, GlooTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Borrower lookup: open loans for a phone number
    pub async fn get_user_info(&self, phone: &str) -> Result<ApiResponse, ApiError> {
        self.post_json("/borrower_loans", &json!({ "phone": phone }))
            .await
    }

    /// Book search; `params` is sent verbatim
    pub async fn search_books<P>(&self, params: &P) -> Result<ApiResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.post_json("/search_books", params).await
    }

    /// Borrow registration; `data` is sent verbatim
    pub async fn borrow_book<D>(&self, data: &D) -> Result<ApiResponse, ApiError>
    where
        D: Serialize + ?Sized,
    {
        self.post_json("/borrow", data).await
    }

    /// Borrower details (name, college, open loans)
    pub async fn get_borrower_info(&self, phone: &str) -> Result<ApiResponse, ApiError> {
        self.post_json("/borrower_info", &json!({ "borrower_phone": phone }))
            .await
    }

    pub async fn book_detail(&self, book_id: &str) -> Result<ApiResponse, ApiError> {
        self.post_json("/book_detail", &json!({ "book_id": book_id }))
            .await
    }

    pub async fn return_book(
        &self,
        book_id: &str,
        borrower_phone: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.post_json(
            "/return_book",
            &json!({ "book_id": book_id, "borrower_phone": borrower_phone }),
        )
        .await
    }

    pub async fn system_stats(&self) -> Result<ApiResponse, ApiError> {
        self.post_json("/stats", &json!({})).await
    }

    pub async fn create_book(&self, book: &NewBook) -> Result<ApiResponse, ApiError> {
        self.post_json("/create_books", book).await
    }

    /// Turn scanned metadata into a book record; `metadata` is sent verbatim
    pub async fn finalize_book<M>(&self, metadata: &M) -> Result<ApiResponse, ApiError>
    where
        M: Serialize + ?Sized,
    {
        self.post_json("/finalize_book", metadata).await
    }

    pub async fn delete_book(&self, book_id: &str) -> Result<ApiResponse, ApiError> {
        let path = format!("/del_books/{}", book_id);
        self.dispatch(self.request(&path, RequestBody::Empty)).await
    }

    /// Upload one scan step. Unsupported image types are rejected before
    /// anything is sent.
    pub async fn scan_book(
        &self,
        kind: ScanKind,
        image: &ScanImage,
        temp_id: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        if !image.is_supported() {
            log::warn!("⚠️ [API] Rejected scan image of type {}", image.content_type);
            return Err(ApiError::UnsupportedMedia(image.content_type.clone()));
        }

        let mut parts = vec![
            FormPart::File {
                name: "file".to_string(),
                file_name: image.file_name.clone(),
                content_type: image.content_type.clone(),
                bytes: image.bytes.clone(),
            },
            FormPart::Text {
                name: "scan_type".to_string(),
                value: kind.as_str().to_string(),
            },
        ];
        if let Some(temp_id) = temp_id {
            parts.push(FormPart::Text {
                name: "temp_id".to_string(),
                value: temp_id.to_string(),
            });
        }

        self.dispatch(self.request("/scan_book", RequestBody::Multipart(parts)))
            .await
    }

    fn request(&self, path: &str, body: RequestBody) -> ApiRequest {
        ApiRequest {
            url: self.config.endpoint(path),
            body,
        }
    }

    async fn post_json<B>(&self, path: &str, body: &B) -> Result<ApiResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Serialize(e.to_string()))?;
        self.dispatch(self.request(path, RequestBody::Json(value)))
            .await
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = request.url.clone();
        log::info!("📡 [API] POST {}", url);

        match self.with_timeout(self.transport.send(request)).await {
            Ok(response) if response.is_success() => {
                log::debug!("✅ [API] {} -> {}", url, response.status);
                Ok(response)
            }
            Ok(response) => {
                log::warn!("⚠️ [API] {} -> HTTP {}", url, response.status);
                Err(ApiError::Status(response))
            }
            Err(e) => {
                log::error!("❌ [API] {} failed: {}", url, e);
                Err(e)
            }
        }
    }

    /// Race the request against the configured timer. Losing the race drops
    /// the request future, which abandons it.
    async fn with_timeout<F>(&self, request: F) -> Result<ApiResponse, ApiError>
    where
        F: Future<Output = Result<ApiResponse, ApiError>>,
    {
        let ms = self.config.timeout_ms;
        if ms == 0 {
            return request.await;
        }

        let timer = self.transport.sleep(ms);
        pin_mut!(request, timer);

        match select(request, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(ApiError::Timeout { ms }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BorrowRequest;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    enum Reply {
        Ready(Result<ApiResponse, ApiError>),
        Never,
        Deferred(oneshot::Receiver<ApiResponse>),
    }

    #[derive(Clone, Copy)]
    enum Timer {
        Fires,
        Never,
    }

    /// Records every request; replies are scripted per endpoint path
    struct MockTransport {
        requests: RefCell<Vec<ApiRequest>>,
        replies: RefCell<HashMap<String, Reply>>,
        sleeps: RefCell<Vec<u32>>,
        timer: Timer,
    }

    impl MockTransport {
        fn new(timer: Timer) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                replies: RefCell::new(HashMap::new()),
                sleeps: RefCell::new(Vec::new()),
                timer,
            }
        }

        fn reply(self, path: &str, reply: Reply) -> Self {
            self.replies.borrow_mut().insert(path.to_string(), reply);
            self
        }
    }

    impl Transport for MockTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            let path = request
                .url
                .strip_prefix("http://localhost:8000")
                .unwrap_or(&request.url)
                .to_string();
            self.requests.borrow_mut().push(request);

            let reply = self.replies.borrow_mut().remove(&path);
            match reply {
                Some(Reply::Ready(result)) => result,
                Some(Reply::Never) => futures::future::pending().await,
                Some(Reply::Deferred(rx)) => rx
                    .await
                    .map_err(|_| ApiError::Network("connection closed".into())),
                None => Ok(ApiResponse::new(200, "{}")),
            }
        }

        async fn sleep(&self, ms: u32) {
            self.sleeps.borrow_mut().push(ms);
            match self.timer {
                Timer::Fires => {}
                Timer::Never => futures::future::pending::<()>().await,
            }
        }
    }

    struct YieldNow(bool);

    impl Future for YieldNow {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    fn client(transport: MockTransport) -> ApiClient<MockTransport> {
        ApiClient::new(ApiConfig::default(), transport)
    }

    #[test]
    fn user_info_posts_phone_once() {
        let api = client(MockTransport::new(Timer::Never));

        block_on(api.get_user_info("13800000000")).unwrap();

        let requests = api.transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://localhost:8000/borrower_loans");
        assert_eq!(
            requests[0].json_body(),
            Some(&json!({"phone": "13800000000"}))
        );
    }

    #[test]
    fn search_returns_raw_response() {
        let server = ApiResponse::new(200, r#"{"data":[],"total":0,"page":1,"total_pages":0}"#);
        let api = client(
            MockTransport::new(Timer::Never)
                .reply("/search_books", Reply::Ready(Ok(server.clone()))),
        );

        let response = block_on(api.search_books(&json!({"title": "X"}))).unwrap();

        assert_eq!(response, server);
        let requests = api.transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://localhost:8000/search_books");
        assert_eq!(requests[0].json_body(), Some(&json!({"title": "X"})));
    }

    #[test]
    fn borrow_sends_data_verbatim() {
        let api = client(MockTransport::new(Timer::Never));
        let request = BorrowRequest {
            book_id: "5f3a8b2c".into(),
            borrower_phone: "13800000000".into(),
            borrower_name: "Li Lei".into(),
            borrower_college: "Physics".into(),
        };

        block_on(api.borrow_book(&request)).unwrap();

        let requests = api.transport.requests.borrow();
        assert_eq!(requests[0].url, "http://localhost:8000/borrow");
        assert_eq!(
            requests[0].json_body(),
            Some(&serde_json::to_value(&request).unwrap())
        );
    }

    #[test]
    fn error_status_surfaces_raw_response() {
        let server = ApiResponse::new(400, r#"{"detail":"book not available"}"#);
        let api = client(
            MockTransport::new(Timer::Never).reply("/borrow", Reply::Ready(Ok(server.clone()))),
        );

        let err = block_on(api.borrow_book(&json!({"book_id": "x"}))).unwrap_err();

        assert_eq!(err, ApiError::Status(server));
        assert_eq!(api.transport.requests.borrow().len(), 1);
    }

    #[test]
    fn network_error_is_not_retried() {
        let api = client(MockTransport::new(Timer::Never).reply(
            "/borrower_loans",
            Reply::Ready(Err(ApiError::Network("connection refused".into()))),
        ));

        let err = block_on(api.get_user_info("13800000000")).unwrap_err();

        assert_eq!(err, ApiError::Network("connection refused".into()));
        assert_eq!(api.transport.requests.borrow().len(), 1);
    }

    #[test]
    fn slow_server_times_out_without_retry() {
        let api = client(MockTransport::new(Timer::Fires).reply("/search_books", Reply::Never));

        let err = block_on(api.search_books(&json!({"title": "X"}))).unwrap_err();

        assert_eq!(err, ApiError::Timeout { ms: 5000 });
        assert_eq!(api.transport.requests.borrow().len(), 1);
        assert_eq!(*api.transport.sleeps.borrow(), vec![5000]);
    }

    #[test]
    fn zero_timeout_disables_timer() {
        let api = ApiClient::new(
            ApiConfig::new("http://localhost:8000", 0),
            MockTransport::new(Timer::Fires),
        );

        block_on(api.system_stats()).unwrap();

        assert!(api.transport.sleeps.borrow().is_empty());
        let requests = api.transport.requests.borrow();
        assert_eq!(requests[0].url, "http://localhost:8000/stats");
        assert_eq!(requests[0].json_body(), Some(&json!({})));
    }

    #[test]
    fn concurrent_calls_complete_in_either_order() {
        let (search_tx, search_rx) = oneshot::channel();
        let (borrow_tx, borrow_rx) = oneshot::channel();
        let api = client(
            MockTransport::new(Timer::Never)
                .reply("/search_books", Reply::Deferred(search_rx))
                .reply("/borrow", Reply::Deferred(borrow_rx)),
        );
        let finished = RefCell::new(Vec::new());

        block_on(async {
            let search = async {
                let result = api.search_books(&json!({"title": "X"})).await;
                finished.borrow_mut().push("search");
                result
            };
            let borrow = async {
                let result = api.borrow_book(&json!({"book_id": "a1"})).await;
                finished.borrow_mut().push("borrow");
                result
            };
            let server = async {
                YieldNow(false).await;
                borrow_tx.send(ApiResponse::new(200, "borrowed")).unwrap();
                YieldNow(false).await;
                search_tx.send(ApiResponse::new(200, "found")).unwrap();
            };

            let (search, borrow, ()) = futures::join!(search, borrow, server);
            assert_eq!(search.unwrap().body, "found");
            assert_eq!(borrow.unwrap().body, "borrowed");
        });

        // Issued search first, finished it last
        assert_eq!(*finished.borrow(), vec!["borrow", "search"]);
        assert_eq!(api.transport.requests.borrow().len(), 2);
    }

    #[test]
    fn supplementary_endpoints() {
        let api = client(MockTransport::new(Timer::Never));
        let new_book = NewBook {
            title: "Rust".into(),
            author: "Klabnik".into(),
            total: 2,
            isbn: Some("9780306406157".into()),
            price: None,
        };
        let metadata = json!({
            "title": "Rust",
            "author": "Klabnik",
            "isbn": "9780306406157",
            "total": 1,
            "price": 39.5,
            "temp_id": "5f3a8b2c"
        });

        block_on(async {
            api.get_borrower_info("13800000000").await.unwrap();
            api.book_detail("a1").await.unwrap();
            api.return_book("a1", "13800000000").await.unwrap();
            api.delete_book("a1").await.unwrap();
            api.system_stats().await.unwrap();
            api.create_book(&new_book).await.unwrap();
            api.finalize_book(&metadata).await.unwrap();
        });

        let requests = api.transport.requests.borrow();
        let urls: Vec<&str> = requests.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:8000/borrower_info",
                "http://localhost:8000/book_detail",
                "http://localhost:8000/return_book",
                "http://localhost:8000/del_books/a1",
                "http://localhost:8000/stats",
                "http://localhost:8000/create_books",
                "http://localhost:8000/finalize_book",
            ]
        );
        assert_eq!(
            requests[0].json_body(),
            Some(&json!({"borrower_phone": "13800000000"}))
        );
        assert_eq!(requests[1].json_body(), Some(&json!({"book_id": "a1"})));
        assert_eq!(
            requests[2].json_body(),
            Some(&json!({"book_id": "a1", "borrower_phone": "13800000000"}))
        );
        assert_eq!(requests[3].body, RequestBody::Empty);
        assert_eq!(requests[4].json_body(), Some(&json!({})));
        assert_eq!(
            requests[5].json_body(),
            Some(&json!({"title": "Rust", "author": "Klabnik", "total": 2, "isbn": "9780306406157"}))
        );
        assert_eq!(requests[6].json_body(), Some(&metadata));
    }

    #[test]
    fn scan_uploads_multipart_form() {
        let api = client(MockTransport::new(Timer::Never));
        let image = ScanImage {
            file_name: "info.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: vec![0xff, 0xd8],
        };

        block_on(api.scan_book(ScanKind::Info, &image, Some("5f3a8b2c"))).unwrap();

        let requests = api.transport.requests.borrow();
        assert_eq!(requests[0].url, "http://localhost:8000/scan_book");
        let RequestBody::Multipart(parts) = &requests[0].body else {
            panic!("expected multipart body");
        };
        assert_eq!(parts.len(), 3);
        assert_eq!(
            parts[1],
            FormPart::Text {
                name: "scan_type".into(),
                value: "info".into()
            }
        );
        assert_eq!(
            parts[2],
            FormPart::Text {
                name: "temp_id".into(),
                value: "5f3a8b2c".into()
            }
        );
    }

    #[test]
    fn unsupported_scan_is_never_sent() {
        let api = client(MockTransport::new(Timer::Never));
        let image = ScanImage {
            file_name: "cover.gif".into(),
            content_type: "image/gif".into(),
            bytes: vec![0x47],
        };

        let err = block_on(api.scan_book(ScanKind::Cover, &image, None)).unwrap_err();

        assert_eq!(err, ApiError::UnsupportedMedia("image/gif".into()));
        assert!(api.transport.requests.borrow().is_empty());
    }
}
