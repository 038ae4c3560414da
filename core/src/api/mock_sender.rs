use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use reqwest::{Request, Response};
use crate::api::http_sender::HttpSender;

// Thread-safe mock that captures requests for inspection
pub(super) struct MockSender {
    pub responses: Arc<Mutex<Vec<Result<Response, reqwest::Error>>>>,
    pub captured_requests: Arc<Mutex<Vec<Request>>>,
}

impl MockSender {
    pub fn new(responses: Vec<Result<Response, reqwest::Error>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_captured_requests(&self) -> std::sync::MutexGuard<'_, Vec<Request>> {
        self.captured_requests.lock().unwrap()
    }
}

#[async_trait]
impl HttpSender for MockSender {
    async fn send(&self, request: Request) -> Result<Response, reqwest::Error> {
        self.captured_requests.lock().unwrap().push(request);

        // Return the next mocked response
        self.responses.lock().unwrap().remove(0)
    }
}

// Never answers; used to exercise cancellation
pub(super) struct PendingSender;

#[async_trait]
impl HttpSender for PendingSender {
    async fn send(&self, _request: Request) -> Result<Response, reqwest::Error> {
        std::future::pending().await
    }
}
