use async_trait::async_trait;
use reqwest::{Client, Request, Response};

/// Executes a fully built request. Implementations must be safe to share
/// between concurrent calls.
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, reqwest::Error>;
}

/// Sends requests through a pooled `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct DefaultSender {
    client: Client,
}

impl DefaultSender {
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSender for DefaultSender {
    async fn send(&self, request: Request) -> Result<Response, reqwest::Error> {
        self.client.execute(request).await
    }
}
