use std::fmt;

use reqwest::header::{AUTHORIZATION, HeaderValue, USER_AGENT};
use reqwest::{Body, Method, Request, Response, StatusCode};
use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::api::address::{is_localhost, normalize_url};
use crate::api::config::Config;
use crate::api::error::{Error, HttpError};
use crate::api::http_sender::{DefaultSender, HttpSender};
use crate::api::responses::ErrorEnvelope;

#[derive(Zeroize, ZeroizeOnDrop)]
pub(super) struct AuthToken(pub String);

/// Key service client. Holds no mutable state, so one instance can serve
/// concurrent calls as long as its sender can.
pub struct Client<S: HttpSender = DefaultSender> {
    pub(super) sender: S,
    pub(super) base_url: Url,
    pub(super) auth_token: Option<AuthToken>,
    pub(super) user_agent: Option<String>,
}

impl Client<DefaultSender> {
    /// Creates a client that sends requests through a default `reqwest::Client`.
    pub fn new(config: Config) -> Result<Client<DefaultSender>, Error> {
        Self::with_sender(config, DefaultSender::default())
    }
}

impl<S: HttpSender> Client<S> {
    /// Creates a client that sends requests through `sender`.
    ///
    /// Fails if the base URL cannot be parsed, uses an unsupported scheme, or
    /// would carry an auth token over plaintext to anything but `localhost`.
    /// No network activity takes place.
    pub fn with_sender(config: Config, sender: S) -> Result<Client<S>, Error> {
        let parsed = Url::parse(config.base_url_or_default())?;
        let base_url = normalize_url(&parsed)?;

        let auth_token = config.auth_token().map(|t| AuthToken(t.to_string()));
        if auth_token.is_some() && base_url.scheme() != "https" && !is_localhost(&base_url) {
            return Err(Error::InsecureCredentialTransmission);
        }

        Ok(Self {
            sender,
            base_url,
            auth_token,
            user_agent: config.user_agent().map(str::to_string),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn has_auth_token(&self) -> bool {
        self.auth_token.is_some()
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Builds a request for `path`, resolved against the base URL's path: a
    /// leading slash replaces the base path, no leading slash replaces its
    /// last segment. `path` is always a path; it can never change the scheme
    /// or host, and `?` or `#` in it are percent-encoded.
    pub fn new_request(
        &self,
        method: &str,
        path: &str,
        raw_query: Option<&str>,
        body: Option<Body>,
    ) -> Result<Request, Error> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| Error::InvalidMethod(method.to_string()))?;

        let mut url = self.base_url.clone();
        if !path.is_empty() {
            url.set_path(&resolve_path(self.base_url.path(), path));
        }
        url.set_query(raw_query.filter(|q| !q.is_empty()));
        url.set_fragment(None);

        let mut request = Request::new(method, url);
        *request.body_mut() = body;

        if let Some(token) = &self.auth_token {
            let mut value = HeaderValue::from_str(&format!("BEARER {}", token.0))
                .map_err(|_| Error::InvalidHeader("Authorization"))?;
            value.set_sensitive(true);
            request.headers_mut().insert(AUTHORIZATION, value);
        }
        if let Some(user_agent) = &self.user_agent {
            let value = HeaderValue::from_str(user_agent)
                .map_err(|_| Error::InvalidHeader("User-Agent"))?;
            request.headers_mut().insert(USER_AGENT, value);
        }

        Ok(request)
    }

    /// Sends `request` and returns the response if the service answered 200.
    /// Any other status is translated into [`Error::Http`]; failures below
    /// HTTP surface as [`Error::Transport`].
    pub async fn send(&self, request: Request) -> Result<Response, Error> {
        log::debug!("{} {}", request.method(), request.url());

        let response = self.sender.send(request).await?;

        error_if_unsuccessful(response).await
    }
}

impl<S: HttpSender> fmt::Debug for Client<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

// Merges a path-only reference with the base path. Dot segments are
// resolved by `Url::set_path`.
fn resolve_path(base_path: &str, path: &str) -> String {
    if path.starts_with('/') {
        return path.to_string();
    }
    let directory = base_path.rfind('/').map_or("/", |i| &base_path[..=i]);
    format!("{directory}{path}")
}

pub(super) async fn error_if_unsuccessful(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            log::debug!("failed to read error body for status {}: {}", status, e);
            String::new()
        }
    };
    let error = error_from_body(status, &body);
    log::debug!("request failed: {}", error);

    Err(Error::Http(error))
}

pub(super) fn error_from_body(status: StatusCode, body: &str) -> HttpError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error);

    let (code, message) = match envelope {
        Some(e) => (
            e.code
                .and_then(|c| u16::try_from(c).ok())
                .filter(|c| StatusCode::from_u16(*c).is_ok())
                .unwrap_or(status.as_u16()),
            e.message.unwrap_or_default(),
        ),
        None => (status.as_u16(), String::new()),
    };

    HttpError {
        code,
        status: status.to_string(),
        message,
    }
}
