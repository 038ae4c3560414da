//! Key submission and lookup as defined by the OpenPGP HTTP Keyserver
//! Protocol (HKP), sections 3 and 4.

use std::fmt;

use reqwest::Body;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use url::form_urlencoded;

use crate::api::api_client::Client;
use crate::api::error::Error;
use crate::api::http_sender::HttpSender;

pub const PATH_PKS_ADD: &str = "/pks/add";
pub const PATH_PKS_LOOKUP: &str = "/pks/lookup";

/// Lookup option requesting machine-readable output.
pub const OPTION_MACHINE_READABLE: &str = "mr";

const NEXT_PAGE_TOKEN_HEADER: &str = "X-HKP-Next-Page-Token";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The `op` of a lookup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Return the matching keys, ASCII armored.
    Get,
    /// Return an index of the matching keys.
    Index,
    /// Return a verbose index of the matching keys.
    VIndex,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Index => "index",
            Operation::VIndex => "vindex",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination state threaded through successive lookups.
///
/// `token` is sent with the request and replaced with the server's next page
/// token on success. An empty token means "first page" on the way out and
/// "no more pages" on the way back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDetails {
    /// Maximum number of results per page; the server may return fewer.
    pub size: usize,
    pub token: String,
}

/// Query string of a lookup. Absent fields are omitted from the wire rather
/// than sent empty or as "off".
#[derive(Debug)]
pub(super) struct LookupQuery<'a> {
    pub search: &'a str,
    pub op: &'static str,
    pub options: Option<String>,
    pub fingerprint: Option<&'static str>,
    pub exact: Option<&'static str>,
    pub page_size: Option<usize>,
    pub page_token: Option<&'a str>,
}

impl<'a> LookupQuery<'a> {
    pub fn new(
        search: &'a str,
        operation: Operation,
        fingerprint: bool,
        exact: bool,
        options: &[&str],
        page: Option<&'a PageDetails>,
    ) -> Self {
        Self {
            search,
            op: operation.as_str(),
            options: (!options.is_empty()).then(|| options.join(",")),
            fingerprint: fingerprint.then_some("on"),
            exact: exact.then_some("on"),
            page_size: page.map(|p| p.size).filter(|size| *size != 0),
            page_token: page.map(|p| p.token.as_str()).filter(|token| !token.is_empty()),
        }
    }

    /// Keys are emitted in sorted order.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(exact) = self.exact {
            serializer.append_pair("exact", exact);
        }
        if let Some(fingerprint) = self.fingerprint {
            serializer.append_pair("fingerprint", fingerprint);
        }
        serializer.append_pair("op", self.op);
        if let Some(options) = &self.options {
            serializer.append_pair("options", options);
        }
        serializer.append_pair("search", self.search);
        if let Some(size) = self.page_size {
            serializer.append_pair("x-pagesize", &size.to_string());
        }
        if let Some(token) = self.page_token {
            serializer.append_pair("x-pagetoken", token);
        }
        serializer.finish()
    }
}

/// Renders a fingerprint as a `0x`-prefixed lowercase hex search term.
pub fn fingerprint_search(fingerprint: &[u8; 20]) -> String {
    format!("0x{}", hex::encode(fingerprint))
}

/// Public key server operations.
#[async_trait::async_trait]
pub trait PksApi {
    /// Submits an ASCII armored keyring (HKP section 4).
    async fn pks_add(&self, key_text: &str) -> Result<(), Error>;

    /// Looks up keys (HKP section 3) and returns the response body verbatim.
    ///
    /// Unknown `options` are passed through untouched. When `page` is given,
    /// its token is replaced with the server's next page token on success.
    async fn pks_lookup(
        &self,
        page: Option<&mut PageDetails>,
        search: &str,
        operation: Operation,
        fingerprint: bool,
        exact: bool,
        options: &[&str],
    ) -> Result<String, Error>;

    /// Fetches the ASCII armored key with the given 20-byte fingerprint.
    async fn get_key(&self, fingerprint: &[u8; 20]) -> Result<String, Error>;
}

#[async_trait::async_trait]
impl<S: HttpSender> PksApi for Client<S> {
    async fn pks_add(&self, key_text: &str) -> Result<(), Error> {
        let form = form_urlencoded::Serializer::new(String::new())
            .append_pair("keytext", key_text)
            .finish();

        let mut request = self.new_request("POST", PATH_PKS_ADD, None, Some(Body::from(form)))?;
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        self.send(request).await?;

        Ok(())
    }

    async fn pks_lookup(
        &self,
        page: Option<&mut PageDetails>,
        search: &str,
        operation: Operation,
        fingerprint: bool,
        exact: bool,
        options: &[&str],
    ) -> Result<String, Error> {
        let query = LookupQuery::new(search, operation, fingerprint, exact, options, page.as_deref())
            .encode();

        let request = self.new_request("GET", PATH_PKS_LOOKUP, Some(&query), None)?;
        let response = self.send(request).await?;

        let next_page_token = response
            .headers()
            .get(NEXT_PAGE_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await?;

        if let Some(page) = page {
            page.token = next_page_token;
        }

        Ok(body)
    }

    async fn get_key(&self, fingerprint: &[u8; 20]) -> Result<String, Error> {
        let search = fingerprint_search(fingerprint);
        self.pks_lookup(None, &search, Operation::Get, false, true, &[]).await
    }
}
