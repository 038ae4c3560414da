use std::collections::HashMap;

use http::StatusCode;
use reqwest::{Request, Response};

use crate::api::api_client::Client;
use crate::api::config::Config;
use crate::api::mock_sender::MockSender;

pub(super) fn create_ok_response() -> Response {
    create_ok_response_with_payload(Vec::new())
}

pub(super) fn create_ok_response_with_payload(payload: Vec<u8>) -> Response {
    Response::from(
        http::response::Builder::new()
            .status(StatusCode::OK)
            .body(payload)
            .unwrap()
    )
}

pub(super) fn create_ok_response_with_header(name: &str, value: &str, payload: &str) -> Response {
    Response::from(
        http::response::Builder::new()
            .status(StatusCode::OK)
            .header(name, value)
            .body(payload.as_bytes().to_vec())
            .unwrap()
    )
}

pub(super) fn create_error_response(status: StatusCode, body: &str) -> Response {
    Response::from(
        http::response::Builder::new()
            .status(status)
            .body(body.as_bytes().to_vec())
            .unwrap()
    )
}

// Error body as written by the key service
pub(super) fn create_json_error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "error": { "code": status.as_u16(), "message": message }
    });
    create_error_response(status, &body.to_string())
}

// A reqwest error that never reached a server
pub(super) fn create_transport_error() -> reqwest::Error {
    reqwest::Client::new().get("not a url").build().unwrap_err()
}

pub(super) fn mock_client(responses: Vec<Result<Response, reqwest::Error>>) -> Client<MockSender> {
    Client::with_sender(Config::default(), MockSender::new(responses)).unwrap()
}

pub(super) fn query_pairs(request: &Request) -> HashMap<String, String> {
    request.url().query_pairs().into_owned().collect()
}

pub(super) fn body_string(request: &Request) -> String {
    let bytes = request.body().and_then(|b| b.as_bytes()).unwrap_or_default();
    String::from_utf8(bytes.to_vec()).unwrap()
}
