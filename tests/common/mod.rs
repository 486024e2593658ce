//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gatecheck_client::{ChecksApi, HttpOptions, RetryConfig};

pub const CHECKS_PATH: &str = "/api/checks";

/// The four document verification checks, in repository (unsorted) order.
pub fn sample_checks_json() -> Value {
    json!([
        {"id": "aaa", "priority": 10, "description": "Face on the picture matches face on the document"},
        {"id": "bbb", "priority": 5, "description": "Veriff supports presented document"},
        {"id": "ccc", "priority": 7, "description": "Face is clearly visible"},
        {"id": "ddd", "priority": 3, "description": "Document data is clearly visible"}
    ])
}

pub async fn mount_checks(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_submit(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(CHECKS_PATH))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn base_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

/// Client with fast retries so failure paths finish quickly.
pub fn api(server: &MockServer, max_retries: u32) -> ChecksApi {
    let retry = RetryConfig {
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        ..RetryConfig::default()
    }
    .with_max_retries(max_retries);
    let options = HttpOptions {
        timeout: Duration::from_secs(5),
        retry,
    };
    ChecksApi::new(&base_url(server), options).expect("valid mock server url")
}

/// JSON bodies of every POST the server received.
pub async fn posted_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.method.as_str() == "POST")
        .map(|request| serde_json::from_slice(&request.body).expect("JSON body"))
        .collect()
}
