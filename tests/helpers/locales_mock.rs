//! Mock locales server for testing
//!
//! Serves `locales.json` the way a static file host would. It uses wiremock
//! to create configurable responses and to verify how often the resource
//! was requested.

use std::time::Duration;
use serde_json::Value;
use url::Url;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const LOCALES_PATH: &str = "/locales.json";

/// Mock static host serving the locales resource
pub struct LocalesMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub body: Option<Value>,
    pub raw_body: Option<String>,
    /// Exact number of requests the mock must receive
    pub expected_calls: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
            body: None,
            raw_body: None,
            expected_calls: None,
        }
    }
}

impl LocalesMockServer {
    /// Start a new mock server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Absolute URL of the locales resource
    pub fn locales_url(&self) -> Url {
        Url::parse(&format!("{}{}", self.server.uri(), LOCALES_PATH)).unwrap()
    }

    /// Page origin the locales path resolves against
    pub fn page_origin(&self) -> String {
        format!("{}/", self.server.uri())
    }

    /// Serve `locales.json`; only requests that disable caching match
    pub async fn mock_locales(&self, config: MockResponseConfig) {
        let mut response = ResponseTemplate::new(config.status);

        if let Some(raw) = config.raw_body {
            response = response.set_body_raw(raw, "application/json");
        } else if let Some(body) = config.body {
            response = response.set_body_json(body);
        }

        if let Some(delay) = config.delay_ms {
            response = response.set_delay(Duration::from_millis(delay));
        }

        let mut mock = Mock::given(method("GET"))
            .and(path(LOCALES_PATH))
            .and(header("cache-control", "no-cache"))
            .respond_with(response);

        if let Some(expected) = config.expected_calls {
            mock = mock.expect(expected);
        }

        mock.mount(&self.server).await;
    }

    /// Serve the sample dictionary, expecting exactly `expected_calls` requests
    pub async fn mock_sample_dictionary(&self, expected_calls: u64) {
        self.mock_locales(MockResponseConfig {
            body: Some(super::sample_dictionary()),
            expected_calls: Some(expected_calls),
            ..MockResponseConfig::default()
        })
        .await;
    }

    /// Fail every request with `status`
    pub async fn mock_status(&self, status: u16, expected_calls: u64) {
        self.mock_locales(MockResponseConfig {
            status,
            expected_calls: Some(expected_calls),
            ..MockResponseConfig::default()
        })
        .await;
    }

    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }

    /// Remove all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
