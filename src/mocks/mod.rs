//! Mock implementations for testing.
//!
//! Test doubles for the transport, authentication and generator seams so the
//! client and the runner can be exercised without a network.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::auth::{AuthManager, API_KEY_HEADER, API_KEY_QUERY_PARAM};
use crate::error::{GeminiError, GeminiResult};
use crate::runner::{Credential, GenerationRequest, GenerationResponse, GeneratorFactory, TextGenerator};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::types::FinishReason;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock HTTP transport for testing.
///
/// Tests enqueue responses up front; every `send` records the request and
/// pops the next response.
///
/// # Example
///
/// ```
/// use gemini_prompt::mocks::MockHttpTransport;
/// use gemini_prompt::transport::{HttpMethod, HttpRequest, HttpTransport};
/// use std::collections::HashMap;
///
/// # tokio_test::block_on(async {
/// let transport = MockHttpTransport::new();
/// transport.enqueue_json_response(200, r#"{"status": "ok"}"#);
///
/// let request = HttpRequest {
///     method: HttpMethod::Get,
///     url: "https://example.com".to_string(),
///     headers: HashMap::new(),
///     body: None,
/// };
///
/// let response = transport.send(request).await.unwrap();
/// assert_eq!(response.status, 200);
/// transport.verify_request_count(1);
/// # });
/// ```
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttpTransport {
    /// Create a new mock HTTP transport.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Enqueue a response to be returned by the next request.
    pub fn enqueue_response(&self, response: Result<HttpResponse, TransportError>) {
        lock(&self.responses).push_back(response);
    }

    /// Enqueue a JSON response with the given status code and body.
    pub fn enqueue_json_response(&self, status: u16, body: &str) {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        self.enqueue_response(Ok(HttpResponse {
            status,
            body: Bytes::from(body.to_string()),
            headers,
        }));
    }

    /// Enqueue a transport failure.
    pub fn enqueue_error(&self, error: TransportError) {
        self.enqueue_response(Err(error));
    }

    /// All requests sent so far.
    pub fn get_requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Assert that exactly `expected` requests were sent.
    pub fn verify_request_count(&self, expected: usize) {
        let actual = self.request_count();
        assert_eq!(actual, expected, "Expected {expected} requests, got {actual}");
    }

    /// Assert the method and part of the URL of the request at `index`.
    pub fn verify_request(&self, index: usize, method: HttpMethod, url_contains: &str) {
        let requests = lock(&self.requests);
        let request = requests
            .get(index)
            .unwrap_or_else(|| panic!("No request at index {index}"));

        assert_eq!(request.method, method);
        assert!(
            request.url.contains(url_contains),
            "Expected URL to contain '{url_contains}', got '{}'",
            request.url
        );
    }

    /// Assert a header value of the request at `index`.
    pub fn verify_header(&self, index: usize, header_name: &str, header_value: &str) {
        let requests = lock(&self.requests);
        let request = requests
            .get(index)
            .unwrap_or_else(|| panic!("No request at index {index}"));

        assert_eq!(
            request.headers.get(header_name).map(String::as_str),
            Some(header_value),
            "Unexpected value for header '{header_name}'"
        );
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request);

        lock(&self.responses).pop_front().unwrap_or_else(|| {
            Err(TransportError::Connection(
                "No response configured in MockHttpTransport".to_string(),
            ))
        })
    }
}

/// Mock authentication manager with a plain-text key.
///
/// ```
/// use gemini_prompt::mocks::MockAuthManager;
/// use gemini_prompt::auth::AuthManager;
///
/// let auth = MockAuthManager::new("test-api-key");
/// assert_eq!(
///     auth.get_auth_header(),
///     Some(("x-goog-api-key".to_string(), "test-api-key".to_string()))
/// );
/// ```
#[derive(Clone)]
pub struct MockAuthManager {
    api_key: String,
    use_header: bool,
}

impl MockAuthManager {
    /// Header authentication with the given key.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            use_header: true,
        }
    }

    /// Query parameter authentication with the given key.
    pub fn with_query_param(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            use_header: false,
        }
    }
}

impl AuthManager for MockAuthManager {
    fn get_auth_header(&self) -> Option<(String, String)> {
        self.use_header
            .then(|| (API_KEY_HEADER.to_string(), self.api_key.clone()))
    }

    fn get_auth_query_param(&self) -> Option<(String, String)> {
        (!self.use_header)
            .then(|| (API_KEY_QUERY_PARAM.to_string(), self.api_key.clone()))
    }

    fn clone_box(&self) -> Box<dyn AuthManager> {
        Box::new(self.clone())
    }
}

#[derive(Default)]
struct StubState {
    connects: AtomicUsize,
    generates: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

/// Generator factory returning a canned outcome and counting calls.
///
/// Clones share their counters, so a test can keep one handle while the
/// runner owns another.
#[derive(Clone)]
pub struct StubGeneratorFactory {
    outcome: Result<String, GeminiError>,
    state: Arc<StubState>,
}

impl StubGeneratorFactory {
    /// Every generation succeeds with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            state: Arc::default(),
        }
    }

    /// Every generation fails with `error`.
    pub fn failing(error: GeminiError) -> Self {
        Self {
            outcome: Err(error),
            state: Arc::default(),
        }
    }

    /// Number of `connect` calls.
    pub fn connect_count(&self) -> usize {
        self.state.connects.load(Ordering::SeqCst)
    }

    /// Number of `generate` calls across all generators.
    pub fn generate_count(&self) -> usize {
        self.state.generates.load(Ordering::SeqCst)
    }

    /// The request most recently passed to `generate`.
    pub fn last_request(&self) -> Option<GenerationRequest> {
        lock(&self.state.last_request).clone()
    }
}

impl GeneratorFactory for StubGeneratorFactory {
    fn connect(&self, _credential: &Credential) -> GeminiResult<Arc<dyn TextGenerator>> {
        self.state.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(self.clone()))
    }
}

#[async_trait]
impl TextGenerator for StubGeneratorFactory {
    async fn generate(&self, request: &GenerationRequest) -> GeminiResult<GenerationResponse> {
        self.state.generates.fetch_add(1, Ordering::SeqCst);
        *lock(&self.state.last_request) = Some(request.clone());

        self.outcome.clone().map(|text| GenerationResponse {
            text,
            model_version: Some(request.model().to_string()),
            finish_reason: Some(FinishReason::Stop),
            usage: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResponseError;

    fn request(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: HashMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_mock_transport_returns_in_order() {
        let transport = MockHttpTransport::new();
        transport.enqueue_json_response(200, r#"{"id": 1}"#);
        transport.enqueue_json_response(201, r#"{"id": 2}"#);

        let first = transport.send(request("https://example.com/1")).await.unwrap();
        let second = transport.send(request("https://example.com/2")).await.unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 201);
        transport.verify_request_count(2);
        transport.verify_request(1, HttpMethod::Post, "/2");
    }

    #[tokio::test]
    async fn test_mock_transport_without_response_fails() {
        let transport = MockHttpTransport::new();
        let result = transport.send(request("https://example.com")).await;

        assert!(matches!(result, Err(TransportError::Connection(_))));
    }

    #[test]
    fn test_mock_auth_manager_query_param() {
        let auth = MockAuthManager::with_query_param("test-key");

        assert!(auth.get_auth_header().is_none());
        assert_eq!(
            auth.get_auth_query_param(),
            Some(("key".to_string(), "test-key".to_string()))
        );
    }

    #[tokio::test]
    async fn test_stub_factory_counts_calls() {
        let factory = StubGeneratorFactory::failing(ResponseError::NoCandidates.into());
        let generator = factory.connect(&Credential::new("k").unwrap()).unwrap();

        assert!(generator.generate(&GenerationRequest::default()).await.is_err());
        assert_eq!(factory.connect_count(), 1);
        assert_eq!(factory.generate_count(), 1);
        assert_eq!(factory.last_request(), Some(GenerationRequest::default()));
    }
}
