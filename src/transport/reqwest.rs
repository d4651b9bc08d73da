//! Reqwest-based HTTP transport implementation.

use super::http::{HttpTransport, HttpRequest, HttpResponse, HttpMethod};
use super::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// Reqwest-based HTTP transport.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new reqwest transport with the given timeouts.
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Connection(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }

    fn convert_headers(
        headers: HashMap<String, String>,
    ) -> Result<reqwest::header::HeaderMap, TransportError> {
        let mut header_map = reqwest::header::HeaderMap::new();
        for (key, value) in headers {
            // The value may be the API key, so only the name goes into the error.
            let name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| TransportError::InvalidHeader(key.clone()))?;
            let mut val = reqwest::header::HeaderValue::from_str(&value)
                .map_err(|_| TransportError::InvalidHeader(key.clone()))?;
            if key.eq_ignore_ascii_case(crate::auth::API_KEY_HEADER) {
                val.set_sensitive(true);
            }
            header_map.insert(name, val);
        }
        Ok(header_map)
    }

    fn extract_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = Self::convert_method(request.method);
        let headers = Self::convert_headers(request.headers)?;

        let mut req_builder = self.client
            .request(method, &request.url)
            .headers(headers);

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    // reqwest includes the URL in its message; the key may be in the query.
                    TransportError::Connection(e.without_url().to_string())
                }
            })?;

        let status = response.status().as_u16();
        let response_headers = Self::extract_headers(response.headers());
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Body(e.without_url().to_string())
            }
        })?;

        Ok(HttpResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_transport_creation() {
        let transport = ReqwestTransport::new(
            Duration::from_secs(30),
            Duration::from_secs(10),
        );
        assert!(transport.is_ok());
    }

    #[test]
    fn test_convert_headers_rejects_invalid_names() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        headers.insert("bad header".to_string(), "x".to_string());

        let result = ReqwestTransport::convert_headers(headers);
        assert_eq!(result.unwrap_err(), TransportError::InvalidHeader("bad header".to_string()));
    }

    #[test]
    fn test_invalid_api_key_header_is_not_dropped() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        headers.insert("x-goog-api-key".to_string(), "AIza\nkey".to_string());

        let error = ReqwestTransport::convert_headers(headers).unwrap_err();
        assert_eq!(error, TransportError::InvalidHeader("x-goog-api-key".to_string()));
        assert!(!error.to_string().contains("AIza"));
    }

    #[tokio::test]
    async fn test_invalid_header_fails_before_sending() {
        let transport = ReqwestTransport::new(Duration::from_secs(5), Duration::from_secs(5)).unwrap();
        let mut headers = HashMap::new();
        headers.insert("x-goog-api-key".to_string(), "AIza-key\r".to_string());

        // Port 9 is never contacted: header conversion fails first.
        let error = transport
            .send(HttpRequest {
                method: HttpMethod::Post,
                url: "http://127.0.0.1:9/v1beta/models/gemini-2.5-flash:generateContent".to_string(),
                headers,
                body: None,
            })
            .await
            .unwrap_err();

        assert_eq!(error, TransportError::InvalidHeader("x-goog-api-key".to_string()));
    }

    #[test]
    fn test_api_key_header_marked_sensitive() {
        let mut headers = HashMap::new();
        headers.insert("x-goog-api-key".to_string(), "secret".to_string());

        let map = ReqwestTransport::convert_headers(headers).unwrap();
        assert!(map.get("x-goog-api-key").unwrap().is_sensitive());
    }
}
