//! HTTP response parser for the Gemini API.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{map_http_status_with_body, GeminiError, RateLimitError, ResponseError, ServerError};
use super::http::HttpResponse;

/// Parser for HTTP responses from the Gemini API.
///
/// Handles successful response deserialization, error response mapping and
/// `Retry-After` / request-id extraction.
pub struct ResponseParser;

impl ResponseParser {
    /// Parses a successful HTTP response into the expected type.
    ///
    /// # Example
    ///
    /// ```
    /// use gemini_prompt::transport::{ResponseParser, HttpResponse};
    /// use bytes::Bytes;
    /// use serde::Deserialize;
    /// use std::collections::HashMap;
    ///
    /// #[derive(Deserialize)]
    /// struct ModelResponse {
    ///     name: String,
    /// }
    ///
    /// let response = HttpResponse {
    ///     status: 200,
    ///     headers: HashMap::new(),
    ///     body: Bytes::from(r#"{"name":"gemini-2.5-flash"}"#),
    /// };
    ///
    /// let parsed: ModelResponse = ResponseParser::parse_response(response).unwrap();
    /// assert_eq!(parsed.name, "gemini-2.5-flash");
    /// ```
    pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, GeminiError> {
        if !response.is_success() {
            return Err(Self::parse_error_response(&response));
        }

        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Err(ResponseError::DeserializationError {
                message: "empty response body".to_string(),
            }
            .into());
        }

        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Maps an error response to a `GeminiError`, filling in `Retry-After`.
    pub fn parse_error_response(response: &HttpResponse) -> GeminiError {
        let retry_after = Self::parse_retry_after(&response.headers);
        let mut error = map_http_status_with_body(response.status, &response.body);

        match &mut error {
            GeminiError::RateLimit(
                RateLimitError::TooManyRequests { retry_after: ra }
                | RateLimitError::QuotaExceeded { retry_after: ra, .. },
            )
            | GeminiError::Server(ServerError::ServiceUnavailable { retry_after: ra, .. }) => {
                *ra = retry_after;
            }
            _ => {}
        }

        tracing::debug!(
            request_id = Self::extract_request_id(&response.headers).as_deref().unwrap_or("-"),
            status = response.status,
            error = %error,
            "API error response"
        );

        error
    }

    /// Parses the `Retry-After` header (delay in seconds).
    ///
    /// ```
    /// use gemini_prompt::transport::ResponseParser;
    /// use std::collections::HashMap;
    /// use std::time::Duration;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert("retry-after".to_string(), "60".to_string());
    ///
    /// assert_eq!(ResponseParser::parse_retry_after(&headers), Some(Duration::from_secs(60)));
    /// ```
    pub fn parse_retry_after(headers: &HashMap<String, String>) -> Option<Duration> {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("retry-after"))
            .and_then(|(_, value)| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Extracts the request ID from response headers for debugging.
    pub fn extract_request_id(headers: &HashMap<String, String>) -> Option<String> {
        const REQUEST_ID_HEADERS: [&str; 3] = ["x-request-id", "x-goog-request-id", "request-id"];

        headers
            .iter()
            .find(|(key, _)| REQUEST_ID_HEADERS.iter().any(|h| key.eq_ignore_ascii_case(h)))
            .map(|(_, value)| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthenticationError, RequestError};
    use bytes::Bytes;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct TestResponse {
        name: String,
        value: i32,
    }

    fn create_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_parse_successful_response() {
        let response = create_response(200, r#"{"name":"test","value":42}"#);
        let parsed: TestResponse = ResponseParser::parse_response(response).unwrap();

        assert_eq!(parsed, TestResponse { name: "test".to_string(), value: 42 });
    }

    #[test]
    fn test_parse_empty_body_is_response_error() {
        let response = create_response(200, "  ");
        let error = ResponseParser::parse_response::<TestResponse>(response).unwrap_err();

        assert!(matches!(error, GeminiError::Response(ResponseError::DeserializationError { .. })));
    }

    #[test]
    fn test_parse_malformed_body_is_response_error() {
        let response = create_response(200, "<html>gateway</html>");
        let error = ResponseParser::parse_response::<TestResponse>(response).unwrap_err();

        assert!(matches!(error, GeminiError::Response(ResponseError::DeserializationError { .. })));
    }

    #[test]
    fn test_parse_400_validation_error() {
        let response = create_response(400, r#"{"error":{"message":"Invalid request"}}"#);
        let error = ResponseParser::parse_response::<TestResponse>(response).unwrap_err();

        assert!(matches!(error, GeminiError::Request(RequestError::ValidationError { .. })));
    }

    #[test]
    fn test_parse_401_auth_error() {
        let response = create_response(401, r#"{"error":{"message":"Invalid API key"}}"#);
        let error = ResponseParser::parse_response::<TestResponse>(response).unwrap_err();

        assert!(matches!(error, GeminiError::Authentication(AuthenticationError::InvalidApiKey { .. })));
    }

    #[test]
    fn test_parse_429_rate_limit_with_retry_after() {
        let mut headers = HashMap::new();
        headers.insert("Retry-After".to_string(), "60".to_string());

        let response = HttpResponse {
            status: 429,
            headers,
            body: Bytes::from(r#"{"error":{"message":"Too many requests"}}"#),
        };

        let error = ResponseParser::parse_response::<TestResponse>(response).unwrap_err();

        match error {
            GeminiError::RateLimit(rate_limit) => {
                assert_eq!(rate_limit.retry_after(), Some(Duration::from_secs(60)));
            }
            other => panic!("expected rate limit error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_503_service_unavailable() {
        let response = create_response(503, r#"{"error":{"message":"Service unavailable"}}"#);
        let error = ResponseParser::parse_response::<TestResponse>(response).unwrap_err();

        assert!(matches!(error, GeminiError::Server(ServerError::ServiceUnavailable { .. })));
    }

    #[test]
    fn test_parse_retry_after_missing() {
        assert_eq!(ResponseParser::parse_retry_after(&HashMap::new()), None);
    }

    #[test]
    fn test_extract_request_id_variants() {
        let mut headers = HashMap::new();
        headers.insert("X-Goog-Request-Id".to_string(), "goog123".to_string());

        assert_eq!(ResponseParser::extract_request_id(&headers), Some("goog123".to_string()));
        assert_eq!(ResponseParser::extract_request_id(&HashMap::new()), None);
    }
}
