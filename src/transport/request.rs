//! HTTP request builder for the Gemini API.
//!
//! `RequestBuilder` turns an endpoint path and a serializable body into an
//! authenticated [`HttpRequest`].

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

use crate::auth::AuthManager;
use crate::error::GeminiError;
use super::http::{HttpRequest, HttpMethod};

/// Builder for constructing HTTP requests to the Gemini API.
pub struct RequestBuilder {
    base_url: Url,
    api_version: String,
    auth_manager: Box<dyn AuthManager>,
}

impl RequestBuilder {
    /// Creates a new request builder.
    ///
    /// A base URL with a path (for example a proxy mount point) is kept
    /// intact: the versioned endpoint path is appended below it.
    pub fn new(
        mut base_url: Url,
        api_version: String,
        auth_manager: Box<dyn AuthManager>,
    ) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            base_url,
            api_version,
            auth_manager,
        }
    }

    /// Builds a complete URL for the given path.
    ///
    /// # Example
    ///
    /// ```
    /// # use gemini_prompt::transport::RequestBuilder;
    /// # use gemini_prompt::auth::ApiKeyAuthManager;
    /// # use gemini_prompt::config::GeminiConfig;
    /// # use secrecy::SecretString;
    /// # let config = GeminiConfig::builder()
    /// #     .api_key(SecretString::new("test-key".into()))
    /// #     .build()
    /// #     .unwrap();
    /// # let builder = RequestBuilder::new(
    /// #     config.base_url.clone(),
    /// #     config.api_version.clone(),
    /// #     Box::new(ApiKeyAuthManager::from_config(&config)),
    /// # );
    /// let url = builder.build_url("/models/gemini-2.5-flash:generateContent").unwrap();
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
    /// );
    /// ```
    pub fn build_url(&self, path: &str) -> Result<Url, GeminiError> {
        let path = path.trim_start_matches('/');
        let full_path = format!("{}/{}", self.api_version, path);

        let mut url = self.base_url.join(&full_path)?;

        if let Some((key, value)) = self.auth_manager.get_auth_query_param() {
            url.query_pairs_mut().append_pair(&key, &value);
        }

        Ok(url)
    }

    /// Builds an HTTP request with a JSON body and authentication applied.
    pub fn build_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&T>,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Result<HttpRequest, GeminiError> {
        let url = self.build_url(path)?;

        let mut headers = HashMap::new();

        if body.is_some() {
            headers.insert("content-type".to_string(), "application/json".to_string());
        }

        if let Some((key, value)) = self.auth_manager.get_auth_header() {
            headers.insert(key, value);
        }

        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let body_bytes = match body {
            Some(body) => Some(Bytes::from(serde_json::to_vec(body)?)),
            None => None,
        };

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body: body_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKeyAuthManager;
    use crate::config::{AuthMethod, GeminiConfig};
    use secrecy::SecretString;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestBody {
        message: String,
    }

    fn create_test_builder(base_url: &str, auth_method: AuthMethod) -> RequestBuilder {
        let config = GeminiConfig::builder()
            .api_key(SecretString::new("test-api-key".into()))
            .base_url(base_url)
            .unwrap()
            .auth_method(auth_method)
            .build()
            .unwrap();

        let auth_manager = ApiKeyAuthManager::from_config(&config);

        RequestBuilder::new(
            config.base_url,
            config.api_version,
            Box::new(auth_manager),
        )
    }

    #[test]
    fn test_build_url_with_version() {
        let builder = create_test_builder("https://generativelanguage.googleapis.com", AuthMethod::Header);
        let url = builder.build_url("/models/gemini-pro:generateContent").unwrap();

        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let builder = create_test_builder("http://localhost:8080/proxy/gemini", AuthMethod::Header);
        let url = builder.build_url("/models/gemini-pro:generateContent").unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8080/proxy/gemini/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_build_url_with_query_param_auth() {
        let builder = create_test_builder("https://generativelanguage.googleapis.com", AuthMethod::QueryParam);
        let url = builder.build_url("/models").unwrap();

        assert_eq!(url.query(), Some("key=test-api-key"));
    }

    #[test]
    fn test_build_url_strips_leading_slash() {
        let builder = create_test_builder("https://generativelanguage.googleapis.com", AuthMethod::Header);
        let url1 = builder.build_url("/models").unwrap();
        let url2 = builder.build_url("models").unwrap();

        assert_eq!(url1, url2);
    }

    #[test]
    fn test_build_request_with_body_and_header_auth() {
        let builder = create_test_builder("https://generativelanguage.googleapis.com", AuthMethod::Header);
        let body = TestBody {
            message: "test".to_string(),
        };

        let request = builder.build_request(
            HttpMethod::Post,
            "/models/gemini-pro:generateContent",
            Some(&body),
            None,
        ).unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.headers.get("content-type").unwrap(), "application/json");
        assert_eq!(request.headers.get("x-goog-api-key").unwrap(), "test-api-key");
        assert_eq!(request.body.unwrap(), Bytes::from(r#"{"message":"test"}"#));
    }

    #[test]
    fn test_build_request_without_body() {
        let builder = create_test_builder("https://generativelanguage.googleapis.com", AuthMethod::Header);
        let request = builder.build_request::<TestBody>(
            HttpMethod::Get,
            "/models",
            None,
            None,
        ).unwrap();

        assert!(!request.headers.contains_key("content-type"));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_build_request_with_extra_headers() {
        let builder = create_test_builder("https://generativelanguage.googleapis.com", AuthMethod::Header);
        let mut extra = HashMap::new();
        extra.insert("x-custom-header".to_string(), "custom-value".to_string());

        let request = builder.build_request::<TestBody>(
            HttpMethod::Get,
            "/models",
            None,
            Some(extra),
        ).unwrap();

        assert_eq!(request.headers.get("x-custom-header").unwrap(), "custom-value");
    }
}
