//! Session-holding HTTP client for the API suite
//!
//! Wraps a single `reqwest::Client` (with its cookie store) plus a
//! persistent header map, so a bearer token set once applies to every
//! later request on the same instance.

#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, Method, RequestBuilder,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// API client holding session state for one scenario
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    default_headers: HeaderMap,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new client for `base_url`
    ///
    /// No request timeout is configured; the library default applies.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            default_headers: HeaderMap::new(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Set the bearer token applied to all later requests
    pub fn set_auth_token(&mut self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .context("Invalid bearer token")?;
        self.default_headers.insert(AUTHORIZATION, value);
        self.token = Some(token);
        Ok(())
    }

    /// Build full URL (plain concatenation of base URL and endpoint)
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send GET request
    pub async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<HttpResponse> {
        let mut request = self.request(Method::GET, endpoint);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(Method::GET, endpoint, request).await
    }

    /// Send POST request
    pub async fn post(&self, endpoint: &str, body: RequestBody) -> Result<HttpResponse> {
        let request = body.apply(self.request(Method::POST, endpoint));
        self.execute(Method::POST, endpoint, request).await
    }

    /// Send PUT request
    pub async fn put(&self, endpoint: &str, body: RequestBody) -> Result<HttpResponse> {
        let request = body.apply(self.request(Method::PUT, endpoint));
        self.execute(Method::PUT, endpoint, request).await
    }

    /// Send DELETE request
    pub async fn delete(&self, endpoint: &str) -> Result<HttpResponse> {
        let request = self.request(Method::DELETE, endpoint);
        self.execute(Method::DELETE, endpoint, request).await
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(endpoint))
            .headers(self.default_headers.clone())
    }

    async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<HttpResponse> {
        debug!("Sending {} request to {}", method, self.url(endpoint));

        let start = Instant::now();
        let response = request
            .send()
            .await
            .with_context(|| format!("{method} {endpoint} failed"))?;
        let elapsed = start.elapsed();

        let status = response.status();

        let headers = collect_headers(response.headers());

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            elapsed.as_millis()
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            headers,
            body,
            elapsed,
        })
    }
}

/// Flatten a header map; repeated headers are joined with ", " and
/// non-UTF-8 bytes are replaced lossily
fn collect_headers(map: &HeaderMap) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = HashMap::new();
    for (key, value) in map {
        let value = String::from_utf8_lossy(value.as_bytes());
        headers
            .entry(key.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    headers
}

/// Optional request payload
#[derive(Clone, Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
}

impl RequestBody {
    fn apply(self, request: RequestBuilder) -> RequestBuilder {
        match self {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Form(fields) => request.form(&fields),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

/// Raw HTTP response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    /// Header names are stored lower-cased
    pub headers: HashMap<String, String>,
    pub body: String,
    pub elapsed: Duration,
}

impl HttpResponse {
    pub fn status(&self) -> u16 {
        self.status_code
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).with_context(|| {
            format!(
                "Response body is not JSON (status {}): {}",
                self.status_code, self.body
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status_code: u16, headers: &[(&str, &str)], body: &str) -> HttpResponse {
        HttpResponse {
            status_code,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.to_string(),
            elapsed: Duration::from_millis(42),
        }
    }

    #[test]
    fn test_url_concatenation() {
        let client = ApiClient::new("https://api.example.com/v1").unwrap();
        assert_eq!(
            client.url("/users/12345"),
            "https://api.example.com/v1/users/12345"
        );
    }

    #[test]
    fn test_auth_token_persists() {
        let mut client = ApiClient::new("http://localhost").unwrap();
        assert!(client.token().is_none());

        client.set_auth_token("a.b.c").unwrap();
        assert_eq!(client.token(), Some("a.b.c"));
        assert_eq!(
            client.default_headers.get(AUTHORIZATION).unwrap(),
            "Bearer a.b.c"
        );

        // Clones share the header map state at the time of cloning
        let copy = client.clone();
        assert_eq!(copy.token(), Some("a.b.c"));
    }

    #[test]
    fn test_invalid_token_rejected() {
        let mut client = ApiClient::new("http://localhost").unwrap();
        assert!(client.set_auth_token("bad\ntoken").is_err());
        assert!(client.token().is_none());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let resp = response(201, &[("location", "/v1/users/7")], "{}");
        assert_eq!(resp.header("Location"), Some("/v1/users/7"));
        assert!(resp.has_header("LOCATION"));
        assert!(!resp.has_header("Retry-After"));
    }

    #[test]
    fn test_json_body() {
        let resp = response(200, &[], r#"{"id": 12345}"#);
        assert_eq!(resp.json().unwrap()["id"], 12345);

        let empty = response(204, &[], "");
        assert!(empty.is_empty());
        assert!(empty.json().is_err());
    }

    #[test]
    fn test_repeated_headers_are_joined() {
        let mut map = HeaderMap::new();
        map.append("set-cookie", HeaderValue::from_static("session=1"));
        map.append("set-cookie", HeaderValue::from_static("remember_me=1"));
        map.insert("x-raw", HeaderValue::from_bytes(b"caf\xe9").unwrap());

        let headers = collect_headers(&map);
        assert_eq!(headers["set-cookie"], "session=1, remember_me=1");
        assert_eq!(headers["x-raw"], "caf\u{fffd}");
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        tokio_test::assert_err!(client.get("/products", &[]).await);
    }
}
