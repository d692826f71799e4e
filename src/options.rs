use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;

/// Per-request options: method, headers, JSON body and timeout.
///
/// Defaults to `GET` with `Content-Type: application/json` and the configured
/// timeout. Headers set by the caller replace defaults of the same name.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    /// Overrides the configured timeout when set.
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Self {
            method: Method::GET,
            headers,
            body: None,
            timeout: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self::default().with_method(Method::POST).with_body(body)
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds `Authorization: Bearer <token>`.
    ///
    /// If the token already carries the `Bearer ` prefix it is kept as is.
    /// Tokens that are not valid header values are ignored.
    pub fn with_bearer(self, token: &str) -> Self {
        match HeaderValue::from_str(&normalize_bearer_authorization(token)) {
            Ok(value) => self.with_header(header::AUTHORIZATION, value),
            Err(_) => self,
        }
    }
}

fn normalize_bearer_authorization(token: &str) -> String {
    let trimmed = token.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}
