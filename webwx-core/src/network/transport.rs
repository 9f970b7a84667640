// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transport Trait
//!
//! Platform-agnostic abstraction for the provider's HTTP endpoints.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::error::NetworkError;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, NetworkError>;

/// HTTP method used by the provider API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET request.
    Get,
    /// POST request.
    Post,
}

/// Request body variants used by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Pre-encoded JSON document.
    Json(Vec<u8>),
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
}

/// A single provider request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully built URL including query parameters.
    pub url: Url,
    /// Optional request body.
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Creates a GET request.
    pub fn get(url: Url) -> Self {
        HttpRequest {
            method: Method::Get,
            url,
            body: None,
        }
    }

    /// Creates a POST request with a JSON body.
    pub fn post_json(url: Url, body: Vec<u8>) -> Self {
        HttpRequest {
            method: Method::Post,
            url,
            body: Some(RequestBody::Json(body)),
        }
    }

    /// Creates a POST request with form fields.
    pub fn post_form(url: Url, fields: Vec<(String, String)>) -> Self {
        HttpRequest {
            method: Method::Post,
            url,
            body: Some(RequestBody::Form(fields)),
        }
    }

    /// Returns the last path segment, which names the provider endpoint
    /// (e.g. `synccheck`, `webwxsync`).
    pub fn route(&self) -> &str {
        self.url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or("")
    }

    /// Returns the first value of a query parameter.
    pub fn query(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Returns the JSON body as text, if any.
    pub fn json_body(&self) -> Option<&str> {
        match &self.body {
            Some(RequestBody::Json(bytes)) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

/// A provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
    /// Cookies set by this response (name, value).
    pub cookies: Vec<(String, String)>,
}

impl HttpResponse {
    /// Creates a 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        HttpResponse {
            status: 200,
            body: body.into(),
            cookies: Vec::new(),
        }
    }

    /// Creates a response with an arbitrary status and empty body.
    pub fn status(status: u16) -> Self {
        HttpResponse {
            status,
            body: String::new(),
            cookies: Vec::new(),
        }
    }

    /// Adds a cookie to the response.
    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.push((name.to_string(), value.to_string()));
        self
    }

    /// Returns the value of a cookie set by this response.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true for HTTP 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Configuration for transport connections.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout. Must exceed the provider's long-poll hold time.
    pub request_timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User agent presented to the provider.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// Transport trait for provider communication.
///
/// Abstracts the HTTP client so the session and polling logic can be driven
/// by a scripted [`MockTransport`](super::MockTransport) in tests.
///
/// Implementations must keep cookies across requests: the provider hands out
/// the data ticket and session cookies during login and expects them back.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes one request and returns the raw response.
    ///
    /// Non-200 statuses are returned as responses, not errors; only failures
    /// to obtain a response at all are errors.
    async fn execute(&self, request: HttpRequest) -> TransportResult<HttpResponse>;
}
