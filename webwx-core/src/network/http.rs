// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! reqwest-backed transport for production use.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::trace;

use super::error::NetworkError;
use super::transport::{
    HttpRequest, HttpResponse, Method, RequestBody, Transport, TransportConfig, TransportResult,
};

/// HTTP transport backed by a cookie-keeping `reqwest` client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a new transport from config.
    pub fn new(config: &TransportConfig) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| NetworkError::ClientSetup(e.to_string()))?;

        Ok(HttpTransport { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        trace!(route = request.route(), method = ?request.method, "provider request");

        let mut builder = match request.method {
            Method::Get => self.client.get(request.url),
            Method::Post => self.client.post(request.url),
        };

        builder = match request.body {
            Some(RequestBody::Json(bytes)) => builder
                .header(CONTENT_TYPE, "application/json;charset=UTF-8")
                .header(ACCEPT, "application/json")
                .body(bytes),
            Some(RequestBody::Form(fields)) => builder.form(&fields),
            None => builder,
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let cookies = response
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(HttpResponse {
            status,
            body,
            cookies,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> NetworkError {
    if err.is_timeout() {
        NetworkError::Timeout
    } else {
        NetworkError::Request(err.to_string())
    }
}
