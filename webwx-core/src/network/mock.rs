// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock Transport
//!
//! Scripted transport for tests. Responses are queued per route (the last
//! path segment of the request URL) and consumed in order.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::NetworkError;
use super::transport::{HttpRequest, HttpResponse, Transport, TransportResult};

#[derive(Default)]
struct MockState {
    scripted: HashMap<String, VecDeque<TransportResult<HttpResponse>>>,
    fallback: HashMap<String, HttpResponse>,
    sent: Vec<HttpRequest>,
}

/// Mock transport with per-route response queues.
///
/// Clones share state, so a test can keep a handle after handing the
/// transport to a client.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates an empty mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for the next request to `route`.
    pub fn queue_response(&self, route: &str, response: HttpResponse) {
        self.state
            .lock()
            .scripted
            .entry(route.to_string())
            .or_default()
            .push_back(Ok(response));
    }

    /// Queues a 200 response with the given body for `route`.
    pub fn queue_ok(&self, route: &str, body: impl Into<String>) {
        self.queue_response(route, HttpResponse::ok(body));
    }

    /// Queues a transport failure for the next request to `route`.
    pub fn inject_error(&self, route: &str, error: NetworkError) {
        self.state
            .lock()
            .scripted
            .entry(route.to_string())
            .or_default()
            .push_back(Err(error));
    }

    /// Sets the response returned for `route` once its queue is empty.
    pub fn set_fallback(&self, route: &str, response: HttpResponse) {
        self.state
            .lock()
            .fallback
            .insert(route.to_string(), response);
    }

    /// Returns all requests executed so far.
    pub fn sent_requests(&self) -> Vec<HttpRequest> {
        self.state.lock().sent.clone()
    }

    /// Returns the requests sent to one route, in order.
    pub fn requests_to(&self, route: &str) -> Vec<HttpRequest> {
        self.state
            .lock()
            .sent
            .iter()
            .filter(|r| r.route() == route)
            .cloned()
            .collect()
    }

    /// Returns how many requests were sent to `route`.
    pub fn request_count(&self, route: &str) -> usize {
        self.state
            .lock()
            .sent
            .iter()
            .filter(|r| r.route() == route)
            .count()
    }

    /// Clears the record of sent requests.
    pub fn clear_sent(&self) {
        self.state.lock().sent.clear();
    }

    /// Returns the number of scripted responses not yet consumed for `route`.
    pub fn pending(&self, route: &str) -> usize {
        self.state
            .lock()
            .scripted
            .get(route)
            .map_or(0, VecDeque::len)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        let route = request.route().to_string();
        let result = {
            let mut state = self.state.lock();
            state.sent.push(request);
            match state.scripted.get_mut(&route).and_then(VecDeque::pop_front) {
                Some(result) => result,
                None => match state.fallback.get(&route) {
                    Some(response) => Ok(response.clone()),
                    None => Err(NetworkError::Request(format!(
                        "no scripted response for {}",
                        route
                    ))),
                },
            }
        };

        // Scripted responses complete instantly; yield so a polling loop
        // driven by this transport cannot starve other tasks.
        tokio::task::yield_now().await;
        result
    }
}
