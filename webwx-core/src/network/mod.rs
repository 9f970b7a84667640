// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network + Transport Layer
//!
//! Provides the transport abstraction used to reach the provider's
//! browser-facing endpoints.
//!
//! # Architecture
//!
//! - **Transport trait**: executes one HTTP request and returns the raw response
//! - **Endpoints**: URL table for the host family chosen at login
//! - **HttpTransport**: cookie-keeping `reqwest` client (feature `network`)
//! - **MockTransport**: scripted per-route responses for tests
//!
//! # Example
//!
//! ```ignore
//! use webwx_core::network::{MockTransport, HttpResponse};
//!
//! let transport = MockTransport::new();
//! transport.queue_ok("synccheck", r#"window.synccheck={retcode:"0",selector:"2"}"#);
//! ```

mod endpoints;
mod error;
#[cfg(feature = "network")]
mod http;
mod mock;
mod transport;

pub use endpoints::ApiEndpoints;
pub use error::NetworkError;
#[cfg(feature = "network")]
pub use http::HttpTransport;
pub use mock::MockTransport;
pub use transport::{
    HttpRequest, HttpResponse, Method, RequestBody, Transport, TransportConfig, TransportResult,
};
