// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Error Types
//!
//! Unified error type for webwx operations.

use thiserror::Error;

use crate::network::NetworkError;

/// Unified error type for webwx operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebWxError {
    /// Network/HTTP-level failure.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// Malformed response body.
    #[error("decode error: {0}")]
    Decode(String),

    /// The provider answered with a non-zero `BaseResponse.Ret` (or an
    /// equivalent status code in a text response).
    #[error("provider error: code {code}")]
    Provider {
        /// Provider error code, surfaced verbatim.
        code: i64,
    },

    /// The cheap poll reported that the session was logged out.
    #[error("session expired")]
    SessionExpired,

    /// Caller supplied invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A batch contact fetch returned no contacts.
    #[error("contact list empty")]
    ContactListEmpty,

    /// The login UUID expired before the scan was confirmed.
    #[error("login uuid expired")]
    UuidExpired,

    /// The scan was not confirmed within the configured time.
    #[error("login timed out")]
    LoginTimeout,

    /// Operation called in the wrong lifecycle state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// No live session.
    #[error("not logged in")]
    NotLoggedIn,

    /// An event handler reported a failure.
    #[error("handler error: {0}")]
    Handler(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The background polling task failed to join.
    #[error("task error: {0}")]
    Task(String),
}

impl WebWxError {
    /// Returns the provider code for provider errors.
    pub fn provider_code(&self) -> Option<i64> {
        match self {
            WebWxError::Provider { code } => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for WebWxError {
    fn from(err: serde_json::Error) -> Self {
        WebWxError::Decode(err.to_string())
    }
}

/// Result type for webwx operations.
pub type WebWxResult<T> = Result<T, WebWxError>;
