// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network Error Types

use thiserror::Error;

/// Transport-level failures.
///
/// These never carry provider semantics: a request that reached the provider
/// and came back with a non-zero `BaseResponse.Ret` is a
/// [`WebWxError::Provider`](crate::WebWxError::Provider), not a network error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The request could not be sent or the response could not be read.
    #[error("Request failed: {0}")]
    Request(String),

    /// The request did not complete in time.
    #[error("Request timeout")]
    Timeout,

    /// The provider answered with a non-200 HTTP status.
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// A URL could not be built or parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("Client setup failed: {0}")]
    ClientSetup(String),
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        NetworkError::InvalidUrl(err.to_string())
    }
}
