// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wire Protocol
//!
//! Request/response types for the provider's JSON endpoints, parsers for
//! the text responses of the login flow, and the small helpers every
//! request needs (timestamps, client ids, body encoding).

mod text;
mod types;

pub use text::{parse_jslogin, parse_login_page, parse_login_status, LoginCredentials, LoginStatus};
pub use types::*;

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{WebWxError, WebWxResult};

/// Status-notify code announcing presence after login.
pub const STATUS_NOTIFY_PRESENCE: i32 = 3;

/// Status-notify code marking a conversation as read.
pub const STATUS_NOTIFY_MARK_READ: i32 = 1;

/// Current time in milliseconds since the epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Bitwise-inverted nanosecond timestamp, as sent in the `rr` field.
pub fn inverted_nanos() -> i64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0);
    !nanos
}

/// Random device id: `e` followed by 15 digits.
pub fn generate_device_id() -> String {
    let mut rng = rand::thread_rng();
    let digits: String = (0..15)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    format!("e{}", digits)
}

/// Client message id: millisecond timestamp times 10000 plus four random digits.
pub fn generate_client_msg_id() -> i64 {
    now_millis()
        .saturating_mul(10_000)
        .saturating_add(rand::thread_rng().gen_range(0..10_000))
}

/// Encodes a request body.
///
/// `serde_json` never HTML-escapes, so `&`, `<` and `>` stay literal as the
/// provider requires.
pub fn encode_body<T: Serialize>(body: &T) -> WebWxResult<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| WebWxError::InvalidInput(e.to_string()))
}

/// Decodes a JSON response body.
pub fn decode<T: DeserializeOwned>(body: &str) -> WebWxResult<T> {
    Ok(serde_json::from_str(body)?)
}

/// Maps a non-zero `BaseResponse.Ret` to a provider error.
pub fn check(base: &BaseResponse) -> WebWxResult<()> {
    if base.ret == 0 {
        Ok(())
    } else {
        Err(WebWxError::Provider { code: base.ret })
    }
}
