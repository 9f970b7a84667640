// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cheap-poll result: the selector and its parser.
//!
//! The synccheck body is JavaScript, not JSON:
//!
//! ```text
//! window.synccheck={retcode:"0",selector:"2"}
//! ```
//!
//! Grammar accepted by [`parse_sync_check`]:
//!
//! ```text
//! reply    := [ "window.synccheck" ws "=" ws ] "{" ws retcode ws "," ws selector ws "}" [ ";" ]
//! retcode  := "retcode" ws ":" ws '"' digits '"'
//! selector := "selector" ws ":" ws '"' digits '"'
//! ```
//!
//! Before the grammar is applied the body is scanned for the literal
//! `retcode:"1101"` marker, which always means the session was logged out.

use std::sync::LazyLock;

use regex::Regex;

use crate::api::{WebWxError, WebWxResult};

/// Literal marker for a forcibly logged-out session.
pub const SESSION_EXPIRED_MARKER: &str = "retcode:\"1101\"";

static SYNC_CHECK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(?:window\.synccheck\s*=\s*)?\{\s*retcode\s*:\s*"(\d+)"\s*,\s*selector\s*:\s*"(\d+)"\s*\}\s*;?\s*$"#,
    )
    .expect("synccheck pattern is valid")
});

/// Category of pending change reported by the cheap poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncSelector {
    /// Nothing new.
    None,
    /// New messages and/or contact changes (selector 2).
    MessageOrContactChange,
    /// Own profile changed (selector 4).
    ProfileChange,
    /// Chat room metadata changed (selector 7).
    ChatRoomChange,
    /// The session was logged out (retcode 1101).
    SessionExpired,
    /// A selector code without a dedicated variant.
    Other(i64),
}

impl SyncSelector {
    /// Maps a provider selector code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => SyncSelector::None,
            2 => SyncSelector::MessageOrContactChange,
            4 => SyncSelector::ProfileChange,
            7 => SyncSelector::ChatRoomChange,
            other => SyncSelector::Other(other),
        }
    }

    /// Returns true if this selector requires an expensive poll.
    pub fn needs_sync(&self) -> bool {
        matches!(
            self,
            SyncSelector::MessageOrContactChange | SyncSelector::Other(_)
        )
    }
}

/// Parses a synccheck body.
///
/// Returns [`SyncSelector::SessionExpired`] only for the `retcode:"1101"`
/// marker, [`WebWxError::Provider`] for any other non-zero retcode and
/// [`WebWxError::Decode`] when the body does not match the grammar.
pub fn parse_sync_check(body: &str) -> WebWxResult<SyncSelector> {
    if body.contains(SESSION_EXPIRED_MARKER) {
        return Ok(SyncSelector::SessionExpired);
    }

    let captures = SYNC_CHECK_RE
        .captures(body)
        .ok_or_else(|| WebWxError::Decode(format!("malformed synccheck reply: {:?}", body)))?;

    let retcode = parse_code(&captures[1])?;
    let selector = parse_code(&captures[2])?;

    if retcode != 0 {
        return Err(WebWxError::Provider { code: retcode });
    }

    Ok(SyncSelector::from_code(selector))
}

fn parse_code(digits: &str) -> WebWxResult<i64> {
    digits
        .parse()
        .map_err(|_| WebWxError::Decode(format!("code out of range: {}", digits)))
}
