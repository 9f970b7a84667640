// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Session
//!
//! Security tokens of one logged-in browser session. Written by login and
//! logout only; every authenticated call reads a copy.

use parking_lot::RwLock;
use tracing::debug;

use crate::api::{WebWxError, WebWxResult};
use crate::network::ApiEndpoints;
use crate::protocol::{BaseRequest, LoginCredentials};

/// Tokens and identity of a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// `wxsid`.
    pub sid: String,
    /// `skey`.
    pub skey: String,
    /// `pass_ticket`.
    pub pass_ticket: String,
    /// `webwx_data_ticket` cookie; empty if the provider did not set one.
    pub data_ticket: String,
    /// Numeric user id.
    pub uin: i64,
    /// Client device id, fixed for the session.
    pub device_id: String,
    /// Endpoint table for the host family chosen at login.
    pub endpoints: ApiEndpoints,
    /// Logged-in user's identity; empty until `webwxinit` returns.
    pub user_name: String,
}

impl Session {
    /// Builds a session from the new-login page credentials.
    pub fn from_credentials(
        credentials: LoginCredentials,
        data_ticket: impl Into<String>,
        device_id: impl Into<String>,
        endpoints: ApiEndpoints,
    ) -> WebWxResult<Self> {
        let uin = credentials
            .uin
            .parse::<i64>()
            .map_err(|_| WebWxError::Decode(format!("wxuin is not numeric: {}", credentials.uin)))?;
        Ok(Session {
            sid: credentials.sid,
            skey: credentials.skey,
            pass_ticket: credentials.pass_ticket,
            data_ticket: data_ticket.into(),
            uin,
            device_id: device_id.into(),
            endpoints,
            user_name: String::new(),
        })
    }

    /// Authentication block for JSON bodies.
    pub fn base_request(&self) -> BaseRequest {
        BaseRequest {
            uin: self.uin,
            sid: self.sid.clone(),
            skey: self.skey.clone(),
            device_id: self.device_id.clone(),
        }
    }
}

/// Holder of at most one live session.
#[derive(Debug, Default)]
pub struct SessionStore {
    session: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a session, replacing any previous one.
    pub fn establish(&self, session: Session) {
        debug!(host = %session.endpoints.host(), "session established");
        *self.session.write() = Some(session);
    }

    /// Copy of the live session.
    pub fn current(&self) -> WebWxResult<Session> {
        self.session.read().clone().ok_or(WebWxError::NotLoggedIn)
    }

    /// Records the logged-in user's identity.
    pub fn set_user(&self, user_name: impl Into<String>) -> WebWxResult<()> {
        match self.session.write().as_mut() {
            Some(session) => {
                session.user_name = user_name.into();
                Ok(())
            }
            None => Err(WebWxError::NotLoggedIn),
        }
    }

    /// Drops the session.
    pub fn clear(&self) {
        *self.session.write() = None;
    }

    /// Returns true if a session is installed.
    pub fn is_live(&self) -> bool {
        self.session.read().is_some()
    }
}
