// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Login
//!
//! QR-code login as an explicit state machine:
//!
//! ```text
//! Unauthenticated → UuidIssued → QrPresented → ScanPending → Authenticated
//!     → Initialized → NotifyingPresence → Ready → LoggedOut
//! ```
//!
//! Steps cannot be skipped. Any failing step clears the session, the
//! contact directory and the cursor, and returns the machine to
//! `Unauthenticated`. An expired UUID fails the login; no new UUID is
//! requested.

mod qr;

pub use qr::QrArtifact;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{StatusNotifyTarget, WebClient, WebWxError, WebWxResult};
use crate::contact::ContactDirectory;
use crate::network::Transport;
use crate::protocol::LoginStatus;
use crate::sync::SyncKeyTracker;

/// Login lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// No session.
    Unauthenticated,
    /// A login UUID was issued.
    UuidIssued,
    /// The QR code was handed to the caller.
    QrPresented,
    /// Waiting for the phone to scan and confirm.
    ScanPending,
    /// Scan confirmed; redirect target known.
    Authenticated,
    /// Session tokens, cursor and contacts loaded.
    Initialized,
    /// Announcing presence.
    NotifyingPresence,
    /// Ready for polling.
    Ready,
    /// Logged out.
    LoggedOut,
}

/// Drives one login.
pub struct LoginStateMachine<T: Transport> {
    client: WebClient<T>,
    directory: Arc<ContactDirectory>,
    tracker: Arc<SyncKeyTracker>,
    state: LoginState,
    uuid: Option<String>,
    redirect_uri: Option<String>,
}

impl<T: Transport> LoginStateMachine<T> {
    /// Creates a machine in `Unauthenticated`.
    pub fn new(
        client: WebClient<T>,
        directory: Arc<ContactDirectory>,
        tracker: Arc<SyncKeyTracker>,
    ) -> Self {
        LoginStateMachine {
            client,
            directory,
            tracker,
            state: LoginState::Unauthenticated,
            uuid: None,
            redirect_uri: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> LoginState {
        self.state
    }

    /// UUID issued by the last `request_uuid`.
    pub fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    /// Requests a login UUID.
    pub async fn request_uuid(&mut self) -> WebWxResult<String> {
        self.expect_state(&[LoginState::Unauthenticated, LoginState::LoggedOut], "request_uuid")?;

        let uuid = self
            .client
            .request_uuid()
            .await
            .map_err(|e| self.abort(e))?;
        info!(uuid = %uuid, "login uuid issued");
        self.uuid = Some(uuid.clone());
        self.state = LoginState::UuidIssued;
        Ok(uuid)
    }

    /// Renders the QR code for the issued UUID.
    pub fn present_qr(&mut self) -> WebWxResult<QrArtifact> {
        self.expect_state(&[LoginState::UuidIssued], "present_qr")?;

        let uuid = self.uuid.clone().unwrap_or_default();
        let artifact =
            QrArtifact::generate(&self.client.config().qr_base, &uuid).map_err(|e| self.abort(e))?;
        self.state = LoginState::QrPresented;
        Ok(artifact)
    }

    /// Polls the login status until the scan is confirmed.
    ///
    /// Fails with [`WebWxError::UuidExpired`] if the provider expires the
    /// UUID and with [`WebWxError::LoginTimeout`] once the configured scan
    /// timeout elapses.
    pub async fn await_confirmation(&mut self) -> WebWxResult<()> {
        self.expect_state(&[LoginState::QrPresented], "await_confirmation")?;
        self.state = LoginState::ScanPending;

        let uuid = self.uuid.clone().unwrap_or_default();
        let timeout = self.client.config().scan_timeout;
        let outcome = tokio::time::timeout(timeout, self.poll_login_status(&uuid)).await;

        let redirect_uri = match outcome {
            Ok(Ok(redirect_uri)) => redirect_uri,
            Ok(Err(e)) => return Err(self.abort(e)),
            Err(_) => return Err(self.abort(WebWxError::LoginTimeout)),
        };

        info!("login confirmed");
        self.redirect_uri = Some(redirect_uri);
        self.state = LoginState::Authenticated;
        Ok(())
    }

    /// Establishes the session, seeds the cursor and loads the contacts.
    pub async fn initialize(&mut self) -> WebWxResult<()> {
        self.expect_state(&[LoginState::Authenticated], "initialize")?;

        let redirect_uri = self.redirect_uri.clone().unwrap_or_default();
        match self.bootstrap(&redirect_uri).await {
            Ok(()) => {
                self.state = LoginState::Initialized;
                Ok(())
            }
            Err(e) => Err(self.abort(e)),
        }
    }

    /// Announces presence. A failure aborts the login.
    pub async fn notify_presence(&mut self) -> WebWxResult<()> {
        self.expect_state(&[LoginState::Initialized], "notify_presence")?;
        self.state = LoginState::NotifyingPresence;

        self.client
            .status_notify(StatusNotifyTarget::Presence)
            .await
            .map_err(|e| self.abort(e))?;

        info!(contacts = self.directory.len(), "session ready");
        self.state = LoginState::Ready;
        Ok(())
    }

    /// Logs out. The provider call is best effort; local state is always
    /// cleared.
    pub async fn logout(&mut self) -> WebWxResult<()> {
        self.expect_state(&[LoginState::Ready], "logout")?;

        if let Err(e) = self.client.logout().await {
            warn!(error = %e, "logout request failed");
        }
        self.client.session_store().clear();
        self.tracker.reset();
        self.state = LoginState::LoggedOut;
        info!("logged out");
        Ok(())
    }

    /// Runs every step in order, handing the QR code to `on_qr`.
    pub async fn login<F>(&mut self, on_qr: F) -> WebWxResult<()>
    where
        F: FnOnce(&QrArtifact),
    {
        self.request_uuid().await?;
        let artifact = self.present_qr()?;
        on_qr(&artifact);
        self.await_confirmation().await?;
        self.initialize().await?;
        self.notify_presence().await
    }

    async fn poll_login_status(&self, uuid: &str) -> WebWxResult<String> {
        let mut tip = true;
        loop {
            match self.client.check_login(uuid, tip).await? {
                LoginStatus::Waiting => debug!("waiting for scan"),
                LoginStatus::Scanned => {
                    if tip {
                        info!("scanned, waiting for confirmation");
                    }
                    tip = false;
                }
                LoginStatus::Confirmed { redirect_uri } => return Ok(redirect_uri),
                LoginStatus::Expired => return Err(WebWxError::UuidExpired),
                LoginStatus::Other(code) => return Err(WebWxError::Provider { code }),
            }
        }
    }

    async fn bootstrap(&self, redirect_uri: &str) -> WebWxResult<()> {
        let session = self.client.new_login_page(redirect_uri).await?;
        self.client.session_store().establish(session);

        let init = self.client.webwx_init().await?;
        self.client.session_store().set_user(init.user.user_name.clone())?;
        self.tracker.advance(init.sync_key);
        let recent = self.directory.upsert_all(init.contact_list);
        debug!(user = %init.user.user_name, recent, "webwxinit");

        let mut seq = 0;
        loop {
            let page = self.client.get_contacts(seq).await?;
            let loaded = self.directory.upsert_all(page.member_list);
            debug!(seq, loaded, next = page.seq, "contact page");
            if page.seq == 0 || page.seq == seq {
                break;
            }
            seq = page.seq;
        }
        Ok(())
    }

    fn expect_state(&self, allowed: &[LoginState], step: &str) -> WebWxResult<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(WebWxError::InvalidState(format!(
                "{} called in state {:?}",
                step, self.state
            )))
        }
    }

    fn abort(&mut self, error: WebWxError) -> WebWxError {
        warn!(error = %error, state = ?self.state, "login aborted");
        self.client.session_store().clear();
        self.directory.clear();
        self.tracker.reset();
        self.uuid = None;
        self.redirect_uri = None;
        self.state = LoginState::Unauthenticated;
        error
    }
}
