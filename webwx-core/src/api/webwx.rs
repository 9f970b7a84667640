// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Main WebWx API
//!
//! Wires the session store, contact directory, cursor, event dispatcher and
//! client together for one browser session.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::client::{StatusNotifyTarget, WebClient};
use super::config::WebWxConfig;
use super::error::WebWxResult;
use super::events::{BatchHandler, CallbackHandler, EventDispatcher, HandlerError};
use super::runner::SessionRunner;
use crate::contact::{Contact, ContactDirectory, ContactReconciler};
use crate::login::{LoginState, LoginStateMachine, QrArtifact};
use crate::message::{MediaKind, OutboundPayload};
use crate::network::Transport;
use crate::session::SessionStore;
use crate::sync::{ChangeBatch, PollingEngine, RetryWindow, SyncKeyTracker};

/// One web session: login, polling and outbound messages.
///
/// # Example
///
/// ```ignore
/// use webwx_core::{WebWx, WebWxConfig};
///
/// let mut wx = WebWx::with_http(WebWxConfig::default())?;
/// wx.on_messages(|batch| {
///     println!("{} new messages", batch.added_count());
///     Ok(())
/// });
/// wx.login(|qr| println!("{}", qr.terminal)).await?;
/// let runner = wx.start()?;
/// runner.wait().await?;
/// ```
pub struct WebWx<T: Transport + 'static> {
    client: WebClient<T>,
    directory: Arc<ContactDirectory>,
    tracker: Arc<SyncKeyTracker>,
    events: EventDispatcher,
    login: LoginStateMachine<T>,
}

impl<T: Transport + 'static> WebWx<T> {
    /// Creates a session over a transport.
    pub fn new(transport: T, config: WebWxConfig) -> Self {
        let store = Arc::new(SessionStore::new());
        let client = WebClient::new(Arc::new(transport), config, store);
        let directory = Arc::new(ContactDirectory::new());
        let tracker = Arc::new(SyncKeyTracker::new());
        let login = LoginStateMachine::new(
            client.clone(),
            Arc::clone(&directory),
            Arc::clone(&tracker),
        );

        WebWx {
            client,
            directory,
            tracker,
            events: EventDispatcher::new(),
            login,
        }
    }

    /// Returns a client handle for calls made outside the polling task.
    pub fn client(&self) -> WebClient<T> {
        self.client.clone()
    }

    /// Returns the shared contact directory.
    pub fn contacts(&self) -> Arc<ContactDirectory> {
        Arc::clone(&self.directory)
    }

    /// Returns a copy of one contact.
    pub fn contact(&self, identity: &str) -> Option<Contact> {
        self.directory.get(identity)
    }

    /// Returns the event dispatcher.
    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// Registers a closure for message batches.
    pub fn on_messages<F>(&self, callback: F)
    where
        F: Fn(&ChangeBatch) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let handler: Arc<dyn BatchHandler> = Arc::new(CallbackHandler::new(callback));
        self.events.set_message_handler(handler);
    }

    /// Registers a closure for contact batches.
    pub fn on_contacts<F>(&self, callback: F)
    where
        F: Fn(&ChangeBatch) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let handler: Arc<dyn BatchHandler> = Arc::new(CallbackHandler::new(callback));
        self.events.set_contact_handler(handler);
    }

    /// Current login state.
    pub fn login_state(&self) -> LoginState {
        self.login.state()
    }

    /// Returns the login state machine for step-by-step driving.
    pub fn login_machine(&mut self) -> &mut LoginStateMachine<T> {
        &mut self.login
    }

    /// Runs the full login, handing the QR code to `on_qr`.
    pub async fn login<F>(&mut self, on_qr: F) -> WebWxResult<()>
    where
        F: FnOnce(&QrArtifact),
    {
        self.login.login(on_qr).await
    }

    /// Logged-in user's identity.
    pub fn user_name(&self) -> WebWxResult<String> {
        Ok(self.client.session_store().current()?.user_name)
    }

    /// Sends a text message.
    pub async fn send_text(&self, to: &str, text: &str) -> WebWxResult<()> {
        let payload = OutboundPayload::text(text)?;
        self.client.send_message(to, &payload).await
    }

    /// Sends pre-uploaded media.
    pub async fn send_media(&self, to: &str, kind: MediaKind, media_id: &str) -> WebWxResult<()> {
        let payload = OutboundPayload::media(kind, media_id)?;
        self.client.send_message(to, &payload).await
    }

    /// Marks the conversation with `identity` as read.
    pub async fn mark_read(&self, identity: &str) -> WebWxResult<()> {
        self.client
            .status_notify(StatusNotifyTarget::MarkRead(identity.to_string()))
            .await
    }

    /// Builds a polling engine that cancels `shutdown` at the expiry threshold.
    pub fn polling_engine(&self, shutdown: CancellationToken) -> PollingEngine<T> {
        PollingEngine::new(
            self.client.clone(),
            Arc::clone(&self.tracker),
            ContactReconciler::new(Arc::clone(&self.directory)),
            self.events.clone(),
            RetryWindow::new(self.client.config().expiry_threshold),
            shutdown,
        )
    }

    /// Spawns the polling task. Requires a completed login.
    pub fn start(self) -> WebWxResult<SessionRunner<T>> {
        let engine = self.polling_engine(CancellationToken::new());
        SessionRunner::start(self.login, engine)
    }
}

#[cfg(feature = "network")]
impl WebWx<crate::network::HttpTransport> {
    /// Creates a session over the `reqwest` transport.
    pub fn with_http(config: WebWxConfig) -> WebWxResult<Self> {
        let transport = crate::network::HttpTransport::new(&config.transport)?;
        Ok(Self::new(transport, config))
    }
}
