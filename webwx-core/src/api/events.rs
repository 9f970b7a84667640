// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event System
//!
//! Delivery of change batches to the embedding application.

use std::sync::Arc;

use parking_lot::RwLock;

use super::error::{WebWxError, WebWxResult};
use crate::sync::ChangeBatch;

/// Error returned by a batch handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError(pub String);

impl HandlerError {
    /// Creates a handler error with a description.
    pub fn new(message: impl Into<String>) -> Self {
        HandlerError(message.into())
    }
}

impl From<HandlerError> for WebWxError {
    fn from(err: HandlerError) -> Self {
        WebWxError::Handler(err.0)
    }
}

/// Batch handler trait.
///
/// Called synchronously from the polling task; a slow handler delays the
/// next poll.
pub trait BatchHandler: Send + Sync {
    /// Called with a change batch.
    fn on_batch(&self, batch: &ChangeBatch) -> Result<(), HandlerError>;
}

/// Closure-based batch handler.
pub struct CallbackHandler<F>
where
    F: Fn(&ChangeBatch) -> Result<(), HandlerError> + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(&ChangeBatch) -> Result<(), HandlerError> + Send + Sync,
{
    /// Creates a new callback handler.
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> BatchHandler for CallbackHandler<F>
where
    F: Fn(&ChangeBatch) -> Result<(), HandlerError> + Send + Sync,
{
    fn on_batch(&self, batch: &ChangeBatch) -> Result<(), HandlerError> {
        (self.callback)(batch)
    }
}

#[derive(Default)]
struct Handlers {
    messages: Option<Arc<dyn BatchHandler>>,
    contacts: Option<Arc<dyn BatchHandler>>,
}

/// Holds at most one handler per batch kind.
///
/// Clones share the same registrations.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Arc<RwLock<Handlers>>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message-batch handler, replacing any previous one.
    pub fn set_message_handler(&self, handler: Arc<dyn BatchHandler>) {
        self.handlers.write().messages = Some(handler);
    }

    /// Sets the contact-batch handler, replacing any previous one.
    pub fn set_contact_handler(&self, handler: Arc<dyn BatchHandler>) {
        self.handlers.write().contacts = Some(handler);
    }

    /// Removes all handlers.
    pub fn clear_handlers(&self) {
        let mut handlers = self.handlers.write();
        handlers.messages = None;
        handlers.contacts = None;
    }

    /// Returns the number of registered handlers (0 to 2).
    pub fn handler_count(&self) -> usize {
        let handlers = self.handlers.read();
        usize::from(handlers.messages.is_some()) + usize::from(handlers.contacts.is_some())
    }

    /// Delivers a batch to the message handler, if any.
    pub fn dispatch_messages(&self, batch: &ChangeBatch) -> WebWxResult<()> {
        let handler = self.handlers.read().messages.clone();
        match handler {
            Some(handler) => Ok(handler.on_batch(batch)?),
            None => Ok(()),
        }
    }

    /// Delivers a batch to the contact handler, if any.
    pub fn dispatch_contacts(&self, batch: &ChangeBatch) -> WebWxResult<()> {
        let handler = self.handlers.read().contacts.clone();
        match handler {
            Some(handler) => Ok(handler.on_batch(batch)?),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handler_count())
            .finish()
    }
}
