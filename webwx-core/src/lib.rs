// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! WebWx Core Library
//!
//! Emulates a logged-in web browser session against the web IM provider:
//! QR-code login, session tokens, and a two-phase long-poll that keeps a
//! local contact directory in step with the server.

pub mod api;
pub mod contact;
pub mod login;
pub mod message;
pub mod network;
pub mod protocol;
pub mod session;
pub mod sync;

pub use api::{
    BatchHandler, CallbackHandler, EventDispatcher, HandlerError, RunSummary, SessionRunner,
    StatusNotifyTarget, WebClient, WebWx, WebWxConfig, WebWxError, WebWxResult,
};
pub use contact::{Contact, ContactDirectory, ContactReconciler, ProfileFetcher, ReconcileReport};
pub use login::{LoginState, LoginStateMachine, QrArtifact};
pub use message::{Message, MessageKind, MediaKind, OutboundPayload};
pub use network::{HttpResponse, MockTransport, NetworkError, Transport};
pub use session::{Session, SessionStore};
pub use sync::{
    parse_sync_check, ChangeBatch, PollOutcome, PollingEngine, RetryWindow, SyncKey,
    SyncKeyTracker, SyncSelector,
};
