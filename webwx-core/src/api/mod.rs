// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! WebWx API Layer
//!
//! High-level API for one emulated browser session.
//!
//! # Overview
//!
//! The API layer coordinates:
//! - QR-code login and session bootstrap
//! - The background long-poll task and its shutdown
//! - Delivery of change batches to application callbacks
//! - Outbound messages and read markers
//!
//! # Module Structure
//!
//! - [`error`] - Error types for the API layer
//! - [`config`] - Configuration types
//! - [`events`] - Batch handlers and their dispatcher
//! - [`client`] - Request building for every provider endpoint
//! - [`runner`] - Polling task ownership and shutdown
//! - [`webwx`] - Main WebWx orchestrator

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod runner;
pub mod webwx;

pub use client::{StatusNotifyTarget, WebClient};
pub use config::WebWxConfig;
pub use error::{WebWxError, WebWxResult};
pub use events::{BatchHandler, CallbackHandler, EventDispatcher, HandlerError};
pub use runner::{RunSummary, SessionRunner};
pub use webwx::WebWx;
