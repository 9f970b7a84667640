// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Module
//!
//! Long-poll synchronization with the provider.
//!
//! # Components
//!
//! - **SyncKey / SyncKeyTracker**: the provider's opaque stream cursor
//! - **parse_sync_check**: the cheap-poll reply parser
//! - **ChangeBatch**: one expensive-poll result
//! - **RetryWindow**: consecutive session-expiry counter
//! - **PollingEngine**: the loop tying them together

mod batch;
mod engine;
mod key;
mod retry;
mod selector;

pub use batch::ChangeBatch;
pub use engine::{PollOutcome, PollingEngine, SyncSummary};
pub use key::{SyncKey, SyncKeyEntry, SyncKeyTracker};
pub use retry::{RetryWindow, DEFAULT_EXPIRY_THRESHOLD};
pub use selector::{parse_sync_check, SyncSelector, SESSION_EXPIRED_MARKER};
