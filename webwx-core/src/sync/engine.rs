// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Polling Engine
//!
//! The two-phase long-poll loop: a cheap `synccheck` per iteration, an
//! expensive `webwxsync` only when the selector asks for it, then routing
//! of the resulting batch to the reconciler and the event handlers.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::batch::ChangeBatch;
use super::key::SyncKeyTracker;
use super::retry::RetryWindow;
use super::selector::SyncSelector;
use crate::api::{EventDispatcher, WebClient, WebWxError, WebWxResult};
use crate::contact::{ContactReconciler, ReconcileReport};
use crate::network::Transport;

/// Counts of one routed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Added messages.
    pub added: usize,
    /// Explicitly modified contacts.
    pub modified: usize,
    /// Explicitly deleted contacts.
    pub deleted: usize,
    /// Reconciliation result, if the batch needed one.
    pub reconcile: Option<ReconcileReport>,
}

/// Result of one successful iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing new.
    Idle,
    /// A batch was fetched and routed.
    Synced(SyncSummary),
    /// A selector that needs no batch (profile or chat room change).
    Informational(SyncSelector),
}

/// Long-poll loop over one session.
pub struct PollingEngine<T: Transport> {
    client: WebClient<T>,
    tracker: Arc<SyncKeyTracker>,
    reconciler: ContactReconciler,
    events: EventDispatcher,
    retry: RetryWindow,
    shutdown: CancellationToken,
}

impl<T: Transport> PollingEngine<T> {
    /// Creates an engine.
    ///
    /// `shutdown` is cancelled when the expiry threshold is reached; the
    /// engine itself keeps polling until its `stop` token is cancelled.
    pub fn new(
        client: WebClient<T>,
        tracker: Arc<SyncKeyTracker>,
        reconciler: ContactReconciler,
        events: EventDispatcher,
        retry: RetryWindow,
        shutdown: CancellationToken,
    ) -> Self {
        PollingEngine {
            client,
            tracker,
            reconciler,
            events,
            retry,
            shutdown,
        }
    }

    /// Returns the retry window.
    pub fn retry_window(&self) -> &RetryWindow {
        &self.retry
    }

    /// Returns the shutdown token handed in at construction.
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    /// One poll iteration without the failure policy.
    pub async fn poll_once(&self) -> WebWxResult<PollOutcome> {
        let selector = self.client.sync_check(&self.tracker.current()).await?;
        debug!(?selector, "synccheck");

        match selector {
            SyncSelector::SessionExpired => Err(WebWxError::SessionExpired),
            SyncSelector::None => Ok(PollOutcome::Idle),
            SyncSelector::ProfileChange | SyncSelector::ChatRoomChange => {
                info!(?selector, "change without batch");
                Ok(PollOutcome::Informational(selector))
            }
            SyncSelector::MessageOrContactChange | SyncSelector::Other(_) => {
                if let SyncSelector::Other(code) = selector {
                    debug!(code, "unknown selector, syncing");
                }
                let response = self.client.sync(&self.tracker.snapshot()).await?;
                let batch = ChangeBatch::from_response(response);
                self.tracker.advance(batch.new_key.clone());
                self.route(&batch).await.map(PollOutcome::Synced)
            }
        }
    }

    /// One poll iteration with the failure policy applied.
    ///
    /// Session expiries count towards the retry window; other errors are
    /// logged and leave it untouched; success clears it.
    pub async fn iterate(&mut self) -> WebWxResult<PollOutcome> {
        let result = self.poll_once().await;
        match &result {
            Ok(_) => self.retry.reset(),
            Err(WebWxError::SessionExpired) => {
                let exhausted = self.retry.record_expiry();
                warn!(
                    count = self.retry.count(),
                    threshold = self.retry.threshold(),
                    "session expired"
                );
                if exhausted && !self.shutdown.is_cancelled() {
                    error!(
                        count = self.retry.count(),
                        "session expired repeatedly, requesting shutdown"
                    );
                    self.shutdown.cancel();
                }
            }
            Err(e) => warn!(error = %e, "poll failed"),
        }
        result
    }

    /// Polls until `stop` is cancelled.
    pub async fn run(&mut self, stop: CancellationToken) {
        info!("polling started");
        loop {
            tokio::select! {
                biased;
                _ = stop.cancelled() => break,
                _ = self.iterate() => {}
            }
            tokio::task::yield_now().await;
        }
        info!("polling stopped");
    }

    async fn route(&self, batch: &ChangeBatch) -> WebWxResult<SyncSummary> {
        let mut summary = SyncSummary {
            added: batch.added_count(),
            modified: batch.modified_count(),
            deleted: batch.deleted_count(),
            reconcile: None,
        };

        if batch.is_empty() {
            return Ok(summary);
        }

        summary.reconcile = Some(self.reconciler.reconcile(&self.client, batch).await?);

        if batch.has_messages() {
            self.events.dispatch_messages(batch)?;
        }
        if batch.has_contact_changes() {
            self.events.dispatch_contacts(batch)?;
        }

        Ok(summary)
    }
}
