// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Incremental contact reconciliation.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{is_group_identity, Contact, ContactDirectory};
use crate::api::{WebWxError, WebWxResult};
use crate::message::MessageKind;
use crate::sync::ChangeBatch;

/// Server-imposed maximum number of identities per batch profile fetch.
pub const BATCH_FETCH_LIMIT: usize = 40;

/// Marker in system messages announcing the user was removed from a group.
const REMOVED_FROM_GROUP: &str = "You were removed from";

/// Splits identities into consecutive chunks of at most `size`.
pub fn chunk_identities(identities: &[String], size: usize) -> Vec<&[String]> {
    identities.chunks(size.max(1)).collect()
}

/// Source of full profiles for a set of identities.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Fetches profiles for at most [`BATCH_FETCH_LIMIT`] identities.
    ///
    /// Returns [`WebWxError::ContactListEmpty`] when the provider has no
    /// data for any of them.
    async fn fetch_profiles(&self, identities: &[String]) -> WebWxResult<Vec<Contact>>;
}

/// Summary of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Identities requested from the fetcher.
    pub requested: usize,
    /// Profiles returned by the fetcher and upserted.
    pub fetched: usize,
    /// Explicitly modified contacts upserted.
    pub modified: usize,
    /// Explicitly deleted contacts removed.
    pub deleted: usize,
}

/// Applies change batches to the shared directory.
#[derive(Debug, Clone)]
pub struct ContactReconciler {
    directory: Arc<ContactDirectory>,
}

impl ContactReconciler {
    /// Creates a reconciler writing to `directory`.
    pub fn new(directory: Arc<ContactDirectory>) -> Self {
        ContactReconciler { directory }
    }

    /// Returns the directory this reconciler writes to.
    pub fn directory(&self) -> &Arc<ContactDirectory> {
        &self.directory
    }

    /// Identities that need a fresh profile, in first-seen order.
    ///
    /// Status-notify targets come first within each message, then the
    /// sender if it is unknown or a group with no recorded members.
    pub fn candidates(&self, batch: &ChangeBatch) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut push = |identity: &str| {
            if !identity.is_empty() && seen.insert(identity.to_string()) {
                out.push(identity.to_string());
            }
        };

        for message in &batch.added_messages {
            if message.kind() == MessageKind::StatusNotify {
                for target in message.status_notify_targets() {
                    push(target);
                }
            }

            let sender = message.from_user_name.as_str();
            if sender.is_empty() {
                continue;
            }
            match self.directory.member_count(sender) {
                None => push(sender),
                Some(0) if is_group_identity(sender) => push(sender),
                Some(_) => {}
            }
        }

        out
    }

    /// Reconciles the directory against a batch.
    ///
    /// Not atomic: chunks fetched before a failure stay applied.
    pub async fn reconcile<F>(&self, fetcher: &F, batch: &ChangeBatch) -> WebWxResult<ReconcileReport>
    where
        F: ProfileFetcher + ?Sized,
    {
        let mut report = ReconcileReport::default();

        for message in &batch.added_messages {
            if message.content.contains(REMOVED_FROM_GROUP) {
                info!(group = %message.from_user_name, "removed from group");
            }
        }

        let candidates = self.candidates(batch);
        report.requested = candidates.len();

        for chunk in chunk_identities(&candidates, BATCH_FETCH_LIMIT) {
            match fetcher.fetch_profiles(chunk).await {
                Ok(profiles) => {
                    report.fetched += self.directory.upsert_all(profiles);
                }
                Err(WebWxError::ContactListEmpty) => {
                    debug!(size = chunk.len(), "batch fetch returned no contacts");
                }
                Err(e) => return Err(e),
            }
        }

        report.modified = self
            .directory
            .upsert_all(batch.modified_contacts.iter().cloned());

        for contact in &batch.deleted_contacts {
            self.directory.remove(contact.identity());
            report.deleted += 1;
        }

        debug!(
            requested = report.requested,
            fetched = report.fetched,
            modified = report.modified,
            deleted = report.deleted,
            "reconciled contacts"
        );
        Ok(report)
    }
}
