// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Change batches produced by the expensive poll.

use crate::contact::Contact;
use crate::message::Message;
use crate::protocol::SyncResponse;

use super::SyncKey;

/// One unit of synchronized data.
///
/// Routing is gated on the counts the provider reports (`AddMsgCount`,
/// `ModContactCount`, `DelContactCount`), not on the list lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBatch {
    /// Provider-reported number of added messages.
    pub add_msg_count: usize,
    /// Provider-reported number of modified contacts.
    pub mod_contact_count: usize,
    /// Provider-reported number of deleted contacts.
    pub del_contact_count: usize,
    /// Added messages, in provider order.
    pub added_messages: Vec<Message>,
    /// Explicitly modified contacts.
    pub modified_contacts: Vec<Contact>,
    /// Explicitly deleted contacts.
    pub deleted_contacts: Vec<Contact>,
    /// Cursor to continue from.
    pub new_key: SyncKey,
}

impl ChangeBatch {
    /// Builds a batch from a sync response.
    ///
    /// The cheap-poll cursor (`SyncCheckKey`) is preferred; the full
    /// `SyncKey` is used when the provider omits it.
    pub fn from_response(response: SyncResponse) -> Self {
        let new_key = if response.sync_check_key.is_empty() {
            response.sync_key
        } else {
            response.sync_check_key
        };
        ChangeBatch {
            add_msg_count: response.add_msg_count,
            mod_contact_count: response.mod_contact_count,
            del_contact_count: response.del_contact_count,
            added_messages: response.add_msg_list,
            modified_contacts: response.mod_contact_list,
            deleted_contacts: response.del_contact_list,
            new_key,
        }
    }

    /// Number of added messages.
    pub fn added_count(&self) -> usize {
        self.add_msg_count
    }

    /// Number of modified contacts.
    pub fn modified_count(&self) -> usize {
        self.mod_contact_count
    }

    /// Number of deleted contacts.
    pub fn deleted_count(&self) -> usize {
        self.del_contact_count
    }

    /// True if the provider reported added messages.
    pub fn has_messages(&self) -> bool {
        self.add_msg_count > 0
    }

    /// True if the provider reported contact modifications or deletions.
    pub fn has_contact_changes(&self) -> bool {
        self.mod_contact_count > 0 || self.del_contact_count > 0
    }

    /// True if the batch carries nothing to route.
    pub fn is_empty(&self) -> bool {
        !self.has_messages() && !self.has_contact_changes()
    }
}
