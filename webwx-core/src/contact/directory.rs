// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared contact directory.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::Contact;

/// Identity → profile map shared between the polling task and readers.
///
/// The polling task is the only writer during normal operation; the initial
/// bulk load writes once before polling starts. Readers get clones.
#[derive(Debug, Default)]
pub struct ContactDirectory {
    contacts: RwLock<HashMap<String, Contact>>,
}

impl ContactDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the contact for an identity.
    pub fn get(&self, identity: &str) -> Option<Contact> {
        self.contacts.read().get(identity).cloned()
    }

    /// Returns true if the identity is known.
    pub fn contains(&self, identity: &str) -> bool {
        self.contacts.read().contains_key(identity)
    }

    /// Returns the recorded member count of an identity, if known.
    pub fn member_count(&self, identity: &str) -> Option<u32> {
        self.contacts.read().get(identity).map(|c| c.member_count)
    }

    /// Inserts or replaces a contact keyed by its identity.
    pub fn upsert(&self, contact: Contact) {
        self.contacts
            .write()
            .insert(contact.user_name.clone(), contact);
    }

    /// Inserts or replaces several contacts under one write lock.
    pub fn upsert_all<I>(&self, contacts: I) -> usize
    where
        I: IntoIterator<Item = Contact>,
    {
        let mut map = self.contacts.write();
        let mut count = 0;
        for contact in contacts {
            map.insert(contact.user_name.clone(), contact);
            count += 1;
        }
        count
    }

    /// Removes an identity. Returns the removed contact, if any.
    pub fn remove(&self, identity: &str) -> Option<Contact> {
        self.contacts.write().remove(identity)
    }

    /// Number of known contacts.
    pub fn len(&self) -> usize {
        self.contacts.read().len()
    }

    /// Returns true if no contacts are known.
    pub fn is_empty(&self) -> bool {
        self.contacts.read().is_empty()
    }

    /// Copy of the whole directory for external readers.
    pub fn snapshot(&self) -> HashMap<String, Contact> {
        self.contacts.read().clone()
    }

    /// Removes every contact.
    pub fn clear(&self) {
        self.contacts.write().clear();
    }
}
