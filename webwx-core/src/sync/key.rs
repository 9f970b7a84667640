// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync key (stream cursor) and its tracker.

use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// One (Key, Val) pair of the provider's cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SyncKeyEntry {
    /// Namespace identifier.
    pub key: i64,
    /// Cursor position within the namespace.
    pub val: i64,
}

/// Wire form: `{"Count": n, "List": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct WireSyncKey {
    count: usize,
    list: Vec<SyncKeyEntry>,
}

/// Opaque, order-significant stream cursor supplied by the provider.
///
/// The entry order is exactly the order the provider returned and is never
/// changed locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireSyncKey", into = "WireSyncKey")]
pub struct SyncKey {
    entries: Vec<SyncKeyEntry>,
}

impl From<WireSyncKey> for SyncKey {
    fn from(wire: WireSyncKey) -> Self {
        SyncKey { entries: wire.list }
    }
}

impl From<SyncKey> for WireSyncKey {
    fn from(key: SyncKey) -> Self {
        WireSyncKey {
            count: key.entries.len(),
            list: key.entries,
        }
    }
}

impl SyncKey {
    /// Creates a key from entries, keeping their order.
    pub fn new(entries: Vec<SyncKeyEntry>) -> Self {
        SyncKey { entries }
    }

    /// Creates a key from `(key, val)` pairs, keeping their order.
    pub fn from_pairs(pairs: &[(i64, i64)]) -> Self {
        SyncKey {
            entries: pairs
                .iter()
                .map(|&(key, val)| SyncKeyEntry { key, val })
                .collect(),
        }
    }

    /// Returns the entries in provider order.
    pub fn entries(&self) -> &[SyncKeyEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the key has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical form sent as the `synckey` query parameter:
/// `Key_Val` pairs joined by `|`, in provider order.
impl fmt::Display for SyncKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}_{}", entry.key, entry.val)?;
        }
        Ok(())
    }
}

/// Owns the current cursor.
///
/// The key is only ever replaced wholesale with a value the provider sent.
#[derive(Debug, Default)]
pub struct SyncKeyTracker {
    key: RwLock<SyncKey>,
}

impl SyncKeyTracker {
    /// Creates a tracker with an empty key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialized cursor for the next request.
    pub fn current(&self) -> String {
        self.key.read().to_string()
    }

    /// Structured cursor for request bodies.
    pub fn snapshot(&self) -> SyncKey {
        self.key.read().clone()
    }

    /// Replaces the cursor.
    pub fn advance(&self, new_key: SyncKey) {
        *self.key.write() = new_key;
    }

    /// Drops the cursor (on logout).
    pub fn reset(&self) {
        *self.key.write() = SyncKey::default();
    }
}
