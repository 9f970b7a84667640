// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Reusable proptest strategies for property-based testing.

#![allow(dead_code)]

use proptest::prelude::*;

// ============================================================
// Cursor Strategies
// ============================================================

/// Strategy for one (Key, Val) cursor pair.
pub fn sync_key_pair_strategy() -> impl Strategy<Value = (i64, i64)> {
    (0i64..2000, any::<i64>())
}

/// Strategy for cursors of any length, including empty and singleton.
pub fn sync_key_pairs_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec(sync_key_pair_strategy(), 0..12)
}

// ============================================================
// Identity Strategies
// ============================================================

/// Strategy for a user identity (`@` followed by hex).
pub fn identity_strategy() -> impl Strategy<Value = String> {
    "@[0-9a-f]{8,32}"
}

/// Strategy for a group identity (`@@` followed by hex).
pub fn group_identity_strategy() -> impl Strategy<Value = String> {
    "@@[0-9a-f]{8,32}"
}

/// Strategy for identity lists spanning several batch chunks.
pub fn identity_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(identity_strategy(), 0..200)
}
