// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contacts
//!
//! Peer profiles, the shared contact directory, and incremental
//! reconciliation of the directory against change batches.

mod directory;
mod reconciler;

pub use directory::ContactDirectory;
pub use reconciler::{chunk_identities, ContactReconciler, ProfileFetcher, ReconcileReport, BATCH_FETCH_LIMIT};

use serde::{Deserialize, Serialize};

/// Prefix the provider uses for group (chat room) identities.
pub const GROUP_PREFIX: &str = "@@";

/// A member of a group contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GroupMember {
    /// Member identity.
    pub user_name: String,
    /// Member nickname.
    pub nick_name: String,
    /// Group-specific display name.
    pub display_name: String,
}

/// A peer profile.
///
/// Field names follow the provider's JSON; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Contact {
    /// Session-scoped identity (`@...` for users, `@@...` for groups).
    pub user_name: String,
    /// Display name.
    pub nick_name: String,
    /// Local remark set by the logged-in user.
    pub remark_name: String,
    /// Number of members; non-zero only for groups with loaded metadata.
    pub member_count: u32,
    /// Group members.
    pub member_list: Vec<GroupMember>,
    /// Profile signature.
    pub signature: String,
    /// Province.
    pub province: String,
    /// City.
    pub city: String,
    /// Sex code.
    pub sex: u8,
    /// Avatar path.
    pub head_img_url: String,
    /// Verification flag (public accounts are non-zero).
    pub verify_flag: u32,
    /// Contact flag bitmask.
    pub contact_flag: u32,
    /// Encrypted chat room id, used when fetching group members.
    pub encry_chat_room_id: String,
}

impl Contact {
    /// Creates a contact that only carries an identity.
    pub fn with_identity(identity: impl Into<String>) -> Self {
        Contact {
            user_name: identity.into(),
            ..Default::default()
        }
    }

    /// Returns the identity.
    pub fn identity(&self) -> &str {
        &self.user_name
    }

    /// Returns the remark name if set, otherwise the nickname.
    pub fn display_name(&self) -> &str {
        if self.remark_name.is_empty() {
            &self.nick_name
        } else {
            &self.remark_name
        }
    }

    /// Returns true for group identities.
    pub fn is_group(&self) -> bool {
        is_group_identity(&self.user_name)
    }
}

/// Returns true if the identity names a group.
pub fn is_group_identity(identity: &str) -> bool {
    identity.starts_with(GROUP_PREFIX)
}
