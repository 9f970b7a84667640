// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Messages
//!
//! Incoming message records as delivered by the expensive poll, and the
//! closed payload type for outbound messages.

mod payload;

pub use payload::{MediaKind, MediaPayload, OutboundPayload, TextPayload};

use serde::{Deserialize, Serialize};

/// Provider message type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Plain text (1).
    Text,
    /// Image (3).
    Image,
    /// File attachment (6).
    Attach,
    /// Voice note (34).
    Voice,
    /// Friend verification request (37).
    Verify,
    /// Possible friend suggestion (40).
    PossibleFriend,
    /// Shared contact card (42).
    ShareCard,
    /// Video (43).
    Video,
    /// Sticker (47).
    Emoticon,
    /// Location (48).
    Location,
    /// App message / link (49).
    App,
    /// VoIP call (50).
    Voip,
    /// Status notification; carries the identities to refresh (51).
    StatusNotify,
    /// VoIP notification (52).
    VoipNotify,
    /// VoIP invite (53).
    VoipInvite,
    /// Short video (62).
    MicroVideo,
    /// System notice (9999).
    SystemNotice,
    /// System message (10000).
    System,
    /// Recalled message (10002).
    Recalled,
    /// Any other code.
    Other(i64),
}

impl MessageKind {
    /// Maps a provider `MsgType` code.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => MessageKind::Text,
            3 => MessageKind::Image,
            6 => MessageKind::Attach,
            34 => MessageKind::Voice,
            37 => MessageKind::Verify,
            40 => MessageKind::PossibleFriend,
            42 => MessageKind::ShareCard,
            43 => MessageKind::Video,
            47 => MessageKind::Emoticon,
            48 => MessageKind::Location,
            49 => MessageKind::App,
            50 => MessageKind::Voip,
            51 => MessageKind::StatusNotify,
            52 => MessageKind::VoipNotify,
            53 => MessageKind::VoipInvite,
            62 => MessageKind::MicroVideo,
            9999 => MessageKind::SystemNotice,
            10000 => MessageKind::System,
            10002 => MessageKind::Recalled,
            other => MessageKind::Other(other),
        }
    }

    /// Returns the provider code.
    pub fn code(&self) -> i64 {
        match self {
            MessageKind::Text => 1,
            MessageKind::Image => 3,
            MessageKind::Attach => 6,
            MessageKind::Voice => 34,
            MessageKind::Verify => 37,
            MessageKind::PossibleFriend => 40,
            MessageKind::ShareCard => 42,
            MessageKind::Video => 43,
            MessageKind::Emoticon => 47,
            MessageKind::Location => 48,
            MessageKind::App => 49,
            MessageKind::Voip => 50,
            MessageKind::StatusNotify => 51,
            MessageKind::VoipNotify => 52,
            MessageKind::VoipInvite => 53,
            MessageKind::MicroVideo => 62,
            MessageKind::SystemNotice => 9999,
            MessageKind::System => 10000,
            MessageKind::Recalled => 10002,
            MessageKind::Other(code) => *code,
        }
    }
}

/// An added message from a change batch.
///
/// Only the fields the core reads are modelled; everything else in the
/// provider record is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Message {
    /// Provider message id.
    pub msg_id: String,
    /// Sender identity.
    pub from_user_name: String,
    /// Recipient identity.
    pub to_user_name: String,
    /// Raw `MsgType` code.
    pub msg_type: i64,
    /// Message content (HTML-ish text for text messages).
    pub content: String,
    /// Comma-separated identities named by a status notification.
    pub status_notify_user_name: String,
    /// Creation time (unix seconds).
    pub create_time: i64,
}

impl Message {
    /// Returns the decoded message kind.
    pub fn kind(&self) -> MessageKind {
        MessageKind::from_code(self.msg_type)
    }

    /// Identities named by a status notification, in order, empties dropped.
    pub fn status_notify_targets(&self) -> impl Iterator<Item = &str> {
        self.status_notify_user_name
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
