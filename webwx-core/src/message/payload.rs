// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Outbound message payloads.

use super::MessageKind;
use crate::api::{WebWxError, WebWxResult};

/// Non-empty message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPayload(String);

impl TextPayload {
    /// Creates a text payload. Empty or whitespace-only text is rejected.
    pub fn new(text: impl Into<String>) -> WebWxResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(WebWxError::InvalidInput("message text is empty".into()));
        }
        Ok(TextPayload(text))
    }

    /// Returns the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Media kinds that can be sent by media id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Picture, sent via `webwxsendmsgimg`.
    Image,
    /// Video, sent via `webwxsendvideomsg`.
    Video,
}

/// Media that has already been uploaded to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    kind: MediaKind,
    media_id: String,
}

impl MediaPayload {
    /// Creates a media payload from an upload's media id.
    pub fn new(kind: MediaKind, media_id: impl Into<String>) -> WebWxResult<Self> {
        let media_id = media_id.into();
        if media_id.trim().is_empty() {
            return Err(WebWxError::InvalidInput("media id is empty".into()));
        }
        Ok(MediaPayload { kind, media_id })
    }

    /// Returns the media kind.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Returns the provider media id.
    pub fn media_id(&self) -> &str {
        &self.media_id
    }
}

/// Closed set of outbound payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundPayload {
    /// Text message.
    Text(TextPayload),
    /// Pre-uploaded media.
    Media(MediaPayload),
}

impl OutboundPayload {
    /// Creates a text payload.
    pub fn text(text: impl Into<String>) -> WebWxResult<Self> {
        TextPayload::new(text).map(OutboundPayload::Text)
    }

    /// Creates a media payload.
    pub fn media(kind: MediaKind, media_id: impl Into<String>) -> WebWxResult<Self> {
        MediaPayload::new(kind, media_id).map(OutboundPayload::Media)
    }

    /// Provider message type for this payload.
    pub fn message_kind(&self) -> MessageKind {
        match self {
            OutboundPayload::Text(_) => MessageKind::Text,
            OutboundPayload::Media(media) => match media.kind {
                MediaKind::Image => MessageKind::Image,
                MediaKind::Video => MessageKind::Video,
            },
        }
    }
}
