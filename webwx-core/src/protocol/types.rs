// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON wire types for the provider's POST endpoints.

use serde::{Deserialize, Serialize};

use crate::contact::Contact;
use crate::message::Message;
use crate::sync::SyncKey;

/// Authentication block carried by every JSON request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseRequest {
    /// Numeric user id.
    pub uin: i64,
    /// Session id.
    pub sid: String,
    /// Security key.
    pub skey: String,
    /// Client device id.
    #[serde(rename = "DeviceID")]
    pub device_id: String,
}

/// Status block carried by every JSON response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BaseResponse {
    /// 0 on success, provider error code otherwise.
    pub ret: i64,
    /// Provider message (usually empty).
    pub err_msg: String,
}

/// Body of `webwxinit`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitRequest {
    /// Authentication block.
    pub base_request: BaseRequest,
}

/// Response of `webwxinit`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InitResponse {
    /// Status.
    pub base_response: BaseResponse,
    /// The logged-in user.
    pub user: Contact,
    /// Initial cursor.
    pub sync_key: SyncKey,
    /// Recently active contacts.
    pub contact_list: Vec<Contact>,
}

/// Response of `webwxgetcontact`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetContactResponse {
    /// Status.
    pub base_response: BaseResponse,
    /// Number of contacts in this page.
    pub member_count: usize,
    /// Contacts in this page.
    pub member_list: Vec<Contact>,
    /// Next page cursor; 0 when this was the last page.
    pub seq: i64,
}

/// One identity in a batch contact request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchContactItem {
    /// Identity to fetch.
    pub user_name: String,
    /// Chat room id (empty for users).
    pub encry_chat_room_id: String,
}

/// Body of `webwxbatchgetcontact`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchContactRequest {
    /// Authentication block.
    pub base_request: BaseRequest,
    /// Number of identities.
    pub count: usize,
    /// Identities to fetch.
    pub list: Vec<BatchContactItem>,
}

/// Response of `webwxbatchgetcontact`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BatchContactResponse {
    /// Status.
    pub base_response: BaseResponse,
    /// Number of profiles.
    pub count: usize,
    /// Profiles.
    pub contact_list: Vec<Contact>,
}

/// Body of `webwxstatusnotify`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusNotifyRequest {
    /// Authentication block.
    pub base_request: BaseRequest,
    /// 3 = presence, 1 = mark conversation read.
    pub code: i32,
    /// Logged-in user.
    pub from_user_name: String,
    /// Target identity.
    pub to_user_name: String,
    /// Client-generated id.
    pub client_msg_id: i64,
}

/// Response of `webwxstatusnotify` and the send endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StatusResponse {
    /// Status.
    pub base_response: BaseResponse,
}

/// Body of `webwxsync`.
#[derive(Debug, Serialize)]
pub struct SyncRequest {
    /// Authentication block.
    #[serde(rename = "BaseRequest")]
    pub base_request: BaseRequest,
    /// Cursor to sync from.
    #[serde(rename = "SyncKey")]
    pub sync_key: SyncKey,
    /// Bitwise-inverted nanosecond timestamp.
    pub rr: i64,
}

/// Response of `webwxsync`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SyncResponse {
    /// Status.
    pub base_response: BaseResponse,
    /// Number of added messages.
    pub add_msg_count: usize,
    /// Added messages.
    pub add_msg_list: Vec<Message>,
    /// Number of modified contacts.
    pub mod_contact_count: usize,
    /// Modified contacts.
    pub mod_contact_list: Vec<Contact>,
    /// Number of deleted contacts.
    pub del_contact_count: usize,
    /// Deleted contacts.
    pub del_contact_list: Vec<Contact>,
    /// Cursor for the next expensive poll.
    pub sync_key: SyncKey,
    /// Cursor for the next cheap poll.
    pub sync_check_key: SyncKey,
}

/// Outbound message record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutboundMessage {
    /// Message type code.
    #[serde(rename = "Type")]
    pub msg_type: i64,
    /// Text content (text messages).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Uploaded media id (media messages).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_id: Option<String>,
    /// Sender (the logged-in user).
    pub from_user_name: String,
    /// Recipient.
    pub to_user_name: String,
    /// Client-generated id.
    #[serde(rename = "LocalID")]
    pub local_id: String,
    /// Client-generated id.
    pub client_msg_id: String,
}

/// Body of the send endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendMessageRequest {
    /// Authentication block.
    pub base_request: BaseRequest,
    /// The message.
    pub msg: OutboundMessage,
    /// Always 0.
    pub scene: i32,
}
