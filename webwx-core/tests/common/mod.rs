// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common Test Utilities
//!
//! Shared fixtures for tests that drive the client and the polling engine
//! through a scripted [`MockTransport`].

#![allow(dead_code)]

pub mod strategies;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use webwx_core::api::*;
use webwx_core::contact::{ContactDirectory, ContactReconciler};
use webwx_core::network::{ApiEndpoints, HttpResponse, MockTransport};
use webwx_core::session::{Session, SessionStore};
use webwx_core::sync::{ChangeBatch, PollingEngine, RetryWindow, SyncKeyTracker};

pub const SELF_ID: &str = "@self";

/// A session as the login flow would leave it.
pub fn test_session() -> Session {
    Session {
        sid: "sid-1".into(),
        skey: "@crypt_skey".into(),
        pass_ticket: "ticket-1".into(),
        data_ticket: "data-ticket".into(),
        uin: 12345,
        device_id: "e123456789012345".into(),
        endpoints: ApiEndpoints::for_host("wx2.qq.com"),
        user_name: SELF_ID.into(),
    }
}

/// Client over `transport` with [`test_session`] installed.
pub fn logged_in_client(transport: &MockTransport) -> WebClient<MockTransport> {
    let store = Arc::new(SessionStore::new());
    store.establish(test_session());
    WebClient::new(Arc::new(transport.clone()), WebWxConfig::default(), store)
}

pub fn sync_check_body(retcode: i64, selector: i64) -> String {
    format!(
        r#"window.synccheck={{retcode:"{}",selector:"{}"}}"#,
        retcode, selector
    )
}

pub fn sync_key_json(pairs: &[(i64, i64)]) -> Value {
    json!({
        "Count": pairs.len(),
        "List": pairs.iter().map(|(k, v)| json!({"Key": k, "Val": v})).collect::<Vec<_>>(),
    })
}

pub fn text_message(from: &str, content: &str) -> Value {
    json!({
        "MsgId": "1001",
        "FromUserName": from,
        "ToUserName": SELF_ID,
        "MsgType": 1,
        "Content": content,
        "CreateTime": 1_700_000_000,
    })
}

pub fn status_notify_message(targets: &str) -> Value {
    json!({
        "MsgId": "1002",
        "FromUserName": SELF_ID,
        "ToUserName": SELF_ID,
        "MsgType": 51,
        "StatusNotifyUserName": targets,
    })
}

pub fn contact_json(identity: &str, nick: &str) -> Value {
    json!({"UserName": identity, "NickName": nick})
}

pub fn group_json(identity: &str, nick: &str, members: u32) -> Value {
    json!({"UserName": identity, "NickName": nick, "MemberCount": members})
}

pub fn sync_response_body(
    messages: Vec<Value>,
    modified: Vec<Value>,
    deleted: Vec<Value>,
    key: &[(i64, i64)],
) -> String {
    json!({
        "BaseResponse": {"Ret": 0, "ErrMsg": ""},
        "AddMsgCount": messages.len(),
        "AddMsgList": messages,
        "ModContactCount": modified.len(),
        "ModContactList": modified,
        "DelContactCount": deleted.len(),
        "DelContactList": deleted,
        "SyncKey": sync_key_json(key),
        "SyncCheckKey": sync_key_json(key),
    })
    .to_string()
}

pub fn batch_contact_body(contacts: Vec<Value>) -> String {
    json!({
        "BaseResponse": {"Ret": 0, "ErrMsg": ""},
        "Count": contacts.len(),
        "ContactList": contacts,
    })
    .to_string()
}

pub fn ok_status_body() -> String {
    json!({"BaseResponse": {"Ret": 0, "ErrMsg": ""}}).to_string()
}

/// Records every batch a handler sees.
#[derive(Clone, Default)]
pub struct BatchRecorder {
    batches: Arc<Mutex<Vec<ChangeBatch>>>,
    calls: Arc<AtomicUsize>,
}

impl BatchRecorder {
    pub fn handler(&self) -> Arc<dyn BatchHandler> {
        let batches = self.batches.clone();
        let calls = self.calls.clone();
        Arc::new(CallbackHandler::new(move |batch: &ChangeBatch| {
            calls.fetch_add(1, Ordering::SeqCst);
            batches.lock().push(batch.clone());
            Ok(())
        }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn batches(&self) -> Vec<ChangeBatch> {
        self.batches.lock().clone()
    }
}

/// Polling engine wired to a mock transport, with handles to its state.
pub struct EngineHarness {
    pub transport: MockTransport,
    pub engine: PollingEngine<MockTransport>,
    pub directory: Arc<ContactDirectory>,
    pub tracker: Arc<SyncKeyTracker>,
    pub shutdown: CancellationToken,
    pub events: EventDispatcher,
    pub messages: BatchRecorder,
    pub contacts: BatchRecorder,
}

pub fn engine_harness() -> EngineHarness {
    engine_harness_with_threshold(10)
}

pub fn engine_harness_with_threshold(threshold: u32) -> EngineHarness {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    let directory = Arc::new(ContactDirectory::new());
    let tracker = Arc::new(SyncKeyTracker::new());
    let shutdown = CancellationToken::new();

    let events = EventDispatcher::new();
    let messages = BatchRecorder::default();
    let contacts = BatchRecorder::default();
    events.set_message_handler(messages.handler());
    events.set_contact_handler(contacts.handler());

    let engine = PollingEngine::new(
        client,
        Arc::clone(&tracker),
        ContactReconciler::new(Arc::clone(&directory)),
        events.clone(),
        RetryWindow::new(threshold),
        shutdown.clone(),
    );

    EngineHarness {
        transport,
        engine,
        directory,
        tracker,
        shutdown,
        events,
        messages,
        contacts,
    }
}

// ============================================================
// Login fixtures
// ============================================================

pub const UUID: &str = "gZ1fJzb5Ug==";
pub const REDIRECT: &str =
    "https://wx2.qq.com/cgi-bin/mmwebwx-bin/webwxnewloginpage?ticket=abc&uuid=gZ1fJzb5Ug==&scan=1";

pub fn jslogin_body() -> String {
    format!(
        r#"window.QRLogin.code = 200; window.QRLogin.uuid = "{}";"#,
        UUID
    )
}

pub fn confirmed_body() -> String {
    format!(r#"window.code=200;window.redirect_uri="{}";"#, REDIRECT)
}

pub fn login_page_body() -> &'static str {
    "<error><ret>0</ret><message></message><skey>@crypt_abc</skey>\
     <wxsid>sid-xyz</wxsid><wxuin>987654</wxuin><pass_ticket>pt%2Bq</pass_ticket>\
     <isgrayscale>1</isgrayscale></error>"
}

pub fn init_body() -> String {
    json!({
        "BaseResponse": {"Ret": 0, "ErrMsg": ""},
        "User": {"UserName": "@me", "NickName": "Me"},
        "SyncKey": sync_key_json(&[(1, 100), (2, 200)]),
        "ContactList": [contact_json("@recent", "Recent")],
        "Unknown": {"ignored": true},
    })
    .to_string()
}

pub fn contact_page_body(identities: &[&str], seq: i64) -> String {
    json!({
        "BaseResponse": {"Ret": 0, "ErrMsg": ""},
        "MemberCount": identities.len(),
        "MemberList": identities.iter().map(|id| contact_json(id, "n")).collect::<Vec<_>>(),
        "Seq": seq,
    })
    .to_string()
}

pub fn script_happy_path(transport: &MockTransport) {
    transport.queue_ok("jslogin", jslogin_body());
    transport.queue_ok("login", "window.code=408;");
    transport.queue_ok("login", "window.code=201;window.userAvatar = 'data:img';");
    transport.queue_ok("login", confirmed_body());
    transport.queue_response(
        "webwxnewloginpage",
        HttpResponse::ok(login_page_body()).with_cookie("webwx_data_ticket", "dt-1"),
    );
    transport.queue_ok("webwxinit", init_body());
    transport.queue_ok("webwxgetcontact", contact_page_body(&["@a", "@b"], 7));
    transport.queue_ok("webwxgetcontact", contact_page_body(&["@c"], 0));
    transport.queue_ok("webwxstatusnotify", ok_status_body());
}
