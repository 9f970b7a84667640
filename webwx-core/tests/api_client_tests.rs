//! Tests for api::client
//! Extracted from client.rs

mod common;

use std::sync::Arc;

use common::*;
use webwx_core::api::*;
use webwx_core::contact::ProfileFetcher;
use webwx_core::message::{MediaKind, OutboundPayload};
use webwx_core::network::{HttpResponse, MockTransport, NetworkError, RequestBody};
use webwx_core::session::SessionStore;

fn sent_json(transport: &MockTransport, route: &str) -> (String, serde_json::Value) {
    let request = transport.requests_to(route).remove(0);
    let raw = request.json_body().unwrap().to_string();
    let value = serde_json::from_str(&raw).unwrap();
    (raw, value)
}

// ============================================================
// Outbound messages
// ============================================================

#[tokio::test]
async fn test_text_message_keeps_html_characters_literal() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    transport.queue_ok("webwxsendmsg", ok_status_body());

    let payload = OutboundPayload::text("a & b <c> \"d\"").unwrap();
    client.send_message("@friend", &payload).await.unwrap();

    let (raw, body) = sent_json(&transport, "webwxsendmsg");
    assert!(raw.contains("a & b <c>"));
    assert!(!raw.contains("\\u0026"));
    assert!(!raw.contains("\\u003c"));
    assert_eq!(body["Msg"]["Type"], 1);
    assert_eq!(body["Msg"]["Content"], "a & b <c> \"d\"");
    assert_eq!(body["Msg"]["FromUserName"], SELF_ID);
    assert_eq!(body["Msg"]["ToUserName"], "@friend");
    assert_eq!(body["Msg"]["LocalID"], body["Msg"]["ClientMsgId"]);
    assert!(body["Msg"].get("MediaId").is_none());
    assert_eq!(body["Scene"], 0);
}

#[tokio::test]
async fn test_image_message_uses_media_endpoint() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    transport.queue_ok("webwxsendmsgimg", ok_status_body());

    let payload = OutboundPayload::media(MediaKind::Image, "@media-1").unwrap();
    client.send_message("@friend", &payload).await.unwrap();

    let request = transport.requests_to("webwxsendmsgimg").remove(0);
    assert_eq!(request.query("fun").as_deref(), Some("async"));
    assert_eq!(request.query("f").as_deref(), Some("json"));
    let (_, body) = sent_json(&transport, "webwxsendmsgimg");
    assert_eq!(body["Msg"]["Type"], 3);
    assert_eq!(body["Msg"]["MediaId"], "@media-1");
    assert!(body["Msg"].get("Content").is_none());
}

#[tokio::test]
async fn test_video_message_uses_video_endpoint() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    transport.queue_ok("webwxsendvideomsg", ok_status_body());

    let payload = OutboundPayload::media(MediaKind::Video, "@media-2").unwrap();
    client.send_message("@friend", &payload).await.unwrap();

    let (_, body) = sent_json(&transport, "webwxsendvideomsg");
    assert_eq!(body["Msg"]["Type"], 43);
}

#[tokio::test]
async fn test_send_to_empty_recipient_is_rejected() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    let payload = OutboundPayload::text("hi").unwrap();

    let err = client.send_message("  ", &payload).await.unwrap_err();

    assert!(matches!(err, WebWxError::InvalidInput(_)));
    assert!(transport.sent_requests().is_empty());
}

#[tokio::test]
async fn test_send_provider_error_is_surfaced_verbatim() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    transport.queue_ok("webwxsendmsg", r#"{"BaseResponse":{"Ret":1205,"ErrMsg":"too fast"}}"#);

    let payload = OutboundPayload::text("hi").unwrap();
    let err = client.send_message("@friend", &payload).await.unwrap_err();

    assert_eq!(err, WebWxError::Provider { code: 1205 });
    assert_eq!(err.provider_code(), Some(1205));
}

// ============================================================
// Query parameters
// ============================================================

#[tokio::test]
async fn test_authenticated_calls_carry_pass_ticket_and_lang() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    transport.queue_ok("webwxsync", sync_response_body(vec![], vec![], vec![], &[]));
    transport.queue_ok("webwxstatusnotify", ok_status_body());
    transport.queue_ok("webwxbatchgetcontact", batch_contact_body(vec![contact_json("@a", "A")]));
    transport.queue_ok("synccheck", sync_check_body(0, 0));
    transport.queue_ok("webwxsendmsg", ok_status_body());

    client.sync(&Default::default()).await.unwrap();
    client
        .status_notify(StatusNotifyTarget::MarkRead("@a".into()))
        .await
        .unwrap();
    client.batch_get_contacts(&["@a".to_string()]).await.unwrap();
    client.sync_check("").await.unwrap();
    client
        .send_message("@a", &OutboundPayload::text("x").unwrap())
        .await
        .unwrap();

    for request in transport.sent_requests() {
        assert_eq!(
            request.query("pass_ticket").as_deref(),
            Some("ticket-1"),
            "{}",
            request.url
        );
        assert_eq!(request.query("lang").as_deref(), Some("zh_CN"), "{}", request.url);
    }
}

#[tokio::test]
async fn test_mark_read_notify() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    transport.queue_ok("webwxstatusnotify", ok_status_body());

    client
        .status_notify(StatusNotifyTarget::MarkRead("@friend".into()))
        .await
        .unwrap();

    let (_, body) = sent_json(&transport, "webwxstatusnotify");
    assert_eq!(body["Code"], 1);
    assert_eq!(body["ToUserName"], "@friend");
    assert!(body["ClientMsgId"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_logout_posts_form() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    transport.queue_ok("webwxlogout", "");

    client.logout().await.unwrap();

    let request = transport.requests_to("webwxlogout").remove(0);
    assert_eq!(request.query("pass_ticket").as_deref(), Some("ticket-1"));
    assert_eq!(request.query("lang").as_deref(), Some("zh_CN"));
    assert_eq!(request.query("skey").as_deref(), Some("@crypt_skey"));
    match request.body {
        Some(RequestBody::Form(fields)) => {
            assert!(fields.contains(&("sid".to_string(), "sid-1".to_string())));
            assert!(fields.contains(&("uin".to_string(), "12345".to_string())));
        }
        other => panic!("expected form body, got {:?}", other),
    }
}

// ============================================================
// Batch contact fetch
// ============================================================

#[tokio::test]
async fn test_batch_get_contacts_empty_list() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    transport.queue_ok("webwxbatchgetcontact", batch_contact_body(vec![]));

    let err = client
        .batch_get_contacts(&["@a".to_string()])
        .await
        .unwrap_err();

    assert_eq!(err, WebWxError::ContactListEmpty);
}

#[tokio::test]
async fn test_profile_fetcher_skips_empty_request() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);

    let profiles = client.fetch_profiles(&[]).await.unwrap();

    assert!(profiles.is_empty());
    assert_eq!(transport.request_count("webwxbatchgetcontact"), 0);
}

#[tokio::test]
async fn test_batch_get_contacts_ignores_unknown_fields() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    transport.queue_ok(
        "webwxbatchgetcontact",
        r#"{"BaseResponse":{"Ret":0,"ErrMsg":""},"Count":1,"ContactList":[
            {"UserName":"@@room","NickName":"Room","MemberCount":2,"NewField":[1,2,3],
             "MemberList":[{"UserName":"@a","NickName":"A","AttrStatus":1}]}]}"#,
    );

    let contacts = client.batch_get_contacts(&["@@room".to_string()]).await.unwrap();

    assert_eq!(contacts.len(), 1);
    assert!(contacts[0].is_group());
    assert_eq!(contacts[0].member_list[0].user_name, "@a");
}

// ============================================================
// Failures
// ============================================================

#[tokio::test]
async fn test_http_status_is_network_error() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    transport.queue_response("synccheck", HttpResponse::status(503));

    let err = client.sync_check("").await.unwrap_err();

    assert_eq!(err, WebWxError::Network(NetworkError::HttpStatus(503)));
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let transport = MockTransport::new();
    let client = logged_in_client(&transport);
    transport.queue_ok("webwxsync", "<html>oops</html>");

    let err = client.sync(&Default::default()).await.unwrap_err();

    assert!(matches!(err, WebWxError::Decode(_)));
}

#[tokio::test]
async fn test_calls_without_session_fail() {
    let transport = MockTransport::new();
    let client = WebClient::new(
        Arc::new(transport.clone()),
        WebWxConfig::default(),
        Arc::new(SessionStore::new()),
    );

    assert_eq!(client.sync_check("").await.unwrap_err(), WebWxError::NotLoggedIn);
    assert_eq!(client.logout().await.unwrap_err(), WebWxError::NotLoggedIn);
    assert!(transport.sent_requests().is_empty());
}
