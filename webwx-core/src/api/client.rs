// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Web Client
//!
//! Builds every provider request, sends it through the [`Transport`] and
//! decodes the answer. Authenticated calls read the live session from the
//! shared [`SessionStore`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use super::config::WebWxConfig;
use super::error::{WebWxError, WebWxResult};
use crate::contact::{Contact, ProfileFetcher};
use crate::message::{MediaKind, OutboundPayload};
use crate::network::{ApiEndpoints, HttpRequest, HttpResponse, NetworkError, Transport};
use crate::protocol::{
    self, BatchContactItem, BatchContactRequest, BatchContactResponse, GetContactResponse,
    InitRequest, InitResponse, LoginStatus, OutboundMessage, SendMessageRequest,
    StatusNotifyRequest, StatusResponse, SyncRequest, SyncResponse,
};
use crate::session::{Session, SessionStore};
use crate::sync::{parse_sync_check, SyncKey, SyncSelector};

/// Cookie carrying the data ticket.
const DATA_TICKET_COOKIE: &str = "webwx_data_ticket";

/// Target of a status-notify call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusNotifyTarget {
    /// Announce presence to the logged-in user (code 3).
    Presence,
    /// Mark the conversation with an identity as read (code 1).
    MarkRead(String),
}

/// Authenticated operation surface.
pub struct WebClient<T: Transport> {
    transport: Arc<T>,
    config: WebWxConfig,
    session: Arc<SessionStore>,
}

impl<T: Transport> Clone for WebClient<T> {
    fn clone(&self) -> Self {
        WebClient {
            transport: Arc::clone(&self.transport),
            config: self.config.clone(),
            session: Arc::clone(&self.session),
        }
    }
}

impl<T: Transport> WebClient<T> {
    /// Creates a client over a transport and a session store.
    pub fn new(transport: Arc<T>, config: WebWxConfig, session: Arc<SessionStore>) -> Self {
        WebClient {
            transport,
            config,
            session,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &WebWxConfig {
        &self.config
    }

    /// Returns the session store.
    pub fn session_store(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Returns the transport.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    // ============================================================
    // Login flow
    // ============================================================

    /// Requests a fresh login UUID.
    pub async fn request_uuid(&self) -> WebWxResult<String> {
        let mut url = self.login_url("/jslogin")?;
        url.query_pairs_mut()
            .append_pair("appid", &self.config.app_id)
            .append_pair("fun", "new")
            .append_pair("lang", &self.config.lang)
            .append_pair("_", &protocol::now_millis().to_string());

        let body = self.fetch(HttpRequest::get(url)).await?.body;
        protocol::parse_jslogin(&body)
    }

    /// Polls the login status once. `tip` is true until the code is scanned.
    pub async fn check_login(&self, uuid: &str, tip: bool) -> WebWxResult<LoginStatus> {
        let now = protocol::now_millis();
        let mut url = self.login_url("/cgi-bin/mmwebwx-bin/login")?;
        url.query_pairs_mut()
            .append_pair("loginicon", "true")
            .append_pair("uuid", uuid)
            .append_pair("tip", if tip { "1" } else { "0" })
            .append_pair("r", &(!(now / 1000)).to_string())
            .append_pair("_", &now.to_string());

        let body = self.fetch(HttpRequest::get(url)).await?.body;
        protocol::parse_login_status(&body)
    }

    /// Follows the confirmed-login redirect and builds the session.
    ///
    /// The session is returned, not installed.
    pub async fn new_login_page(&self, redirect_uri: &str) -> WebWxResult<Session> {
        let mut url = Url::parse(redirect_uri).map_err(NetworkError::from)?;
        url.query_pairs_mut()
            .append_pair("fun", "new")
            .append_pair("version", "v2");
        let endpoints = ApiEndpoints::from_redirect(&url)?;

        let response = self.fetch(HttpRequest::get(url)).await?;
        let credentials = protocol::parse_login_page(&response.body)?;
        let data_ticket = response.cookie(DATA_TICKET_COOKIE).unwrap_or_default();
        if data_ticket.is_empty() {
            debug!("login page set no data ticket");
        }

        Session::from_credentials(
            credentials,
            data_ticket,
            protocol::generate_device_id(),
            endpoints,
        )
    }

    // ============================================================
    // Session bootstrap
    // ============================================================

    /// `webwxinit`: logged-in user, initial cursor and recent contacts.
    pub async fn webwx_init(&self) -> WebWxResult<InitResponse> {
        let session = self.session.current()?;
        let mut url = session.endpoints.init()?;
        url.query_pairs_mut()
            .append_pair("r", &(!protocol::now_millis()).to_string());
        self.append_ticket(&mut url, &session);

        let body = protocol::encode_body(&InitRequest {
            base_request: session.base_request(),
        })?;
        let response: InitResponse = self.post_json(url, body).await?;
        protocol::check(&response.base_response)?;
        Ok(response)
    }

    /// One page of the bulk contact list, starting at `seq`.
    pub async fn get_contacts(&self, seq: i64) -> WebWxResult<GetContactResponse> {
        let session = self.session.current()?;
        let mut url = session.endpoints.get_contact()?;
        url.query_pairs_mut()
            .append_pair("r", &protocol::now_millis().to_string())
            .append_pair("seq", &seq.to_string())
            .append_pair("skey", &session.skey);
        self.append_ticket(&mut url, &session);

        let response = self.fetch(HttpRequest::get(url)).await?;
        let page: GetContactResponse = protocol::decode(&response.body)?;
        protocol::check(&page.base_response)?;
        Ok(page)
    }

    /// `webwxstatusnotify`.
    pub async fn status_notify(&self, target: StatusNotifyTarget) -> WebWxResult<()> {
        let session = self.session.current()?;
        let mut url = session.endpoints.status_notify()?;
        self.append_ticket(&mut url, &session);

        let (code, to_user_name) = match target {
            StatusNotifyTarget::Presence => {
                (protocol::STATUS_NOTIFY_PRESENCE, session.user_name.clone())
            }
            StatusNotifyTarget::MarkRead(identity) => (protocol::STATUS_NOTIFY_MARK_READ, identity),
        };

        let body = protocol::encode_body(&StatusNotifyRequest {
            base_request: session.base_request(),
            code,
            from_user_name: session.user_name.clone(),
            to_user_name,
            client_msg_id: protocol::generate_client_msg_id(),
        })?;
        let response: StatusResponse = self.post_json(url, body).await?;
        protocol::check(&response.base_response)
    }

    // ============================================================
    // Polling
    // ============================================================

    /// Cheap poll with the serialized cursor.
    pub async fn sync_check(&self, sync_key: &str) -> WebWxResult<SyncSelector> {
        let session = self.session.current()?;
        let now = protocol::now_millis();
        let mut url = session.endpoints.sync_check()?;
        url.query_pairs_mut()
            .append_pair("r", &now.to_string())
            .append_pair("sid", &session.sid)
            .append_pair("uin", &session.uin.to_string())
            .append_pair("skey", &session.skey)
            .append_pair("deviceid", &session.device_id)
            .append_pair("synckey", sync_key)
            .append_pair("_", &now.to_string());
        self.append_ticket(&mut url, &session);

        let response = self.fetch(HttpRequest::get(url)).await?;
        parse_sync_check(&response.body)
    }

    /// Expensive poll from the structured cursor.
    pub async fn sync(&self, sync_key: &SyncKey) -> WebWxResult<SyncResponse> {
        let session = self.session.current()?;
        let mut url = session.endpoints.sync()?;
        url.query_pairs_mut()
            .append_pair("sid", &session.sid)
            .append_pair("skey", &session.skey);
        self.append_ticket(&mut url, &session);

        let body = protocol::encode_body(&SyncRequest {
            base_request: session.base_request(),
            sync_key: sync_key.clone(),
            rr: protocol::inverted_nanos(),
        })?;
        let response: SyncResponse = self.post_json(url, body).await?;
        protocol::check(&response.base_response)?;
        Ok(response)
    }

    /// Fetches full profiles for at most 40 identities.
    ///
    /// An empty result is reported as [`WebWxError::ContactListEmpty`].
    pub async fn batch_get_contacts(&self, identities: &[String]) -> WebWxResult<Vec<Contact>> {
        let session = self.session.current()?;
        let mut url = session.endpoints.batch_get_contact()?;
        url.query_pairs_mut()
            .append_pair("type", "ex")
            .append_pair("r", &protocol::now_millis().to_string());
        self.append_ticket(&mut url, &session);

        let list: Vec<BatchContactItem> = identities
            .iter()
            .map(|identity| BatchContactItem {
                user_name: identity.clone(),
                encry_chat_room_id: String::new(),
            })
            .collect();
        let body = protocol::encode_body(&BatchContactRequest {
            base_request: session.base_request(),
            count: list.len(),
            list,
        })?;

        let response: BatchContactResponse = self.post_json(url, body).await?;
        protocol::check(&response.base_response)?;
        if response.contact_list.is_empty() {
            return Err(WebWxError::ContactListEmpty);
        }
        Ok(response.contact_list)
    }

    // ============================================================
    // Outbound
    // ============================================================

    /// Sends a message to an identity.
    pub async fn send_message(&self, to: &str, payload: &OutboundPayload) -> WebWxResult<()> {
        if to.trim().is_empty() {
            return Err(WebWxError::InvalidInput("recipient is empty".into()));
        }
        let session = self.session.current()?;

        let (mut url, content, media_id) = match payload {
            OutboundPayload::Text(text) => (
                session.endpoints.send_msg()?,
                Some(text.as_str().to_string()),
                None,
            ),
            OutboundPayload::Media(media) => {
                let mut url = match media.kind() {
                    MediaKind::Image => session.endpoints.send_msg_img()?,
                    MediaKind::Video => session.endpoints.send_video_msg()?,
                };
                url.query_pairs_mut()
                    .append_pair("fun", "async")
                    .append_pair("f", "json");
                (url, None, Some(media.media_id().to_string()))
            }
        };
        self.append_ticket(&mut url, &session);

        let local_id = protocol::generate_client_msg_id().to_string();
        let body = protocol::encode_body(&SendMessageRequest {
            base_request: session.base_request(),
            msg: OutboundMessage {
                msg_type: payload.message_kind().code(),
                content,
                media_id,
                from_user_name: session.user_name.clone(),
                to_user_name: to.to_string(),
                local_id: local_id.clone(),
                client_msg_id: local_id,
            },
            scene: 0,
        })?;

        let response: StatusResponse = self.post_json(url, body).await?;
        protocol::check(&response.base_response)
    }

    /// `webwxlogout`.
    pub async fn logout(&self) -> WebWxResult<()> {
        let session = self.session.current()?;
        let mut url = session.endpoints.logout()?;
        url.query_pairs_mut()
            .append_pair("redirect", "1")
            .append_pair("type", "0")
            .append_pair("skey", &session.skey);
        self.append_ticket(&mut url, &session);

        let form = vec![
            ("sid".to_string(), session.sid.clone()),
            ("uin".to_string(), session.uin.to_string()),
        ];
        self.fetch(HttpRequest::post_form(url, form)).await?;
        Ok(())
    }

    // ============================================================
    // Helpers
    // ============================================================

    fn login_url(&self, path: &str) -> WebWxResult<Url> {
        let base = self.config.login_base.trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, path)).map_err(NetworkError::from)?)
    }

    fn append_ticket(&self, url: &mut Url, session: &Session) {
        url.query_pairs_mut()
            .append_pair("pass_ticket", &session.pass_ticket)
            .append_pair("lang", &self.config.lang);
    }

    async fn fetch(&self, request: HttpRequest) -> WebWxResult<HttpResponse> {
        let route = request.route().to_string();
        debug!(route = %route, "provider request");

        let response = self.transport.execute(request).await?;
        if !response.is_ok() {
            warn!(route = %route, status = response.status, "unexpected HTTP status");
            return Err(NetworkError::HttpStatus(response.status).into());
        }
        Ok(response)
    }

    async fn post_json<R>(&self, url: Url, body: Vec<u8>) -> WebWxResult<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let response = self.fetch(HttpRequest::post_json(url, body)).await?;
        protocol::decode(&response.body)
    }
}

#[async_trait]
impl<T: Transport> ProfileFetcher for WebClient<T> {
    async fn fetch_profiles(&self, identities: &[String]) -> WebWxResult<Vec<Contact>> {
        if identities.is_empty() {
            return Ok(Vec::new());
        }
        self.batch_get_contacts(identities).await
    }
}
