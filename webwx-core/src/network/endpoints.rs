// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Provider endpoint table.
//!
//! After login the provider redirects to one of several host families
//! (`wx.qq.com`, `wx2.qq.com`, `web.wechat.com`, ...). Every authenticated
//! endpoint lives on that host; the cheap poll lives on its `webpush.` twin.

use url::Url;

use super::error::NetworkError;

const CGI_PATH: &str = "/cgi-bin/mmwebwx-bin";

/// Authenticated endpoint URLs for one host family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    host: String,
}

impl ApiEndpoints {
    /// Creates the endpoint table for a host (e.g. `wx2.qq.com`).
    pub fn for_host(host: impl Into<String>) -> Self {
        ApiEndpoints { host: host.into() }
    }

    /// Derives the endpoint table from the login redirect target.
    pub fn from_redirect(redirect: &Url) -> Result<Self, NetworkError> {
        redirect
            .host_str()
            .map(Self::for_host)
            .ok_or_else(|| NetworkError::InvalidUrl(format!("no host in {}", redirect)))
    }

    /// Returns the host this table points at.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// `webwxinit`: session bootstrap.
    pub fn init(&self) -> Result<Url, NetworkError> {
        self.cgi("webwxinit")
    }

    /// `webwxstatusnotify`: presence / read-marker announcement.
    pub fn status_notify(&self) -> Result<Url, NetworkError> {
        self.cgi("webwxstatusnotify")
    }

    /// `webwxgetcontact`: paginated bulk contact list.
    pub fn get_contact(&self) -> Result<Url, NetworkError> {
        self.cgi("webwxgetcontact")
    }

    /// `webwxbatchgetcontact`: profile fetch for up to 40 identities.
    pub fn batch_get_contact(&self) -> Result<Url, NetworkError> {
        self.cgi("webwxbatchgetcontact")
    }

    /// `synccheck`: the cheap poll, served from the push host.
    pub fn sync_check(&self) -> Result<Url, NetworkError> {
        Ok(Url::parse(&format!(
            "https://webpush.{}{}/synccheck",
            self.host, CGI_PATH
        ))?)
    }

    /// `webwxsync`: the expensive poll.
    pub fn sync(&self) -> Result<Url, NetworkError> {
        self.cgi("webwxsync")
    }

    /// `webwxlogout`.
    pub fn logout(&self) -> Result<Url, NetworkError> {
        self.cgi("webwxlogout")
    }

    /// `webwxsendmsg`: text messages.
    pub fn send_msg(&self) -> Result<Url, NetworkError> {
        self.cgi("webwxsendmsg")
    }

    /// `webwxsendmsgimg`: image messages.
    pub fn send_msg_img(&self) -> Result<Url, NetworkError> {
        self.cgi("webwxsendmsgimg")
    }

    /// `webwxsendvideomsg`: video messages.
    pub fn send_video_msg(&self) -> Result<Url, NetworkError> {
        self.cgi("webwxsendvideomsg")
    }

    fn cgi(&self, name: &str) -> Result<Url, NetworkError> {
        Ok(Url::parse(&format!(
            "https://{}{}/{}",
            self.host, CGI_PATH, name
        ))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_from_redirect() {
        let redirect = Url::parse(
            "https://wx2.qq.com/cgi-bin/mmwebwx-bin/webwxnewloginpage?ticket=t&uuid=u",
        )
        .unwrap();
        let endpoints = ApiEndpoints::from_redirect(&redirect).unwrap();

        assert_eq!(endpoints.host(), "wx2.qq.com");
        assert_eq!(
            endpoints.sync().unwrap().as_str(),
            "https://wx2.qq.com/cgi-bin/mmwebwx-bin/webwxsync"
        );
        assert_eq!(
            endpoints.sync_check().unwrap().as_str(),
            "https://webpush.wx2.qq.com/cgi-bin/mmwebwx-bin/synccheck"
        );
    }
}
