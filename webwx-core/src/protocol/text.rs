// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parsers for the login flow's non-JSON responses.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::api::{WebWxError, WebWxResult};

static QR_LOGIN_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"window\.QRLogin\.code\s*=\s*(\d+)").expect("jslogin code pattern is valid")
});

static QR_LOGIN_UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"window\.QRLogin\.uuid\s*=\s*"([^"]+)""#).expect("jslogin uuid pattern is valid")
});

static LOGIN_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"window\.code\s*=\s*(\d+)").expect("login code pattern is valid")
});

static REDIRECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"window\.redirect_uri\s*=\s*"([^"]+)""#).expect("redirect pattern is valid")
});

static XML_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z_]+)>([^<]*)</([A-Za-z_]+)>").expect("xml field pattern is valid")
});

/// Parses the `jslogin` reply and returns the login UUID.
///
/// ```text
/// window.QRLogin.code = 200; window.QRLogin.uuid = "gZ1fJzb5Ug==";
/// ```
pub fn parse_jslogin(body: &str) -> WebWxResult<String> {
    let code = QR_LOGIN_CODE_RE
        .captures(body)
        .and_then(|c| c[1].parse::<i64>().ok())
        .ok_or_else(|| WebWxError::Decode(format!("no QRLogin.code in {:?}", body)))?;

    if code != 200 {
        return Err(WebWxError::Provider { code });
    }

    QR_LOGIN_UUID_RE
        .captures(body)
        .map(|c| c[1].to_string())
        .ok_or_else(|| WebWxError::Decode(format!("no QRLogin.uuid in {:?}", body)))
}

/// State reported by the login-status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStatus {
    /// 408: nothing happened yet.
    Waiting,
    /// 201: the QR code was scanned; waiting for confirmation on the phone.
    Scanned,
    /// 200: confirmed; the redirect target carries the bootstrap parameters.
    Confirmed {
        /// Redirect target.
        redirect_uri: String,
    },
    /// 400: the UUID expired.
    Expired,
    /// Any other code.
    Other(i64),
}

/// Parses the login-status reply.
///
/// ```text
/// window.code=200;
/// window.redirect_uri="https://wx.qq.com/cgi-bin/mmwebwx-bin/webwxnewloginpage?ticket=...";
/// ```
pub fn parse_login_status(body: &str) -> WebWxResult<LoginStatus> {
    let code = LOGIN_CODE_RE
        .captures(body)
        .and_then(|c| c[1].parse::<i64>().ok())
        .ok_or_else(|| WebWxError::Decode(format!("no window.code in {:?}", body)))?;

    Ok(match code {
        408 => LoginStatus::Waiting,
        201 => LoginStatus::Scanned,
        400 => LoginStatus::Expired,
        200 => {
            let redirect_uri = REDIRECT_RE
                .captures(body)
                .map(|c| c[1].to_string())
                .ok_or_else(|| WebWxError::Decode("confirmed login without redirect".into()))?;
            LoginStatus::Confirmed { redirect_uri }
        }
        other => LoginStatus::Other(other),
    })
}

/// Session bootstrap values returned by the new-login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    /// `wxsid`.
    pub sid: String,
    /// `skey`.
    pub skey: String,
    /// `wxuin`.
    pub uin: String,
    /// `pass_ticket`.
    pub pass_ticket: String,
}

/// Parses the new-login page XML.
///
/// ```text
/// <error><ret>0</ret><message></message><skey>@crypt_...</skey><wxsid>...</wxsid>
/// <wxuin>...</wxuin><pass_ticket>...</pass_ticket><isgrayscale>1</isgrayscale></error>
/// ```
pub fn parse_login_page(body: &str) -> WebWxResult<LoginCredentials> {
    let fields: HashMap<&str, &str> = XML_FIELD_RE
        .captures_iter(body)
        .filter(|c| c.get(1).map(|m| m.as_str()) == c.get(3).map(|m| m.as_str()))
        .filter_map(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
        .collect();

    let ret = fields
        .get("ret")
        .and_then(|v| v.trim().parse::<i64>().ok())
        .ok_or_else(|| WebWxError::Decode("login page without <ret>".into()))?;
    if ret != 0 {
        return Err(WebWxError::Provider { code: ret });
    }

    let field = |name: &str| -> WebWxResult<String> {
        fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| WebWxError::Decode(format!("login page without <{}>", name)))
    };

    Ok(LoginCredentials {
        sid: field("wxsid")?,
        skey: field("skey")?,
        uin: field("wxuin")?,
        pass_ticket: field("pass_ticket")?,
    })
}
