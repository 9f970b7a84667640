// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration for the web session.

use std::time::Duration;

use super::error::{WebWxError, WebWxResult};
use crate::network::TransportConfig;
use crate::sync::DEFAULT_EXPIRY_THRESHOLD;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct WebWxConfig {
    /// Base URL of the login host (jslogin and login-status endpoints).
    pub login_base: String,

    /// Prefix the login UUID is appended to inside the QR code.
    pub qr_base: String,

    /// Web client application id.
    pub app_id: String,

    /// Language sent with every authenticated call.
    pub lang: String,

    /// Consecutive session expiries before shutdown is requested.
    pub expiry_threshold: u32,

    /// Upper bound on waiting for the scan to be confirmed.
    pub scan_timeout: Duration,

    /// HTTP transport settings.
    pub transport: TransportConfig,
}

impl Default for WebWxConfig {
    fn default() -> Self {
        Self {
            login_base: "https://login.wx.qq.com".to_string(),
            qr_base: "https://login.weixin.qq.com/l/".to_string(),
            app_id: "wx782c26e4c19acffb".to_string(),
            lang: "zh_CN".to_string(),
            expiry_threshold: DEFAULT_EXPIRY_THRESHOLD,
            scan_timeout: Duration::from_secs(300),
            transport: TransportConfig::default(),
        }
    }
}

impl WebWxConfig {
    /// Use a different login host (e.g. for the international service).
    pub fn with_login_base(mut self, login_base: impl Into<String>) -> Self {
        self.login_base = login_base.into();
        self
    }

    /// Override the expiry threshold.
    pub fn with_expiry_threshold(mut self, threshold: u32) -> Self {
        self.expiry_threshold = threshold;
        self
    }

    /// Override the scan timeout.
    pub fn with_scan_timeout(mut self, timeout: Duration) -> Self {
        self.scan_timeout = timeout;
        self
    }

    /// Override the transport settings.
    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Reads overrides from `WEBWX_*` environment variables.
    ///
    /// Recognised: `WEBWX_LOGIN_BASE`, `WEBWX_LANG`,
    /// `WEBWX_EXPIRY_THRESHOLD`, `WEBWX_SCAN_TIMEOUT_SECS`,
    /// `WEBWX_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> WebWxResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> WebWxResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup("WEBWX_LOGIN_BASE") {
            config.login_base = base;
        }
        if let Some(lang) = lookup("WEBWX_LANG") {
            config.lang = lang;
        }
        if let Some(value) = lookup("WEBWX_EXPIRY_THRESHOLD") {
            config.expiry_threshold = parse_number("WEBWX_EXPIRY_THRESHOLD", &value)?;
            if config.expiry_threshold == 0 {
                return Err(WebWxError::Configuration(
                    "WEBWX_EXPIRY_THRESHOLD must be at least 1".into(),
                ));
            }
        }
        if let Some(value) = lookup("WEBWX_SCAN_TIMEOUT_SECS") {
            config.scan_timeout =
                Duration::from_secs(parse_number("WEBWX_SCAN_TIMEOUT_SECS", &value)?);
        }
        if let Some(value) = lookup("WEBWX_REQUEST_TIMEOUT_SECS") {
            config.transport.request_timeout =
                Duration::from_secs(parse_number("WEBWX_REQUEST_TIMEOUT_SECS", &value)?);
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> WebWxResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| WebWxError::Configuration(format!("{} is not a number: {:?}", name, value)))
}
