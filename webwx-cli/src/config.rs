// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI Configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use webwx_core::WebWxConfig;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Login host base URL.
    pub login_base: String,
    /// Consecutive expiries before shutdown.
    pub expiry_threshold: u32,
    /// Seconds to wait for the scan to be confirmed.
    pub scan_timeout_secs: u64,
    /// Where to write the QR code as SVG, if anywhere.
    pub qr_svg: Option<PathBuf>,
}

impl CliConfig {
    /// Builds the core configuration.
    pub fn to_core_config(&self) -> Result<WebWxConfig> {
        if self.expiry_threshold == 0 {
            bail!("--expiry-threshold must be at least 1");
        }
        Ok(WebWxConfig::default()
            .with_login_base(self.login_base.clone())
            .with_expiry_threshold(self.expiry_threshold)
            .with_scan_timeout(Duration::from_secs(self.scan_timeout_secs)))
    }
}
