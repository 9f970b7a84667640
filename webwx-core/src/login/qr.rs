// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Login QR code.

use qrcode::render::svg;
use qrcode::QrCode;

use crate::api::{WebWxError, WebWxResult};

/// QR code encoding the login URL for one UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrArtifact {
    /// Login UUID.
    pub uuid: String,
    /// URL encoded in the code.
    pub url: String,
    /// SVG rendering.
    pub svg: Vec<u8>,
    /// Block-character rendering for terminals.
    pub terminal: String,
}

impl QrArtifact {
    /// Renders the QR code for `uuid` under `qr_base`.
    ///
    /// Deterministic for a given base and UUID.
    pub fn generate(qr_base: &str, uuid: &str) -> WebWxResult<Self> {
        if uuid.is_empty() {
            return Err(WebWxError::InvalidInput("login uuid is empty".into()));
        }
        let url = format!("{}{}", qr_base, uuid);
        let code = QrCode::new(url.as_bytes())
            .map_err(|e| WebWxError::InvalidInput(format!("QR encoding failed: {}", e)))?;

        let terminal = code
            .render()
            .light_color(' ')
            .dark_color('█')
            .quiet_zone(true)
            .module_dimensions(2, 1)
            .build();

        let svg = code
            .render::<svg::Color<'_>>()
            .min_dimensions(256, 256)
            .build()
            .into_bytes();

        Ok(QrArtifact {
            uuid: uuid.to_string(),
            url,
            svg,
            terminal,
        })
    }
}
