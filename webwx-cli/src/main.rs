// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! WebWx CLI
//!
//! Logs in by QR code, keeps the session synchronized and logs every
//! change batch until Ctrl-C or until the session is gone for good.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use webwx_core::{ChangeBatch, HandlerError, MessageKind, QrArtifact, WebWx};

use config::CliConfig;

#[derive(Parser)]
#[command(name = "webwx")]
#[command(version, about = "Web IM session runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Login host base URL
    #[arg(
        long,
        global = true,
        env = "WEBWX_LOGIN_BASE",
        default_value = "https://login.wx.qq.com"
    )]
    login_base: String,

    /// Consecutive session expiries before shutting down
    #[arg(long, global = true, env = "WEBWX_EXPIRY_THRESHOLD", default_value_t = 10)]
    expiry_threshold: u32,

    /// Seconds to wait for the QR code to be scanned and confirmed
    #[arg(long, global = true, env = "WEBWX_SCAN_TIMEOUT_SECS", default_value_t = 300)]
    scan_timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and keep the session synchronized
    Run {
        /// Also write the login QR code as SVG to this path
        #[arg(long)]
        qr_svg: Option<PathBuf>,
    },

    /// Log in, print the contact count and log out
    Contacts,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("webwx_core=info".parse()?)
                .add_directive("webwx_cli=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let qr_svg = match &cli.command {
        Commands::Run { qr_svg } => qr_svg.clone(),
        Commands::Contacts => None,
    };
    let config = CliConfig {
        login_base: cli.login_base,
        expiry_threshold: cli.expiry_threshold,
        scan_timeout_secs: cli.scan_timeout,
        qr_svg,
    };

    let mut wx = WebWx::with_http(config.to_core_config()?).context("creating HTTP client")?;
    wx.on_messages(log_messages);
    wx.on_contacts(log_contacts);

    let svg_path = config.qr_svg.clone();
    wx.login(|qr| show_qr(qr, svg_path.as_deref()))
        .await
        .context("login failed")?;
    info!(user = %wx.user_name()?, contacts = wx.contacts().len(), "logged in");

    match cli.command {
        Commands::Contacts => {
            println!("{} contacts", wx.contacts().len());
            wx.login_machine().logout().await?;
        }
        Commands::Run { .. } => {
            let runner = wx.start()?;
            let shutdown = runner.shutdown_token();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received");
                    shutdown.cancel();
                }
            });

            let summary = runner.wait().await?;
            if summary.expired {
                warn!(expiries = summary.expiries, "session expired");
            }
        }
    }

    Ok(())
}

fn show_qr(qr: &QrArtifact, svg_path: Option<&std::path::Path>) {
    println!("{}", qr.terminal);
    println!("Scan with the mobile app, or open {}", qr.url);
    if let Some(path) = svg_path {
        match std::fs::write(path, &qr.svg) {
            Ok(()) => info!(path = %path.display(), "QR code written"),
            Err(e) => warn!(path = %path.display(), error = %e, "could not write QR code"),
        }
    }
}

fn log_messages(batch: &ChangeBatch) -> Result<(), HandlerError> {
    for message in &batch.added_messages {
        match message.kind() {
            MessageKind::StatusNotify => {}
            kind => info!(
                from = %message.from_user_name,
                to = %message.to_user_name,
                ?kind,
                "message"
            ),
        }
    }
    Ok(())
}

fn log_contacts(batch: &ChangeBatch) -> Result<(), HandlerError> {
    for contact in &batch.modified_contacts {
        info!(identity = %contact.user_name, name = %contact.display_name(), "contact updated");
    }
    for contact in &batch.deleted_contacts {
        info!(identity = %contact.user_name, "contact removed");
    }
    Ok(())
}
