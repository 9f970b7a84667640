// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Session Runner
//!
//! Owns the polling task. Shutdown can be requested by the engine (expiry
//! threshold) or by the embedding process, and the task may also end on its
//! own (a panicking handler). In every case the runner stops the loop, joins
//! it and then attempts a best-effort logout.

use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::error::{WebWxError, WebWxResult};
use crate::login::{LoginState, LoginStateMachine};
use crate::network::Transport;
use crate::sync::PollingEngine;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Consecutive expiries recorded when polling stopped.
    pub expiries: u32,
    /// True if the engine itself requested the shutdown.
    pub expired: bool,
}

/// Background polling task plus its cancellation tokens.
pub struct SessionRunner<T: Transport + 'static> {
    login: LoginStateMachine<T>,
    shutdown: CancellationToken,
    stop: CancellationToken,
    task: JoinHandle<PollingEngine<T>>,
}

impl<T: Transport + 'static> SessionRunner<T> {
    /// Spawns the polling task. The login must be `Ready`.
    pub fn start(login: LoginStateMachine<T>, mut engine: PollingEngine<T>) -> WebWxResult<Self> {
        if login.state() != LoginState::Ready {
            return Err(WebWxError::InvalidState(format!(
                "cannot start polling in state {:?}",
                login.state()
            )));
        }

        let shutdown = engine.shutdown_token().clone();
        let stop = CancellationToken::new();
        let loop_stop = stop.clone();
        let task = tokio::spawn(async move {
            engine.run(loop_stop).await;
            engine
        });

        Ok(SessionRunner {
            login,
            shutdown,
            stop,
            task,
        })
    }

    /// Token that requests shutdown when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Requests shutdown.
    pub fn request_shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Waits for shutdown or for the polling task to end, then logs out.
    ///
    /// A task that panicked is reported as [`WebWxError::Task`] after the
    /// logout attempt.
    pub async fn wait(mut self) -> WebWxResult<RunSummary> {
        let joined = tokio::select! {
            _ = self.shutdown.cancelled() => None,
            joined = &mut self.task => Some(joined),
        };
        self.finish(joined).await
    }

    /// Stops polling now and logs out.
    pub async fn stop(self) -> WebWxResult<RunSummary> {
        self.finish(None).await
    }

    async fn finish(
        mut self,
        joined: Option<Result<PollingEngine<T>, JoinError>>,
    ) -> WebWxResult<RunSummary> {
        info!("shutting down");
        self.stop.cancel();
        self.shutdown.cancel();
        let joined = match joined {
            Some(joined) => joined,
            None => (&mut self.task).await,
        };

        let logout = self.login.logout().await;

        let engine = joined.map_err(|e| {
            error!(error = %e, "polling task failed");
            WebWxError::Task(e.to_string())
        })?;
        logout?;

        let window = engine.retry_window();
        Ok(RunSummary {
            expiries: window.count(),
            expired: window.is_exhausted(),
        })
    }
}
