// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Consecutive session-expiry counter.

/// Default number of consecutive expiries before shutdown is requested.
pub const DEFAULT_EXPIRY_THRESHOLD: u32 = 10;

/// Counts consecutive session-expired signals from the polling loop.
///
/// Only expiries are counted; other transient failures leave the window
/// untouched. Any successful iteration resets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryWindow {
    count: u32,
    threshold: u32,
}

impl Default for RetryWindow {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRY_THRESHOLD)
    }
}

impl RetryWindow {
    /// Creates a window escalating at `threshold` consecutive expiries.
    pub fn new(threshold: u32) -> Self {
        RetryWindow {
            count: 0,
            threshold: threshold.max(1),
        }
    }

    /// Records one expiry. Returns true once the threshold is reached.
    pub fn record_expiry(&mut self) -> bool {
        self.count = self.count.saturating_add(1);
        self.is_exhausted()
    }

    /// Clears the window after a successful iteration.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Current number of consecutive expiries.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Escalation threshold.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Returns true if the threshold has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.count >= self.threshold
    }
}
