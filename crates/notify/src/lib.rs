// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Toast-style user notifications as an injected capability.
//!
//! The wizard controller reports outcomes (validation failures, draft
//! saves, submission results) through a [`Notifier`] rather than a
//! global singleton, so the state machine stays testable in isolation.

use std::sync::Mutex;
use tracing::{error, info, warn};

/// The display severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// An operation completed as requested.
    Success,
    /// Something needs the user's attention but nothing is lost.
    Warning,
    /// An operation failed.
    Error,
}

/// A single user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The display severity.
    pub severity: Severity,
    /// The message shown to the user.
    pub message: String,
}

impl Notification {
    /// Creates an info notification.
    #[must_use]
    pub const fn info(message: String) -> Self {
        Self {
            severity: Severity::Info,
            message,
        }
    }

    /// Creates a success notification.
    #[must_use]
    pub const fn success(message: String) -> Self {
        Self {
            severity: Severity::Success,
            message,
        }
    }

    /// Creates a warning notification.
    #[must_use]
    pub const fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }

    /// Creates an error notification.
    #[must_use]
    pub const fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }
}

/// The capability of surfacing notifications to the user.
pub trait Notifier: Send {
    /// Surfaces one notification.
    fn notify(&self, notification: Notification);
}

/// A notifier that writes notifications to the tracing log.
///
/// Used where no interactive surface exists (headless runs, tests that
/// do not inspect notifications).
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    /// Creates a new `LogNotifier`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info | Severity::Success => {
                info!(message = %notification.message, "notification");
            }
            Severity::Warning => warn!(message = %notification.message, "notification"),
            Severity::Error => error!(message = %notification.message, "notification"),
        }
    }
}

/// A notifier that records notifications in memory.
///
/// Tests assert on the recorded sequence to verify what the user would
/// have seen.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    recorded: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    /// Creates a new empty `MemoryNotifier`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every notification recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn recorded(&self) -> Vec<Notification> {
        self.recorded
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Removes and returns every notification recorded so far.
    #[must_use]
    pub fn take(&self) -> Vec<Notification> {
        self.recorded
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.recorded.lock() {
            guard.push(notification);
        }
    }
}
