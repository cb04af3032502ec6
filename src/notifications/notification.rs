// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` entity, its `Kind` and lifecycle
//! `State`, and the `NotificationSpec` builder collaborators use to request one.

use super::confirm::ConfirmLabels;
use super::id::NotificationId;
use crate::config::{Config, MAX_AUTO_CLOSE_MS};
use std::fmt;
use std::time::{Duration, Instant};

/// Kind determines the default display duration and visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Error,
    /// Something the user should know about that did not block the operation.
    Warning,
    /// Neutral information.
    #[default]
    Info,
    /// Awaiting a two-outcome user decision. Never auto-closes.
    Confirm,
}

impl Kind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Success => "success",
            Kind::Error => "error",
            Kind::Warning => "warning",
            Kind::Info => "info",
            Kind::Confirm => "confirm",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Lifecycle state. Ordered so that a notification only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    /// Visible and awaiting auto-close or user action.
    Active,
    /// Playing its exit transition; eviction is scheduled.
    Closing,
    /// Evicted. Never observed through `list()`.
    Removed,
}

/// Request for a standard notification.
///
/// ```
/// use std::time::Duration;
/// use toast_relay::notifications::{Kind, NotificationSpec};
///
/// let spec = NotificationSpec::error("Upload failed")
///     .with_title("Storage")
///     .auto_close(Duration::from_secs(10));
/// assert_eq!(spec.kind(), Kind::Error);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSpec {
    kind: Kind,
    title: Option<String>,
    message: String,
    auto_close: Option<Duration>,
}

impl NotificationSpec {
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Kind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Kind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Kind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Kind::Error, message)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Overrides the kind's default auto-close duration.
    ///
    /// A zero duration is ignored and the kind default applies. Durations
    /// above the configurable maximum are clamped to it.
    #[must_use]
    pub fn auto_close(mut self, duration: Duration) -> Self {
        self.auto_close = Some(duration);
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }
}

/// A notification as seen by the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    id: NotificationId,
    kind: Kind,
    title: Option<String>,
    message: String,
    auto_close: Option<Duration>,
    state: State,
    created_at: Instant,
    /// Button labels; present only on confirmation requests.
    labels: Option<ConfirmLabels>,
}

impl Notification {
    /// Builds an ACTIVE notification, resolving the auto-close duration.
    pub(crate) fn from_spec(id: NotificationId, spec: NotificationSpec, config: &Config) -> Self {
        let auto_close = match spec.kind {
            Kind::Confirm => None,
            kind => spec
                .auto_close
                .filter(|d| !d.is_zero())
                .map(|d| d.min(Duration::from_millis(MAX_AUTO_CLOSE_MS)))
                .or_else(|| config.auto_close_for(kind)),
        };
        Self {
            id,
            kind: spec.kind,
            title: spec.title,
            message: spec.message,
            auto_close,
            state: State::Active,
            created_at: Instant::now(),
            labels: None,
        }
    }

    pub(crate) fn confirmation(
        id: NotificationId,
        title: String,
        message: String,
        labels: ConfirmLabels,
    ) -> Self {
        Self {
            id,
            kind: Kind::Confirm,
            title: Some(title),
            message,
            auto_close: None,
            state: State::Active,
            created_at: Instant::now(),
            labels: Some(labels),
        }
    }

    /// Moves the state forward. Returns `false` (and changes nothing) if
    /// `next` is not strictly later than the current state.
    pub(crate) fn advance(&mut self, next: State) -> bool {
        if next > self.state {
            self.state = next;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Delay after creation before the notification starts closing on its own.
    #[must_use]
    pub fn auto_close(&self) -> Option<Duration> {
        self.auto_close
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    #[must_use]
    pub fn labels(&self) -> Option<&ConfirmLabels> {
        self.labels.as_ref()
    }
}
