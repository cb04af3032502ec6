// SPDX-License-Identifier: MPL-2.0
//! Notification identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide sequence shared by every [`IdGenerator`].
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a notification.
///
/// Ids are opaque strings. They stay stable for the lifetime of the
/// notification and are never handed out twice within a process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(String);

impl NotificationId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rebuilds an id received back from a rendering layer.
impl From<String> for NotificationId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for NotificationId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Produces [`NotificationId`]s.
///
/// An id has the shape `<millis>-<sequence>-<salt>`, all lowercase hex. The
/// sequence alone guarantees uniqueness, even for ids minted within the same
/// millisecond; the timestamp and random salt keep ids from separate runs
/// distinguishable in logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdGenerator;

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn next(&self) -> NotificationId {
        let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let millis = chrono::Utc::now().timestamp_millis().max(0);
        let salt: u32 = rand::random();
        NotificationId(format!("{millis:x}-{sequence:x}-{salt:08x}"))
    }
}
