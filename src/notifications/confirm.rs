// SPDX-License-Identifier: MPL-2.0
//! Two-outcome confirmation requests.
//!
//! A confirmation is a notification of kind `Confirm` that never auto-closes.
//! Its two callbacks are parked here until the first resolution arrives;
//! settling removes them, so neither can run a second time.

use super::id::NotificationId;
use crate::config::ConfirmConfig;
use std::collections::HashMap;
use std::fmt;

/// Callback run when a confirmation is settled.
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Outcome chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Confirmed,
    Cancelled,
}

/// Button labels shown on a confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmLabels {
    pub confirm_text: String,
    pub cancel_text: String,
}

/// Request for a confirmation.
///
/// ```
/// use toast_relay::notifications::ConfirmSpec;
///
/// let spec = ConfirmSpec::new("Delete 3 invoices?")
///     .confirm_text("Delete")
///     .on_confirm(|| println!("deleting"))
///     .on_cancel(|| println!("kept"));
/// ```
#[derive(Default)]
pub struct ConfirmSpec {
    title: Option<String>,
    message: String,
    confirm_text: Option<String>,
    cancel_text: Option<String>,
    on_confirm: Option<Callback>,
    on_cancel: Option<Callback>,
}

impl fmt::Debug for ConfirmSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmSpec")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("confirm_text", &self.confirm_text)
            .field("cancel_text", &self.cancel_text)
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

impl ConfirmSpec {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn on_confirm(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_confirm = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_cancel(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_cancel = Some(Box::new(callback));
        self
    }

    /// Splits the request into display parts (title, message, labels) and the
    /// parked callbacks, filling blanks from `defaults`.
    pub(crate) fn into_parts(
        self,
        defaults: &ConfirmConfig,
    ) -> (String, String, ConfirmLabels, PendingConfirmation) {
        let labels = ConfirmLabels {
            confirm_text: self
                .confirm_text
                .unwrap_or_else(|| defaults.confirm_text.clone()),
            cancel_text: self
                .cancel_text
                .unwrap_or_else(|| defaults.cancel_text.clone()),
        };
        let pending = PendingConfirmation {
            on_confirm: self.on_confirm,
            on_cancel: self.on_cancel,
        };
        let title = self.title.unwrap_or_else(|| defaults.title.clone());
        (title, self.message, labels, pending)
    }
}

/// Callbacks awaiting a decision.
pub(crate) struct PendingConfirmation {
    on_confirm: Option<Callback>,
    on_cancel: Option<Callback>,
}

impl PendingConfirmation {
    fn into_callback(self, resolution: Resolution) -> Option<Callback> {
        match resolution {
            Resolution::Confirmed => self.on_confirm,
            Resolution::Cancelled => self.on_cancel,
        }
    }
}

/// Registry of unresolved confirmations.
#[derive(Default)]
pub struct ConfirmationFlow {
    pending: HashMap<NotificationId, PendingConfirmation>,
}

impl fmt::Debug for ConfirmationFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmationFlow")
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl ConfirmationFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&mut self, id: NotificationId, pending: PendingConfirmation) {
        self.pending.insert(id, pending);
    }

    /// Settles `id`, handing back the callback matching `resolution`.
    ///
    /// The other callback is dropped unrun. A second call for the same id
    /// yields `None`.
    pub fn settle(&mut self, id: &NotificationId, resolution: Resolution) -> Option<Callback> {
        self.pending
            .remove(id)
            .and_then(|pending| pending.into_callback(resolution))
    }

    #[must_use]
    pub fn is_pending(&self, id: &NotificationId) -> bool {
        self.pending.contains_key(id)
    }

    /// Settles every outstanding confirmation as cancelled, returning each
    /// id with its `on_cancel` callback, if any.
    pub fn cancel_all(&mut self) -> Vec<(NotificationId, Option<Callback>)> {
        self.pending
            .drain()
            .map(|(id, pending)| (id, pending.into_callback(Resolution::Cancelled)))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
