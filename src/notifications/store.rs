// SPDX-License-Identifier: MPL-2.0
//! Ordered collection of live notifications.

use super::id::NotificationId;
use super::notification::{Notification, State};
use std::collections::VecDeque;

/// Holds ACTIVE and CLOSING notifications, newest first.
///
/// The store only keeps data in order; timers and state transitions are
/// driven by the lifecycle engine.
#[derive(Debug, Default)]
pub struct NotificationStore {
    entries: VecDeque<Notification>,
}

impl NotificationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts at the head of the collection.
    pub fn insert(&mut self, notification: Notification) {
        self.entries.push_front(notification);
    }

    #[must_use]
    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: &NotificationId) -> Option<&mut Notification> {
        self.entries.iter_mut().find(|n| n.id() == id)
    }

    #[must_use]
    pub fn state(&self, id: &NotificationId) -> Option<State> {
        self.get(id).map(Notification::state)
    }

    /// Evicts the entry, returning it in the REMOVED state.
    ///
    /// Absent ids yield `None`.
    pub fn remove(&mut self, id: &NotificationId) -> Option<Notification> {
        let pos = self.entries.iter().position(|n| n.id() == id)?;
        let mut removed = self.entries.remove(pos)?;
        removed.advance(State::Removed);
        Some(removed)
    }

    /// Evicts every entry, newest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.entries
            .drain(..)
            .map(|mut n| {
                n.advance(State::Removed);
                n
            })
            .collect()
    }

    /// Snapshot in head-first order.
    #[must_use]
    pub fn list(&self) -> Vec<Notification> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
