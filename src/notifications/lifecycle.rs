// SPDX-License-Identifier: MPL-2.0
//! Timer-driven lifecycle: ACTIVE → CLOSING → REMOVED.
//!
//! Every notification owns at most one pending timer at a time, keyed by its
//! id. An auto-close timer moves it to CLOSING; entering CLOSING (by timer or
//! by hand) swaps that timer for an eviction timer that fires after the
//! removal delay. Each armed timer carries a token, and a firing is only
//! honoured if its token is still the one registered for the id. A timer that
//! was superseded or cancelled can therefore never touch the entry again, even
//! if its task was already past the sleep when the abort landed.

use super::id::NotificationId;
use super::notification::{Notification, State};
use super::store::NotificationStore;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Deadline used when a delay would overflow the clock. Roughly 30 years.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Transition a pending timer will attempt when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// ACTIVE → CLOSING.
    Close,
    /// CLOSING → REMOVED.
    Evict,
}

/// Delivered to the engine's sink when a timer expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerFired {
    pub id: NotificationId,
    pub transition: Transition,
    token: u64,
}

/// Receives expired timers, typically to re-enter the owning service and call
/// [`LifecycleEngine::fire`] under its lock.
pub type TimerSink = Arc<dyn Fn(TimerFired) + Send + Sync>;

struct PendingTimer {
    token: u64,
    transition: Transition,
    task: JoinHandle<()>,
}

pub struct LifecycleEngine {
    runtime: Handle,
    removal_delay: Duration,
    sink: TimerSink,
    timers: HashMap<NotificationId, PendingTimer>,
    next_token: u64,
}

impl fmt::Debug for LifecycleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleEngine")
            .field("removal_delay", &self.removal_delay)
            .field("pending", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl LifecycleEngine {
    /// Timers are spawned on `runtime`, so the engine can be driven from
    /// threads that are not inside a tokio context.
    pub fn new(runtime: Handle, removal_delay: Duration, sink: TimerSink) -> Self {
        Self {
            runtime,
            removal_delay,
            sink,
            timers: HashMap::new(),
            next_token: 0,
        }
    }

    #[must_use]
    pub fn removal_delay(&self) -> Duration {
        self.removal_delay
    }

    /// Inserts a freshly created notification and arms its auto-close timer.
    pub fn admit(&mut self, store: &mut NotificationStore, notification: Notification) {
        let id = notification.id().clone();
        let auto_close = notification.auto_close();
        store.insert(notification);
        if let Some(delay) = auto_close {
            self.schedule(id, Transition::Close, delay);
        }
    }

    /// Moves an ACTIVE entry to CLOSING and arms its eviction.
    ///
    /// Any pending auto-close timer is cancelled. Returns `false` if the entry
    /// is absent or already past ACTIVE.
    pub fn close(&mut self, store: &mut NotificationStore, id: &NotificationId) -> bool {
        let Some(notification) = store.get_mut(id) else {
            return false;
        };
        if !notification.advance(State::Closing) {
            return false;
        }
        self.schedule(id.clone(), Transition::Evict, self.removal_delay);
        tracing::debug!(%id, delay_ms = self.removal_delay.as_millis() as u64, "notification closing");
        true
    }

    /// Evicts the entry immediately, cancelling whatever timer it owns.
    pub fn evict(&mut self, store: &mut NotificationStore, id: &NotificationId) -> Option<Notification> {
        self.cancel(id);
        let removed = store.remove(id)?;
        tracing::debug!(%id, "notification removed");
        Some(removed)
    }

    /// Evicts every entry and cancels every timer.
    pub fn evict_all(&mut self, store: &mut NotificationStore) -> Vec<Notification> {
        self.cancel_all();
        store.drain()
    }

    /// Applies an expired timer. Returns the state the entry moved to, or
    /// `None` when the timer was stale or the entry had already moved on.
    pub fn fire(&mut self, store: &mut NotificationStore, fired: &TimerFired) -> Option<State> {
        if !self.claim(fired) {
            tracing::debug!(id = %fired.id, transition = ?fired.transition, "ignoring stale timer");
            return None;
        }
        match fired.transition {
            Transition::Close => self.close(store, &fired.id).then_some(State::Closing),
            Transition::Evict => {
                if store.state(&fired.id) != Some(State::Closing) {
                    return None;
                }
                self.evict(store, &fired.id).map(|n| n.state())
            }
        }
    }

    /// Cancels the timer owned by `id`, if any.
    pub fn cancel(&mut self, id: &NotificationId) -> bool {
        match self.timers.remove(id) {
            Some(pending) => {
                pending.task.abort();
                tracing::debug!(%id, transition = ?pending.transition, "timer cancelled");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, pending) in self.timers.drain() {
            pending.task.abort();
        }
    }

    /// Number of armed timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn pending_transition(&self, id: &NotificationId) -> Option<Transition> {
        self.timers.get(id).map(|p| p.transition)
    }

    /// Arms a one-shot timer for `id`, replacing (and aborting) any previous one.
    fn schedule(&mut self, id: NotificationId, transition: Transition, delay: Duration) {
        let token = self.next_token;
        self.next_token += 1;

        let now = Instant::now();
        let deadline = now.checked_add(delay).unwrap_or(now + FAR_FUTURE);
        let sink = Arc::clone(&self.sink);
        let fired = TimerFired {
            id: id.clone(),
            transition,
            token,
        };
        let task = self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            sink(fired);
        });

        let pending = PendingTimer {
            token,
            transition,
            task,
        };
        if let Some(previous) = self.timers.insert(id, pending) {
            previous.task.abort();
        }
    }

    /// Unregisters the timer if `fired` is still the current one for its id.
    fn claim(&mut self, fired: &TimerFired) -> bool {
        match self.timers.get(&fired.id) {
            Some(pending) if pending.token == fired.token => {
                self.timers.remove(&fired.id);
                true
            }
            _ => false,
        }
    }
}

impl Drop for LifecycleEngine {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
