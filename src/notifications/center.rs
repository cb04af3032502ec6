// SPDX-License-Identifier: MPL-2.0
//! The notification service handed to collaborators.
//!
//! `NotificationCenter` is a cheap-to-clone handle over one shared core
//! (store, lifecycle engine, confirmation flow). Every operation runs as a
//! single critical section; user callbacks run after the lock is released, so
//! they may call back into the center.

use super::confirm::{Callback, ConfirmSpec, ConfirmationFlow, Resolution};
use super::id::{IdGenerator, NotificationId};
use super::lifecycle::{LifecycleEngine, TimerFired, TimerSink};
use super::notification::{Kind, Notification, NotificationSpec, State};
use super::store::NotificationStore;
use crate::config::{Config, EVENT_CHANNEL_CAPACITY};
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::broadcast;

/// Messages a rendering layer sends back on user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Close button: start the exit transition.
    Dismiss(NotificationId),
    /// Accept button of a confirmation.
    Confirm(NotificationId),
    /// Reject button of a confirmation.
    Cancel(NotificationId),
}

/// Change feed entry, published on every creation and transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Added { id: NotificationId, kind: Kind },
    Resolved { id: NotificationId, resolution: Resolution },
    Closing { id: NotificationId },
    Removed { id: NotificationId },
}

/// The operations collaborators depend on.
///
/// Form handlers and service wrappers take a `&impl Notifier` rather than a
/// concrete center, so they can be exercised against a recording double.
pub trait Notifier {
    fn add(&self, spec: NotificationSpec) -> NotificationId;
    fn confirm(&self, spec: ConfirmSpec) -> NotificationId;
    fn remove(&self, id: &NotificationId);
    fn list(&self) -> Vec<Notification>;
}

struct Core {
    config: Config,
    ids: IdGenerator,
    store: NotificationStore,
    lifecycle: LifecycleEngine,
    confirmations: ConfirmationFlow,
    events: broadcast::Sender<Event>,
}

impl Core {
    fn publish(&self, event: Event) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }

    fn on_timer(&mut self, fired: &TimerFired) {
        match self.lifecycle.fire(&mut self.store, fired) {
            Some(State::Closing) => self.publish(Event::Closing {
                id: fired.id.clone(),
            }),
            Some(State::Removed) => self.publish(Event::Removed {
                id: fired.id.clone(),
            }),
            _ => {}
        }
    }

    /// Moves an ACTIVE entry to CLOSING. A still-pending confirmation is
    /// settled with `resolution` and its callback handed back.
    ///
    /// Returns `None` if the entry is absent or has already left ACTIVE.
    fn close_entry(&mut self, id: &NotificationId, resolution: Resolution) -> Option<Settled> {
        if !self.lifecycle.close(&mut self.store, id) {
            return None;
        }
        let settled = if self.confirmations.is_pending(id) {
            let callback = self.confirmations.settle(id, resolution);
            self.publish(Event::Resolved {
                id: id.clone(),
                resolution,
            });
            tracing::debug!(%id, ?resolution, "confirmation resolved");
            Settled { callback }
        } else {
            Settled { callback: None }
        };
        self.publish(Event::Closing { id: id.clone() });
        Some(settled)
    }
}

struct Settled {
    callback: Option<Callback>,
}

/// Runs each callback in turn. A panicking callback is logged and does not
/// stop the ones after it from running.
fn run_callbacks(callbacks: impl IntoIterator<Item = Callback>) {
    for callback in callbacks {
        if panic::catch_unwind(AssertUnwindSafe(callback)).is_err() {
            tracing::error!("confirmation callback panicked");
        }
    }
}

/// Shared handle to the notification core.
#[derive(Clone)]
pub struct NotificationCenter {
    core: Arc<Mutex<Core>>,
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.core.lock();
        f.debug_struct("NotificationCenter")
            .field("live", &core.store.len())
            .field("lifecycle", &core.lifecycle)
            .field("confirmations", &core.confirmations)
            .finish()
    }
}

impl NotificationCenter {
    /// Creates a center whose timers run on the current tokio runtime.
    ///
    /// Fails with [`Error::NoRuntime`] outside of a runtime context.
    pub fn new(config: Config) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        Ok(Self::with_runtime(config, runtime))
    }

    /// Creates a center whose timers run on `runtime`.
    ///
    /// The resulting handle may be used from any thread.
    pub fn with_runtime(config: Config, runtime: Handle) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let core = Arc::new_cyclic(|weak: &Weak<Mutex<Core>>| {
            let weak = weak.clone();
            let sink: TimerSink = Arc::new(move |fired: TimerFired| {
                // A dropped center has already aborted its timers; this only
                // guards the race with a timer that was mid-flight.
                if let Some(core) = weak.upgrade() {
                    core.lock().on_timer(&fired);
                }
            });
            Mutex::new(Core {
                lifecycle: LifecycleEngine::new(runtime, config.removal_delay(), sink),
                config,
                ids: IdGenerator::new(),
                store: NotificationStore::new(),
                confirmations: ConfirmationFlow::new(),
                events,
            })
        });
        Self { core }
    }

    #[must_use]
    pub fn config(&self) -> Config {
        self.core.lock().config.clone()
    }

    /// Creates a standard notification at the head of the list.
    pub fn add(&self, spec: NotificationSpec) -> NotificationId {
        let mut core = self.core.lock();
        let id = core.ids.next();
        let notification = Notification::from_spec(id.clone(), spec, &core.config);
        let kind = notification.kind();

        match kind {
            Kind::Warning => {
                tracing::warn!(%id, body = notification.message(), "warning notification raised");
            }
            Kind::Error => {
                tracing::error!(%id, body = notification.message(), "error notification raised");
            }
            Kind::Success | Kind::Info | Kind::Confirm => {
                tracing::debug!(%id, %kind, "notification added");
            }
        }

        let core = &mut *core;
        core.lifecycle.admit(&mut core.store, notification);
        core.publish(Event::Added {
            id: id.clone(),
            kind,
        });
        id
    }

    /// Creates a confirmation request. It stays ACTIVE until
    /// [`resolve_confirm`](Self::resolve_confirm) or
    /// [`resolve_cancel`](Self::resolve_cancel) is called, or it is dismissed.
    pub fn confirm(&self, spec: ConfirmSpec) -> NotificationId {
        let mut core = self.core.lock();
        let core = &mut *core;
        let id = core.ids.next();
        let (title, message, labels, pending) = spec.into_parts(&core.config.confirm);
        let notification = Notification::confirmation(id.clone(), title, message, labels);

        core.confirmations.register(id.clone(), pending);
        core.lifecycle.admit(&mut core.store, notification);
        core.publish(Event::Added {
            id: id.clone(),
            kind: Kind::Confirm,
        });
        tracing::debug!(%id, "confirmation requested");
        id
    }

    /// Fires `on_confirm` and closes the request. Returns `false` (and does
    /// nothing) if the request was already resolved, dismissed or never
    /// existed.
    pub fn resolve_confirm(&self, id: &NotificationId) -> bool {
        self.resolve(id, Resolution::Confirmed)
    }

    /// Fires `on_cancel` and closes the request. Same gate as
    /// [`resolve_confirm`](Self::resolve_confirm).
    pub fn resolve_cancel(&self, id: &NotificationId) -> bool {
        self.resolve(id, Resolution::Cancelled)
    }

    fn resolve(&self, id: &NotificationId, resolution: Resolution) -> bool {
        let settled = {
            let mut core = self.core.lock();
            if core.store.get(id).map(Notification::kind) != Some(Kind::Confirm) {
                return false;
            }
            core.close_entry(id, resolution)
        };
        match settled {
            Some(settled) => {
                run_callbacks(settled.callback);
                true
            }
            None => false,
        }
    }

    /// Manual close: ACTIVE → CLOSING now, eviction after the removal delay.
    ///
    /// Dismissing an unresolved confirmation counts as cancelling it.
    pub fn close(&self, id: &NotificationId) {
        let settled = self.core.lock().close_entry(id, Resolution::Cancelled);
        if let Some(settled) = settled {
            run_callbacks(settled.callback);
        }
    }

    /// Evicts the entry immediately, skipping the removal delay.
    ///
    /// Unknown or already removed ids are ignored. Removing an unresolved
    /// confirmation counts as cancelling it.
    pub fn remove(&self, id: &NotificationId) {
        let callback = {
            let mut core = self.core.lock();
            let core = &mut *core;
            let pending = core.confirmations.is_pending(id);
            let callback = core.confirmations.settle(id, Resolution::Cancelled);
            if pending {
                core.publish(Event::Resolved {
                    id: id.clone(),
                    resolution: Resolution::Cancelled,
                });
            }
            if core.lifecycle.evict(&mut core.store, id).is_some() {
                core.publish(Event::Removed { id: id.clone() });
            }
            callback
        };
        run_callbacks(callback);
    }

    /// Evicts everything and cancels every timer. Unresolved confirmations
    /// are cancelled.
    pub fn clear(&self) {
        let callbacks = {
            let mut core = self.core.lock();
            let core = &mut *core;
            let mut callbacks = Vec::new();
            for (id, callback) in core.confirmations.cancel_all() {
                core.publish(Event::Resolved {
                    id,
                    resolution: Resolution::Cancelled,
                });
                callbacks.extend(callback);
            }
            for removed in core.lifecycle.evict_all(&mut core.store) {
                core.publish(Event::Removed {
                    id: removed.id().clone(),
                });
            }
            callbacks
        };
        run_callbacks(callbacks);
    }

    /// Handles a notification message from the rendering layer.
    pub fn handle_message(&self, message: &Message) {
        match message {
            Message::Dismiss(id) => self.close(id),
            Message::Confirm(id) => {
                self.resolve_confirm(id);
            }
            Message::Cancel(id) => {
                self.resolve_cancel(id);
            }
        }
    }

    /// Snapshot of live notifications, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<Notification> {
        self.core.lock().store.list()
    }

    #[must_use]
    pub fn get(&self, id: &NotificationId) -> Option<Notification> {
        self.core.lock().store.get(id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.core.lock().store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.core.lock().store.is_empty()
    }

    /// Number of armed timers. Zero once every notification has been evicted.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.core.lock().lifecycle.pending()
    }

    /// Subscribes to the change feed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.core.lock().events.subscribe()
    }
}

impl Notifier for NotificationCenter {
    fn add(&self, spec: NotificationSpec) -> NotificationId {
        NotificationCenter::add(self, spec)
    }

    fn confirm(&self, spec: ConfirmSpec) -> NotificationId {
        NotificationCenter::confirm(self, spec)
    }

    fn remove(&self, id: &NotificationId) {
        NotificationCenter::remove(self, id);
    }

    fn list(&self) -> Vec<Notification> {
        NotificationCenter::list(self)
    }
}
