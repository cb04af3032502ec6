// SPDX-License-Identifier: MPL-2.0
//! Toast notification and confirmation orchestration.
//!
//! Notifications appear temporarily to report the outcome of an action (save
//! success, errors, etc.) and then close on their own. Confirmations stay up
//! until the user picks one of two outcomes, replacing a blocking prompt.
//!
//! # Components
//!
//! - [`id`] - `IdGenerator` minting process-unique `NotificationId`s
//! - [`notification`] - `Notification` entity, its `Kind` and lifecycle `State`
//! - [`store`] - `NotificationStore`, the newest-first collection of live entries
//! - [`lifecycle`] - `LifecycleEngine`, owner of every auto-close and removal timer
//! - [`confirm`] - `ConfirmationFlow`, exactly-once settlement of confirmations
//! - [`center`] - `NotificationCenter`, the service object collaborators hold
//!
//! # Lifecycle
//!
//! ```text
//! ACTIVE ──auto-close timer / close()──▶ CLOSING ──removal delay──▶ REMOVED
//!    └──────────────────── remove() ──────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use toast_relay::config::Config;
//! use toast_relay::notifications::{ConfirmSpec, NotificationCenter, NotificationSpec};
//!
//! # async fn run() -> toast_relay::error::Result<()> {
//! let center = NotificationCenter::new(Config::default())?;
//!
//! center.add(NotificationSpec::success("Invoice saved"));
//!
//! let id = center.confirm(
//!     ConfirmSpec::new("Delete this invoice?")
//!         .on_confirm(|| println!("deleted"))
//!         .on_cancel(|| println!("kept")),
//! );
//! center.resolve_confirm(&id);
//!
//! for toast in center.list() {
//!     println!("{} {}", toast.kind(), toast.message());
//! }
//! # Ok(())
//! # }
//! ```

pub mod center;
pub mod confirm;
pub mod id;
pub mod lifecycle;
pub mod notification;
pub mod store;

pub use center::{Event, Message as NotificationMessage, NotificationCenter, Notifier};
pub use confirm::{Callback, ConfirmLabels, ConfirmSpec, ConfirmationFlow, Resolution};
pub use id::{IdGenerator, NotificationId};
pub use lifecycle::{LifecycleEngine, Transition};
pub use notification::{Kind, Notification, NotificationSpec, State};
pub use store::NotificationStore;
