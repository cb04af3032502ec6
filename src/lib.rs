// SPDX-License-Identifier: MPL-2.0
//! `toast_relay` keeps the transient notifications of an application: success
//! and error toasts that close on their own, and confirmation requests that
//! wait for exactly one user decision.
//!
//! Collaborators hold a [`notifications::NotificationCenter`] (or any
//! [`notifications::Notifier`]) and report outcomes through it; a rendering
//! layer polls `list()` or subscribes to the change feed.

#![doc(html_root_url = "https://docs.rs/toast_relay/0.1.0")]

pub mod config;
pub mod error;
pub mod notifications;
pub mod paths;
