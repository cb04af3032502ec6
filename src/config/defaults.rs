// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Auto-close**: Per-kind display durations before a notification starts closing
//! - **Removal delay**: Exit-transition grace period between closing and eviction
//! - **Confirmation**: Default labels for confirmation requests
//! - **Events**: Change-feed buffering

// ==========================================================================
// Auto-close Defaults (milliseconds)
// ==========================================================================

/// Default auto-close duration for success notifications.
pub const DEFAULT_SUCCESS_MS: u64 = 5_000;

/// Default auto-close duration for info notifications.
pub const DEFAULT_INFO_MS: u64 = 5_000;

/// Default auto-close duration for warning notifications.
pub const DEFAULT_WARNING_MS: u64 = 6_000;

/// Default auto-close duration for error notifications.
pub const DEFAULT_ERROR_MS: u64 = 7_000;

/// Minimum accepted auto-close duration.
pub const MIN_AUTO_CLOSE_MS: u64 = 1;

/// Maximum accepted auto-close duration (10 minutes).
pub const MAX_AUTO_CLOSE_MS: u64 = 600_000;

// ==========================================================================
// Removal Delay Defaults (milliseconds)
// ==========================================================================

/// Delay between entering CLOSING and eviction, applied to every kind.
pub const DEFAULT_REMOVAL_DELAY_MS: u64 = 300;

/// Minimum accepted removal delay.
pub const MIN_REMOVAL_DELAY_MS: u64 = 1;

/// Maximum accepted removal delay.
pub const MAX_REMOVAL_DELAY_MS: u64 = 5_000;

// ==========================================================================
// Confirmation Defaults
// ==========================================================================

/// Title used when a confirmation request does not supply one.
pub const DEFAULT_CONFIRM_TITLE: &str = "Confirm action";

/// Label of the accepting button.
pub const DEFAULT_CONFIRM_TEXT: &str = "Confirm";

/// Label of the rejecting button.
pub const DEFAULT_CANCEL_TEXT: &str = "Cancel";

// ==========================================================================
// Event Defaults
// ==========================================================================

/// Capacity of the broadcast channel feeding change subscribers.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_AUTO_CLOSE_MS > 0);
    assert!(MAX_AUTO_CLOSE_MS >= MIN_AUTO_CLOSE_MS);
    assert!(DEFAULT_SUCCESS_MS >= MIN_AUTO_CLOSE_MS && DEFAULT_SUCCESS_MS <= MAX_AUTO_CLOSE_MS);
    assert!(DEFAULT_INFO_MS >= MIN_AUTO_CLOSE_MS && DEFAULT_INFO_MS <= MAX_AUTO_CLOSE_MS);
    assert!(DEFAULT_WARNING_MS >= MIN_AUTO_CLOSE_MS && DEFAULT_WARNING_MS <= MAX_AUTO_CLOSE_MS);
    assert!(DEFAULT_ERROR_MS >= MIN_AUTO_CLOSE_MS && DEFAULT_ERROR_MS <= MAX_AUTO_CLOSE_MS);

    assert!(MIN_REMOVAL_DELAY_MS > 0);
    assert!(MAX_REMOVAL_DELAY_MS >= MIN_REMOVAL_DELAY_MS);
    assert!(DEFAULT_REMOVAL_DELAY_MS >= MIN_REMOVAL_DELAY_MS);
    assert!(DEFAULT_REMOVAL_DELAY_MS <= MAX_REMOVAL_DELAY_MS);

    assert!(EVENT_CHANNEL_CAPACITY > 0);
};
