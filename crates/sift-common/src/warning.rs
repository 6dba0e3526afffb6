//! Deduplicated warnings.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Warnings are emitted as `tracing` events, so nothing is printed unless the
//! embedding binary installs a subscriber.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable oddity (emitted once per unique message)
///
/// # Example
/// ```
/// sift_common::warning::warn_once("sanitize", "dropping unterminated <div>");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_sighting(format!("[{component}] {message}")) {
        tracing::warn!(component = %component, "{message}");
    }
}

/// Record `key`; true if it had not been seen since the last clear.
fn first_sighting(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Forget all recorded warnings so they can be emitted again.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
