//! Deduplicated warnings.
//!
//! Stylesheet and layout code hit the same misconfiguration once per frame
//! (a malformed selector, a missing icon). These helpers report each unique
//! message once through `tracing` until the set is cleared.

use std::collections::HashSet;
use std::sync::Mutex;

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable problem (emits once per unique message)
///
/// # Example
/// ```
/// facet_common::warning::warn_once("style", "malformed selector ':hover'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .map(|mut guard| guard.get_or_insert_with(HashSet::new).insert(key))
        // A poisoned set only loses deduplication; still report.
        .unwrap_or(true);

    if should_emit {
        tracing::warn!(component, "{message}");
    }
}

/// Returns true if `message` for `component` has already been reported.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .map(|guard| guard.as_ref().is_some_and(|set| set.contains(&key)))
        .unwrap_or(false)
}

/// Clear all recorded warnings (call when a stylesheet is reloaded)
pub fn clear_warnings() {
    if let Ok(mut guard) = WARNED.lock()
        && let Some(set) = guard.as_mut()
    {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_is_recorded() {
        warn_once("test", "recorded once");
        assert!(was_warned("test", "recorded once"));
        assert!(!was_warned("test", "never emitted"));
    }
}
