//! The process-wide name → calendar registry.
//!
//! A lazily-initialized global map behind an `RwLock`: reads (resolving a
//! registered calendar) take the shared lock and clone out an `Arc`
//! handle; the single write path is [`register`], called only by the
//! factory, so registration under one name is serialized and nothing else
//! ever mutates the map.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use cal_core::{Error, Result, ValidationError};

use crate::calendar::Calendar;

/// A shared, immutable reference to a registered calendar.
pub type CalendarHandle = Arc<Calendar>;

static REGISTRY: LazyLock<RwLock<HashMap<String, CalendarHandle>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Resolve a registered calendar by name.
pub fn get(name: &str) -> Option<CalendarHandle> {
    REGISTRY
        .read()
        .expect("calendar registry lock poisoned")
        .get(name)
        .cloned()
}

/// `true` if a calendar is registered under `name`.
pub fn is_registered(name: &str) -> bool {
    REGISTRY
        .read()
        .expect("calendar registry lock poisoned")
        .contains_key(name)
}

/// Names of all registered calendars, sorted.
pub fn names() -> Vec<String> {
    let mut names: Vec<String> = REGISTRY
        .read()
        .expect("calendar registry lock poisoned")
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}

/// Register a freshly synthesized calendar.
///
/// Re-registering a name with an identical configuration is an idempotent
/// no-op returning the existing handle; a different configuration under an
/// existing name is rejected, so a calendar already handed out never
/// changes meaning.
pub(crate) fn register(calendar: Calendar) -> Result<CalendarHandle> {
    let mut map = REGISTRY.write().expect("calendar registry lock poisoned");
    if let Some(existing) = map.get(calendar.name()) {
        if existing.config() == calendar.config() {
            return Ok(existing.clone());
        }
        let mut issues = ValidationError::new();
        issues.push(
            "name",
            format!(
                "calendar {} is already registered with a different configuration",
                calendar.name()
            ),
        );
        return Err(Error::Validation(issues));
    }
    let handle: CalendarHandle = Arc::new(calendar);
    map.insert(handle.name().to_string(), handle.clone());
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalendarConfig;

    #[test]
    fn get_returns_none_for_unknown_names() {
        assert!(get("registry-test-no-such-calendar").is_none());
        assert!(!is_registered("registry-test-no-such-calendar"));
    }

    #[test]
    fn register_then_resolve() {
        let cal = Calendar::generated("registry-test-resolve", CalendarConfig::gregorian());
        let handle = register(cal).unwrap();
        let resolved = get("registry-test-resolve").unwrap();
        assert!(Arc::ptr_eq(&handle, &resolved));
        assert!(names().contains(&"registry-test-resolve".to_string()));
    }

    #[test]
    fn identical_reregistration_is_a_no_op() {
        let first = register(Calendar::generated(
            "registry-test-idempotent",
            CalendarConfig::gregorian(),
        ))
        .unwrap();
        let second = register(Calendar::generated(
            "registry-test-idempotent",
            CalendarConfig::gregorian(),
        ))
        .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn conflicting_reregistration_is_rejected() {
        let original = register(Calendar::generated(
            "registry-test-conflict",
            CalendarConfig::gregorian(),
        ))
        .unwrap();
        let err = register(Calendar::generated(
            "registry-test-conflict",
            CalendarConfig::julian(),
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        // The original handle still resolves, untouched.
        let resolved = get("registry-test-conflict").unwrap();
        assert!(Arc::ptr_eq(&original, &resolved));
    }
}
