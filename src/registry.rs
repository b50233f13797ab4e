//! Callback handler registry
//!
//! Maps each button to an ordered list of callbacks. Mutations and
//! snapshots happen under a single mutex; the lock is never held across a
//! callback invocation, so slow or reentrant handlers cannot block
//! registration or another button's dispatch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use enum_map::EnumMap;
use tracing::info;

use crate::error::Result;
use crate::identity::ButtonId;

/// Callback invoked with the identity of the pressed button
pub type ButtonHandler = Arc<dyn Fn(ButtonId) + Send + Sync + 'static>;

/// Ordered callback registry shared between the application and the poll loop
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Mutex<EnumMap<ButtonId, Vec<ButtonHandler>>>,
}

impl HandlerRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for a button press
    ///
    /// Callbacks run in registration order. Registering the same callback
    /// twice is not deduplicated: it will be invoked twice per press.
    pub fn register(&self, label: &str, handler: ButtonHandler) -> Result<()> {
        let button = ButtonId::from_label(label)?;
        self.lock()[button].push(handler);
        info!(button = %button, "registered button handler");
        Ok(())
    }

    /// Removes the first registered occurrence of `handler`
    ///
    /// A no-op when the label is unknown or the handler was never
    /// registered.
    pub fn unregister(&self, label: &str, handler: &ButtonHandler) {
        let Ok(button) = ButtonId::from_label(label) else {
            return;
        };
        let mut handlers = self.lock();
        if let Some(index) = handlers[button]
            .iter()
            .position(|h| Arc::ptr_eq(h, handler))
        {
            handlers[button].remove(index);
            info!(button = %button, "unregistered button handler");
        }
    }

    /// Copies the current callback list for one button
    ///
    /// Dispatch iterates the copy, so registrations and removals racing
    /// with an in-flight press cannot corrupt that dispatch pass.
    pub fn snapshot(&self, button: ButtonId) -> Vec<ButtonHandler> {
        self.lock()[button].clone()
    }

    /// Number of callbacks currently registered for `button`
    pub fn handler_count(&self, button: ButtonId) -> usize {
        self.lock()[button].len()
    }

    fn lock(&self) -> MutexGuard<'_, EnumMap<ButtonId, Vec<ButtonHandler>>> {
        // Callbacks never run under the lock; a poisoned guard still holds
        // a structurally intact map
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Handler that appends `tag` to the shared log when invoked
    fn tagged(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> ButtonHandler {
        let log = Arc::clone(log);
        let tag = tag.to_string();
        Arc::new(move |button: ButtonId| {
            log.lock().unwrap().push(format!("{}:{}", tag, button));
        })
    }

    fn invoke_all(registry: &HandlerRegistry, button: ButtonId) {
        for handler in registry.snapshot(button) {
            handler(button);
        }
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let registry = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        registry.register("A", tagged(&log, "first")).unwrap();
        registry.register("A", tagged(&log, "second")).unwrap();

        invoke_all(&registry, ButtonId::A);
        assert_eq!(*log.lock().unwrap(), vec!["first:A", "second:A"]);
    }

    #[test]
    fn test_double_registration_is_not_deduplicated() {
        let registry = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let handler = tagged(&log, "h");

        registry.register("B", Arc::clone(&handler)).unwrap();
        registry.register("B", Arc::clone(&handler)).unwrap();
        assert_eq!(registry.handler_count(ButtonId::B), 2);

        invoke_all(&registry, ButtonId::B);
        assert_eq!(*log.lock().unwrap(), vec!["h:B", "h:B"]);
    }

    #[test]
    fn test_register_unknown_label_leaves_registry_untouched() {
        let registry = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let err = registry.register("Q", tagged(&log, "h")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ButtonError::InvalidIdentity { label } if label == "Q"
        ));

        for button in ButtonId::ALL {
            assert_eq!(registry.handler_count(button), 0);
        }
    }

    #[test]
    fn test_unregister_removes_first_occurrence_only() {
        let registry = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let handler = tagged(&log, "h");

        registry.register("C", Arc::clone(&handler)).unwrap();
        registry.register("C", Arc::clone(&handler)).unwrap();

        registry.unregister("C", &handler);
        assert_eq!(registry.handler_count(ButtonId::C), 1);

        registry.unregister("C", &handler);
        assert_eq!(registry.handler_count(ButtonId::C), 0);
    }

    #[test]
    fn test_unregister_is_a_no_op_for_unknown_entries() {
        let registry = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let registered = tagged(&log, "registered");
        let never_registered = tagged(&log, "other");

        registry.register("D", Arc::clone(&registered)).unwrap();

        // Never-registered handler, unknown label: both silently ignored
        registry.unregister("D", &never_registered);
        registry.unregister("Q", &registered);
        assert_eq!(registry.handler_count(ButtonId::D), 1);
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_mutation() {
        let registry = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        registry.register("A", tagged(&log, "early")).unwrap();
        let snapshot = registry.snapshot(ButtonId::A);

        registry.register("A", tagged(&log, "late")).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.handler_count(ButtonId::A), 2);

        for handler in snapshot {
            handler(ButtonId::A);
        }
        assert_eq!(*log.lock().unwrap(), vec!["early:A"]);
    }
}
