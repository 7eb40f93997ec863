//! Listener handles and the registry that notifies them.

use heapless::Vec;

/// Capability implemented by objects that want to be told about records.
///
/// `notify` takes `&self`; a listener that keeps state uses interior
/// mutability (`Cell`, `RefCell`), which is all a single-threaded polling loop
/// needs.
pub trait CommandListener {
    /// Called once per completed record.
    fn notify(&self, command: &str, parameter: &str);
}

/// Plain function listener.
pub type ListenerFn = fn(&str, &str);

/// A registered callee: either a free function or an object reference.
#[derive(Clone, Copy)]
pub enum Listener<'a> {
    Function(ListenerFn),
    Object(&'a dyn CommandListener),
}

impl Listener<'_> {
    pub fn notify(&self, command: &str, parameter: &str) {
        match self {
            Listener::Function(f) => f(command, parameter),
            Listener::Object(obj) => obj.notify(command, parameter),
        }
    }
}

impl core::fmt::Debug for Listener<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Listener::Function(func) => write!(f, "Function({:p})", *func as *const ()),
            Listener::Object(_) => f.write_str("Object(..)"),
        }
    }
}

impl From<ListenerFn> for Listener<'_> {
    fn from(f: ListenerFn) -> Self {
        Listener::Function(f)
    }
}

impl<'a, T: CommandListener> From<&'a T> for Listener<'a> {
    fn from(obj: &'a T) -> Self {
        Listener::Object(obj)
    }
}

/// Insertion-ordered listener list with a fixed ceiling.
///
/// # Type Parameters
/// - `L`: Storage ceiling. A lower runtime limit can be set with
///   [`set_limit`](Self::set_limit).
pub struct ListenerRegistry<'a, const L: usize> {
    entries: Vec<Listener<'a>, L>,
    limit: usize,
}

impl<'a, const L: usize> ListenerRegistry<'a, L> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            limit: L,
        }
    }

    /// Appends a listener.
    ///
    /// Returns `false` and drops the listener if the registry is full.
    pub fn register(&mut self, listener: Listener<'a>) -> bool {
        if self.is_full() {
            return false;
        }
        self.entries.push(listener).is_ok()
    }

    /// Notifies every listener in registration order.
    ///
    /// A panicking listener unwinds out of this call; listeners after it are
    /// not notified for this record.
    pub fn dispatch_all(&self, command: &str, parameter: &str) {
        for listener in &self.entries {
            listener.notify(command, parameter);
        }
    }

    /// Caps the number of accepted listeners at `min(limit, L)`.
    ///
    /// Listeners already registered are kept even if they exceed the new limit.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.min(L);
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }
}

impl<const L: usize> Default for ListenerRegistry<'_, L> {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== TESTS =======================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::string::{String, ToString};
    use std::vec::Vec as StdVec;

    std::thread_local! {
        static CALL_LOG: RefCell<StdVec<String>> = const { RefCell::new(StdVec::new()) };
    }

    fn record_call(tag: &str, command: &str, parameter: &str) {
        CALL_LOG.with(|log| log.borrow_mut().push(std::format!("{tag}:{command}:{parameter}")));
    }

    fn take_calls() -> StdVec<String> {
        CALL_LOG.with(|log| log.borrow_mut().drain(..).collect())
    }

    fn first(command: &str, parameter: &str) {
        record_call("first", command, parameter);
    }

    fn second(command: &str, parameter: &str) {
        record_call("second", command, parameter);
    }

    struct Recorder {
        seen: RefCell<StdVec<(String, String)>>,
    }

    impl CommandListener for Recorder {
        fn notify(&self, command: &str, parameter: &str) {
            self.seen
                .borrow_mut()
                .push((command.to_string(), parameter.to_string()));
            record_call("object", command, parameter);
        }
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        take_calls();
        let recorder = Recorder {
            seen: RefCell::new(StdVec::new()),
        };
        let mut registry: ListenerRegistry<'_, 4> = ListenerRegistry::new();
        assert!(registry.register(Listener::Function(second)));
        assert!(registry.register(Listener::from(&recorder)));
        assert!(registry.register(Listener::Function(first)));

        registry.dispatch_all("led", "on");

        assert_eq!(
            take_calls(),
            ["second:led:on", "object:led:on", "first:led:on"]
        );
        assert_eq!(
            *recorder.seen.borrow(),
            [("led".to_string(), "on".to_string())]
        );
    }

    #[test]
    fn test_register_past_ceiling_is_dropped() {
        take_calls();
        let mut registry: ListenerRegistry<'_, 2> = ListenerRegistry::new();
        assert!(registry.register(Listener::Function(first)));
        assert!(registry.register(Listener::Function(first)));
        assert!(registry.is_full());
        assert!(!registry.register(Listener::Function(second)));
        assert_eq!(registry.len(), 2);

        registry.dispatch_all("a", "");
        assert_eq!(take_calls(), ["first:a:", "first:a:"]);
    }

    #[test]
    fn test_runtime_limit() {
        let mut registry: ListenerRegistry<'_, 4> = ListenerRegistry::default();
        assert_eq!(registry.limit(), 4);
        registry.set_limit(1);
        assert!(registry.register(Listener::Function(first)));
        assert!(!registry.register(Listener::Function(second)));

        registry.set_limit(10);
        assert_eq!(registry.limit(), 4);
        assert!(registry.register(Listener::Function(second)));
    }

    #[test]
    fn test_empty_registry_dispatch_is_noop() {
        take_calls();
        let registry: ListenerRegistry<'_, 4> = ListenerRegistry::new();
        assert!(registry.is_empty());
        registry.dispatch_all("x", "y");
        assert!(take_calls().is_empty());
    }
}
