//! Scoped resources: background work that stops when its owner goes away,
//! and bundles of resources tied to one access-token value.

use futures_util::future::{abortable, AbortHandle};
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

/// A spawned future that is aborted when this guard is dropped.
pub struct ScopedTask {
    handle: AbortHandle,
}

impl ScopedTask {
    /// Spawn on the Dioxus executor. Must be called from inside the runtime.
    pub fn spawn(fut: impl Future<Output = ()> + 'static) -> Self {
        let (fut, handle) = abortable(fut);
        dioxus::prelude::spawn(async move {
            let _ = fut.await;
        });
        Self::from_handle(handle)
    }

    pub fn from_handle(handle: AbortHandle) -> Self {
        Self { handle }
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Monotonic request counter. A response is applied only if no newer
/// request was started after it.
#[derive(Clone, Default)]
pub struct Generation {
    current: Rc<Cell<u64>>,
}

impl Generation {
    /// Start a new request and return its ticket.
    pub fn advance(&self) -> u64 {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current.get() == ticket
    }
}

/// Holds the resources opened for one token value.
///
/// `retarget` releases the current bundle before anything is opened for the
/// next token, so bundles for two tokens never coexist.
pub struct TokenScoped<R> {
    token: Option<String>,
    resources: Option<R>,
}

impl<R> Default for TokenScoped<R> {
    fn default() -> Self {
        Self {
            token: None,
            resources: None,
        }
    }
}

impl<R> TokenScoped<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn resources(&self) -> Option<&R> {
        self.resources.as_ref()
    }

    /// Switch to `token`. Returns false when the token is unchanged.
    /// `open` is only called for a non-empty token and may decline by
    /// returning `None`.
    pub fn retarget<F>(&mut self, token: Option<&str>, open: F) -> bool
    where
        F: FnOnce(&str) -> Option<R>,
    {
        let token = token.filter(|t| !t.is_empty());
        if self.token.as_deref() == token {
            return false;
        }

        drop(self.resources.take());
        self.token = token.map(str::to_string);
        if let Some(token) = token {
            self.resources = open(token);
        }
        true
    }

    /// Drop everything and forget the token.
    pub fn release(&mut self) {
        drop(self.resources.take());
        self.token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        name: String,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Drop for Probe {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("close {}", self.name));
        }
    }

    fn opener(log: &Rc<RefCell<Vec<String>>>) -> impl FnOnce(&str) -> Option<Probe> {
        let log = log.clone();
        move |token| {
            log.borrow_mut().push(format!("open {token}"));
            Some(Probe {
                name: token.to_string(),
                log,
            })
        }
    }

    #[test]
    fn old_bundle_closes_before_new_opens() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = TokenScoped::new();

        assert!(slot.retarget(Some("a"), opener(&log)));
        assert!(slot.retarget(Some("b"), opener(&log)));

        assert_eq!(*log.borrow(), vec!["open a", "close a", "open b"]);
        assert_eq!(slot.token(), Some("b"));
    }

    #[test]
    fn same_token_is_a_noop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = TokenScoped::new();

        slot.retarget(Some("a"), opener(&log));
        assert!(!slot.retarget(Some("a"), opener(&log)));
        assert_eq!(*log.borrow(), vec!["open a"]);
    }

    #[test]
    fn empty_token_only_closes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = TokenScoped::new();

        slot.retarget(Some("a"), opener(&log));
        assert!(slot.retarget(Some(""), opener(&log)));
        assert!(slot.resources().is_none());
        assert_eq!(slot.token(), None);
        assert_eq!(*log.borrow(), vec!["open a", "close a"]);

        assert!(!slot.retarget(None, opener(&log)));
    }

    #[test]
    fn release_drops_resources() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = TokenScoped::new();
        slot.retarget(Some("a"), opener(&log));
        slot.release();
        assert_eq!(*log.borrow(), vec!["open a", "close a"]);
    }

    #[test]
    fn dropping_guard_aborts_task() {
        let (_fut, handle) = abortable(async {});
        let guard = ScopedTask::from_handle(handle.clone());
        assert!(!handle.is_aborted());
        drop(guard);
        assert!(handle.is_aborted());
    }

    #[test]
    fn only_latest_generation_is_current() {
        let generation = Generation::default();
        let first = generation.advance();
        let shared = generation.clone();
        let second = shared.advance();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
