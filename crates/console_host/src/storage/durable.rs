//! Durable per-origin key/value storage contracts and baseline adapters.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Host service for durable string entries keyed by name (the `localStorage` shape).
///
/// Calls are synchronous and run to completion on the caller's thread. Backend failures are
/// reported as human-readable strings; callers decide whether they are fatal.
pub trait DurableStore {
    /// Reads the raw string stored under `key`, or `None` when no entry exists.
    fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: &str) -> Result<(), String>;

    /// Removes the entry under `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), String>;
}

impl<T: DurableStore + ?Sized> DurableStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        (**self).remove(key)
    }
}

impl<T: DurableStore + ?Sized> DurableStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        (**self).remove(key)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Durable store for hosts where storage is disabled; every call fails.
pub struct UnavailableDurableStore;

const UNAVAILABLE: &str = "durable storage unavailable";

impl DurableStore for UnavailableDurableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, String> {
        Err(UNAVAILABLE.to_string())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), String> {
        Err(UNAVAILABLE.to_string())
    }

    fn remove(&self, _key: &str) -> Result<(), String> {
        Err(UNAVAILABLE.to_string())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory durable store keyed by string.
///
/// Clones share the same entries, which lets a test (or a second "tab") observe what another
/// handle wrote.
pub struct MemoryDurableStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryDurableStore {
    /// Returns the number of entries currently stored.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl DurableStore for MemoryDurableStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}
