use console_host::{DurableStore, MemoryDurableStore};

use crate::WebLocalStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `console_host_web` adapters.
pub enum HostStrategy {
    /// Browser `localStorage`.
    Browser,
    /// Tab-lifetime in-memory storage for hosts without `localStorage` (and headless tests).
    MemoryStub,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "memory-host-stub")]
    {
        HostStrategy::MemoryStub
    }

    #[cfg(not(feature = "memory-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::MemoryStub => "memory-stub",
    }
}

/// Adapter enum that erases the concrete durable backend behind [`DurableStore`].
#[derive(Debug, Clone)]
pub enum DurableStoreAdapter {
    /// Browser `localStorage`.
    Browser(WebLocalStorage),
    /// In-memory fallback.
    MemoryStub(MemoryDurableStore),
}

impl DurableStore for DurableStoreAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        match self {
            Self::Browser(store) => store.get(key),
            Self::MemoryStub(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.set(key, value),
            Self::MemoryStub(store) => store.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.remove(key),
            Self::MemoryStub(store) => store.remove(key),
        }
    }
}

/// Builds the durable-store adapter for the compile-time selected host strategy.
pub fn durable_store() -> DurableStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => DurableStoreAdapter::Browser(WebLocalStorage),
        HostStrategy::MemoryStub => DurableStoreAdapter::MemoryStub(MemoryDurableStore::default()),
    }
}
