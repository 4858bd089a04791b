//! Browser (`wasm32`) implementations of [`console_host`] storage contracts.
//!
//! This crate wires the session store to `window.localStorage` and selects the durable backend
//! at compile time (`memory-host-stub` swaps in an in-memory store).

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and the durable-store factory.
pub mod adapters;
pub mod storage;

pub use adapters::{
    durable_store, host_strategy_name, selected_host_strategy, DurableStoreAdapter, HostStrategy,
};
pub use storage::local_storage::WebLocalStorage;
