//! Durable storage contracts used by the session store.

pub mod durable;
