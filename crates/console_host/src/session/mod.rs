//! Authentication session model, key layout, and the durable-backed session store.

pub mod error;
pub mod keys;
pub mod record;
pub mod store;
