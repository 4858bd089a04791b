//! Browser durable storage adapters.

pub mod local_storage;
