//! Platform-neutral contracts for the merchant console session shell.
//!
//! This crate owns the authentication session model and the [`SessionStore`] that mirrors it to
//! durable per-origin key/value storage. Concrete browser storage lives in `console_host_web`;
//! reactive wiring lives in `console_runtime`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod session;
pub mod storage;

pub use session::error::{PersistOutcome, SessionError, StorageOp, StorageWarning};
pub use session::keys::{SessionKeys, MERCHANT_KEY, TOKEN_KEY, USER_KEY};
pub use session::record::{OpaqueRecord, SessionToken};
pub use session::store::{AuthSnapshot, SessionState, SessionStore};
pub use storage::durable::{DurableStore, MemoryDurableStore, UnavailableDurableStore};
