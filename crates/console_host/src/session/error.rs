//! Failure and warning types for session persistence.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors that abort a session rehydrate. In-memory state is left untouched when one is returned.
pub enum SessionError {
    /// A stored record entry is present but is not valid JSON.
    #[error("stored `{key}` entry is not valid JSON: {message}")]
    MalformedEntry {
        /// Durable key holding the malformed value.
        key: String,
        /// Decoder message.
        message: String,
    },
    /// The durable backend could not be read.
    #[error("reading stored `{key}` entry failed: {message}")]
    StorageRead {
        /// Durable key being read.
        key: String,
        /// Backend message.
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Durable storage mutation that produced a [`StorageWarning`].
pub enum StorageOp {
    /// An entry write.
    Write,
    /// An entry removal.
    Remove,
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Write => "write",
            Self::Remove => "remove",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("durable {op} of `{key}` failed: {message}")]
/// Non-fatal durable storage failure; the in-memory session was still updated.
pub struct StorageWarning {
    /// Durable key that was being mutated.
    pub key: String,
    /// Mutation that failed.
    pub op: StorageOp,
    /// Backend message.
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "persistence warnings should be reported"]
/// Result of mirroring a session mutation to durable storage.
pub struct PersistOutcome {
    /// Failed writes/removals, in the order they were attempted.
    pub warnings: Vec<StorageWarning>,
}

impl PersistOutcome {
    /// Returns `true` when every durable mutation succeeded.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub(crate) fn record(&mut self, key: &str, op: StorageOp, result: Result<(), String>) {
        if let Err(message) = result {
            self.warnings.push(StorageWarning {
                key: key.to_string(),
                op,
                message,
            });
        }
    }
}
