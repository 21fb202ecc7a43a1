//! # Print Error Types
//!
//! The internal failure taxonomy for receipt printing. Callers never
//! see these: the client collapses every variant into a `false` plus
//! one diagnostic log line, because a failed print must never fail the
//! already-committed sale.

use thiserror::Error;

/// Printing failures, distinguishable internally.
#[derive(Debug, Error)]
pub enum PrintError {
    /// The store has no printer address; treated as "skip printing".
    #[error("no printer configured")]
    NotConfigured,

    /// Could not connect within the configured timeout.
    #[error("connect to {addr} timed out after {secs}s")]
    ConnectTimeout { addr: String, secs: u64 },

    /// The printer refused or dropped the connection.
    #[error("connect to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the payload did not finish within the timeout.
    #[error("write to {addr} timed out after {secs}s")]
    WriteTimeout { addr: String, secs: u64 },

    /// The socket failed mid-write.
    #[error("write to {addr} failed: {source}")]
    Write {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for printing operations.
pub type PrintResult<T> = Result<T, PrintError>;
