//! # kidspos-print: Receipt Printing for KidsPOS
//!
//! The physical side of a sale: formatting a receipt and pushing it to
//! a networked thermal printer over a raw TCP socket (port 9100).
//!
//! Printing is strictly best-effort and runs off the sale path: the
//! spooler accepts jobs only after a sale has committed, a slow or
//! offline printer can only cost its own timeout, and no print outcome
//! ever propagates back into the transaction result.
//!
//! ## Modules
//!
//! - [`formatter`] - receipt payload building and text rendering
//! - [`client`] - the TCP printer client and fire-and-forget print path
//! - [`spooler`] - bounded worker pool fed by an mpsc channel
//! - [`config`] - socket timeouts and spooler sizing
//! - [`error`] - internal print failure taxonomy

pub mod client;
pub mod config;
pub mod error;
pub mod formatter;
pub mod spooler;

pub use client::{print_receipt, PrinterClient};
pub use config::PrintConfig;
pub use error::{PrintError, PrintResult};
pub use formatter::{ReceiptPayload, RECEIPT_WIDTH};
pub use spooler::{PrintJob, PrintSpooler, PrintSpoolerHandle};
