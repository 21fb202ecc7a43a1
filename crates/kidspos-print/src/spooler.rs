//! # Print Spooler
//!
//! Decouples receipt printing from the sale path.
//!
//! ## Job Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  checkout handler                                                │
//! │      │  TransactionResult::Success                               │
//! │      ▼                                                           │
//! │  handle.enqueue(PrintJob)   (non-blocking; full queue drops)     │
//! │      │                                                           │
//! │      ▼        bounded mpsc channel                               │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │ spooler loop: recv job ─► acquire worker permit ─► spawn   │  │
//! │  │   print task: resolve store ─► format ─► TCP print         │  │
//! │  └────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Jobs are enqueued only after the sale is durably persisted, so a
//! receipt can never print for a sale that does not exist. There is no
//! cancellation for in-flight prints; the client's socket timeouts are
//! the only bound.

use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

use crate::client::{print_receipt, PrinterClient};
use crate::config::PrintConfig;
use kidspos_core::{Directory, LineItem};

// =============================================================================
// Print Job
// =============================================================================

/// One queued receipt print for a recorded sale.
#[derive(Debug, Clone)]
pub struct PrintJob {
    pub store_id: i64,
    pub line_items: Vec<LineItem>,
    pub staff_barcode: String,
    /// Cash tendered, in minor currency units.
    pub deposit: i64,
}

// =============================================================================
// Spooler Handle
// =============================================================================

/// Handle for submitting jobs and shutting the spooler down.
#[derive(Clone)]
pub struct PrintSpoolerHandle {
    job_tx: mpsc::Sender<PrintJob>,
    shutdown_tx: mpsc::Sender<()>,
}

impl PrintSpoolerHandle {
    /// Enqueues a print job without blocking.
    ///
    /// Returns `false` when the queue is full or the spooler stopped;
    /// the job is dropped with a warning since printing is best-effort.
    pub fn enqueue(&self, job: PrintJob) -> bool {
        match self.job_tx.try_send(job) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(job)) => {
                warn!(store_id = job.store_id, "Print queue full; dropping receipt");
                false
            }
            Err(mpsc::error::TrySendError::Closed(job)) => {
                warn!(store_id = job.store_id, "Print spooler stopped; dropping receipt");
                false
            }
        }
    }

    /// Triggers graceful shutdown. Queued jobs already dispatched to a
    /// worker finish; the loop stops accepting new ones.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

// =============================================================================
// Print Spooler
// =============================================================================

/// Background print dispatcher with a bounded worker pool.
pub struct PrintSpooler;

impl PrintSpooler {
    /// Spawns the spooler loop and returns its handle.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let handle = PrintSpooler::spawn(directory, PrintConfig::default());
    ///
    /// // after a TransactionResult::Success:
    /// handle.enqueue(PrintJob { store_id, line_items, staff_barcode, deposit });
    /// ```
    pub fn spawn<D>(directory: Arc<D>, config: PrintConfig) -> PrintSpoolerHandle
    where
        D: Directory + 'static,
    {
        let (job_tx, job_rx) = mpsc::channel::<PrintJob>(config.queue_depth);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);

        tokio::spawn(Self::run(directory, config, job_rx, shutdown_rx));

        PrintSpoolerHandle {
            job_tx,
            shutdown_tx,
        }
    }

    /// Main spooler loop.
    async fn run<D>(
        directory: Arc<D>,
        config: PrintConfig,
        mut job_rx: mpsc::Receiver<PrintJob>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) where
        D: Directory + 'static,
    {
        info!(workers = config.workers, "Print spooler starting");

        let client = PrinterClient::new(config.clone());
        let workers = Arc::new(Semaphore::new(config.workers));

        loop {
            tokio::select! {
                Some(job) = job_rx.recv() => {
                    // Worker permit bounds concurrent sockets; dispatch
                    // waits here when every worker is busy.
                    let permit = match Arc::clone(&workers).acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => break,
                    };

                    let directory = Arc::clone(&directory);
                    let client = client.clone();

                    tokio::spawn(async move {
                        let printed = print_receipt(
                            directory.as_ref(),
                            &client,
                            job.store_id,
                            &job.line_items,
                            &job.staff_barcode,
                            job.deposit,
                        )
                        .await;

                        debug!(store_id = job.store_id, printed, "Print job finished");
                        drop(permit);
                    });
                }

                _ = shutdown_rx.recv() => {
                    info!("Print spooler shutting down");
                    break;
                }

                // Both channels closed (every handle dropped).
                else => break,
            }
        }

        info!("Print spooler stopped");
    }
}
