//! # Printer Client
//!
//! Owns the TCP connection to a networked thermal printer and the wire
//! protocol for one print attempt:
//!
//! ```text
//! resolve address ─► connect (timeout) ─► write payload ─► flush ─► close
//! ```
//!
//! Raw-socket printing on port 9100: the formatted receipt text is
//! written and flushed, then the connection closes. No acknowledgement
//! is read back and no retry is performed; retries, if wanted, belong
//! to the caller.
//!
//! `print` never returns an error. Every failure is caught, logged
//! once with its internal classification, and collapsed to `false`,
//! because the sale it belongs to is already committed.

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::PrintConfig;
use crate::error::{PrintError, PrintResult};
use crate::formatter::{self, ReceiptPayload};
use kidspos_core::{Directory, LineItem, Money};

/// Client for raw-socket thermal printers.
#[derive(Debug, Clone, Default)]
pub struct PrinterClient {
    config: PrintConfig,
}

impl PrinterClient {
    /// Creates a client with the given socket timeouts.
    pub fn new(config: PrintConfig) -> Self {
        PrinterClient { config }
    }

    /// Prints one receipt, best-effort.
    ///
    /// ## Returns
    /// `true` when the payload was written and flushed; `false` on any
    /// failure (refused, timed out, dropped mid-write). Never panics,
    /// never blocks past the configured timeouts.
    pub async fn print(&self, host: &str, port: u16, payload: &ReceiptPayload) -> bool {
        match self.try_print(host, port, payload).await {
            Ok(()) => {
                info!(host, port, slip = %payload.slip_number, "Receipt printed");
                true
            }
            Err(e) => {
                warn!(host, port, slip = %payload.slip_number, error = %e, "Receipt print failed");
                false
            }
        }
    }

    async fn try_print(&self, host: &str, port: u16, payload: &ReceiptPayload) -> PrintResult<()> {
        let host = host.trim();
        if host.is_empty() {
            return Err(PrintError::NotConfigured);
        }

        let addr = format!("{host}:{port}");
        let text = formatter::render(payload);

        debug!(%addr, bytes = text.len(), "Connecting to printer");

        let mut stream = timeout(self.config.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| PrintError::ConnectTimeout {
                addr: addr.clone(),
                secs: self.config.connect_timeout.as_secs(),
            })?
            .map_err(|source| PrintError::Connect {
                addr: addr.clone(),
                source,
            })?;

        let write = async {
            stream.write_all(text.as_bytes()).await?;
            stream.flush().await?;
            stream.shutdown().await
        };

        timeout(self.config.write_timeout, write)
            .await
            .map_err(|_| PrintError::WriteTimeout {
                addr: addr.clone(),
                secs: self.config.write_timeout.as_secs(),
            })?
            .map_err(|source| PrintError::Write { addr, source })?;

        Ok(())
    }
}

// =============================================================================
// Fire-and-Forget Print Path
// =============================================================================

/// Formats and prints one receipt for a recorded sale.
///
/// Called only after the sale committed; the result never affects it.
/// A store without a configured printer address skips printing with a
/// log line rather than an error.
pub async fn print_receipt<D>(
    directory: &D,
    client: &PrinterClient,
    store_id: i64,
    line_items: &[LineItem],
    staff_barcode: &str,
    deposit: i64,
) -> bool
where
    D: Directory + ?Sized,
{
    let endpoint = directory
        .store_by_id(store_id)
        .await
        .and_then(|store| store.printer_endpoint().map(|(h, p)| (h.to_string(), p)));

    let Some((host, port)) = endpoint else {
        info!(store_id, "No printer configured; skipping receipt");
        return false;
    };

    let payload = formatter::format(
        store_id,
        line_items,
        staff_barcode,
        Money::from_minor(deposit),
        directory,
    )
    .await;

    client.print(&host, port, &payload).await
}
