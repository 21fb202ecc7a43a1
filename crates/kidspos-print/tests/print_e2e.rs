//! Print path tests against a fake printer: a loopback TCP listener
//! that captures whatever the client writes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use kidspos_core::{Directory, LineItem, Money, StaffInfo, StoreInfo};
use kidspos_print::{
    formatter, print_receipt, PrintConfig, PrintJob, PrintSpooler, PrinterClient,
};
use tracing_subscriber::EnvFilter;

/// Run with `RUST_LOG=debug` to see print diagnostics.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Binds a loopback listener that accepts one connection and sends the
/// received bytes back through the channel.
async fn fake_printer() -> (u16, oneshot::Receiver<Vec<u8>>) {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = Vec::new();
            let _ = stream.read_to_end(&mut buf).await;
            let _ = tx.send(buf);
        }
    });

    (port, rx)
}

struct StubDirectory {
    store: Option<StoreInfo>,
}

#[async_trait]
impl Directory for StubDirectory {
    async fn store_by_id(&self, _id: i64) -> Option<StoreInfo> {
        self.store.clone()
    }

    async fn staff_by_barcode(&self, _barcode: &str) -> Option<StaffInfo> {
        Some(StaffInfo {
            id: 10,
            name: "Hanako".into(),
            barcode: "ST-0010".into(),
        })
    }
}

fn store_with_printer(port: u16) -> StoreInfo {
    StoreInfo {
        id: 1,
        name: "Central Square".into(),
        printer_host: Some("127.0.0.1".into()),
        printer_port: port as i64,
    }
}

fn line_items() -> Vec<LineItem> {
    vec![
        LineItem {
            item_id: 1,
            barcode: "4900000000001".into(),
            name: "Origami Crane".into(),
            price: 100,
        },
        LineItem {
            item_id: 2,
            barcode: "4900000000002".into(),
            name: "Paper Plane Kit".into(),
            price: 200,
        },
    ]
}

#[tokio::test]
async fn client_writes_rendered_receipt() {
    let (port, received) = fake_printer().await;

    let directory = StubDirectory {
        store: Some(store_with_printer(port)),
    };
    let payload = formatter::format(
        1,
        &line_items(),
        "ST-0010",
        Money::from_minor(500),
        &directory,
    )
    .await;

    let client = PrinterClient::new(PrintConfig::default());
    assert!(client.print("127.0.0.1", port, &payload).await);

    let bytes = received.await.unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("Central Square"));
    assert!(text.contains("Origami Crane"));
    assert!(text.contains("\u{a5}300"));
    assert!(text.contains(&payload.slip_number));
}

#[tokio::test]
async fn unreachable_printer_returns_false() {
    init_tracing();

    // Bind then drop, so the port refuses connections.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let directory = StubDirectory {
        store: Some(store_with_printer(port)),
    };
    let client = PrinterClient::new(PrintConfig::default());

    let printed = print_receipt(&directory, &client, 1, &line_items(), "ST-0010", 500).await;
    assert!(!printed);
}

#[tokio::test]
async fn missing_printer_config_skips_quietly() {
    init_tracing();

    let directory = StubDirectory {
        store: Some(StoreInfo {
            id: 1,
            name: "Annex".into(),
            printer_host: None,
            printer_port: 9100,
        }),
    };
    let client = PrinterClient::new(PrintConfig::default());

    let printed = print_receipt(&directory, &client, 1, &line_items(), "ST-0010", 500).await;
    assert!(!printed);
}

#[tokio::test]
async fn unknown_store_skips_quietly() {
    init_tracing();

    let directory = StubDirectory { store: None };
    let client = PrinterClient::new(PrintConfig::default());

    let printed = print_receipt(&directory, &client, 42, &line_items(), "ST-0010", 500).await;
    assert!(!printed);
}

#[tokio::test]
async fn spooler_prints_enqueued_jobs() {
    let (port, received) = fake_printer().await;

    let directory = Arc::new(StubDirectory {
        store: Some(store_with_printer(port)),
    });
    let handle = PrintSpooler::spawn(directory, PrintConfig::default());

    let accepted = handle.enqueue(PrintJob {
        store_id: 1,
        line_items: line_items(),
        staff_barcode: "ST-0010".into(),
        deposit: 500,
    });
    assert!(accepted);

    let bytes = received.await.unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("Central Square"));

    handle.shutdown().await;
}

#[tokio::test]
async fn spooler_rejects_jobs_after_shutdown() {
    init_tracing();

    let directory = Arc::new(StubDirectory { store: None });
    let handle = PrintSpooler::spawn(directory, PrintConfig::default());

    handle.shutdown().await;
    // Let the loop observe the signal and drop its receiver.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let accepted = handle.enqueue(PrintJob {
        store_id: 1,
        line_items: line_items(),
        staff_barcode: "ST-0010".into(),
        deposit: 500,
    });
    assert!(!accepted);
}
