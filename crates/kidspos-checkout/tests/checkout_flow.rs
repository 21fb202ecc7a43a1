//! End-to-end pipeline tests against an in-memory database: the same
//! wiring a presentation layer uses, minus the printer.

use kidspos_checkout::CheckoutService;
use kidspos_core::{Item, StaffInfo, StoreInfo, TransactionResult};
use kidspos_db::{Database, DbConfig, DirectoryRepository, ItemRepository};
use tracing_subscriber::EnvFilter;

/// Run with `RUST_LOG=debug` to see the pipeline's tracing output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

async fn setup() -> (Database, CheckoutService<ItemRepository, DirectoryRepository>) {
    init_tracing();
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let items = db.items();
    for (id, price, name) in [
        (1, 100, "Origami Crane"),
        (2, 200, "Paper Plane Kit"),
        (3, 50, "Sticker Sheet"),
    ] {
        items
            .insert(&Item {
                id,
                barcode: format!("49{id:011}"),
                name: name.into(),
                price,
            })
            .await
            .unwrap();
    }

    let directory = db.directory();
    directory
        .insert_store(&StoreInfo {
            id: 1,
            name: "Central Square".into(),
            printer_host: Some("10.0.0.5".into()),
            printer_port: 9100,
        })
        .await
        .unwrap();
    directory
        .insert_store(&StoreInfo {
            id: 2,
            name: "Annex".into(),
            printer_host: None,
            printer_port: 9100,
        })
        .await
        .unwrap();
    directory
        .insert_staff(&StaffInfo {
            id: 10,
            name: "Hanako".into(),
            barcode: "ST-0010".into(),
        })
        .await
        .unwrap();

    let service = CheckoutService::new(db.items(), db.directory(), db.sales());
    (db, service)
}

#[tokio::test]
async fn success_carries_consistent_sale_and_summary() {
    // Items [100, 200, 100], deposit 500.
    let (db, service) = setup().await;

    let result = service.process_sale(1, "ST-0010", "1,2,1", 500).await;
    let TransactionResult::Success { sale, summary } = result else {
        panic!("expected success, got {result:?}");
    };

    assert_eq!(sale.amount, 400);
    assert_eq!(sale.quantity, 3);
    assert_eq!(sale.change_amount, 100);
    assert_eq!(sale.deposit, 500);
    assert_eq!(sale.staff_id, 10);

    assert_eq!(summary.total_amount, 400);
    assert_eq!(summary.change, 100);
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.unique_items, 2);

    // Two detail rows: item 1 x2 at 100, item 2 x1 at 200.
    let details = db.sales().details_for_sale(sale.id).await.unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!((details[0].item_id, details[0].quantity, details[0].price), (1, 2, 100));
    assert_eq!((details[1].item_id, details[1].quantity, details[1].price), (2, 1, 200));

    // Header/detail invariants.
    let amount: i64 = details.iter().map(|d| d.price * d.quantity).sum();
    let quantity: i64 = details.iter().map(|d| d.quantity).sum();
    assert_eq!(amount, sale.amount);
    assert_eq!(quantity, sale.quantity);
}

#[tokio::test]
async fn exact_deposit_succeeds_with_zero_change() {
    let (_db, service) = setup().await;

    let result = service.process_sale(1, "ST-0010", "1,2,1", 400).await;
    let TransactionResult::Success { sale, .. } = result else {
        panic!("expected success, got {result:?}");
    };
    assert_eq!(sale.change_amount, 0);
}

#[tokio::test]
async fn short_deposit_is_a_validation_error() {
    let (db, service) = setup().await;

    let result = service.process_sale(1, "ST-0010", "1,2,1", 399).await;
    let TransactionResult::ValidationError { message } = result else {
        panic!("expected validation error, got {result:?}");
    };
    assert!(message.contains("insufficient deposit"), "message: {message}");

    assert_eq!(db.sales().count().await.unwrap(), 0);
}

#[tokio::test]
async fn empty_identifiers_fail_before_persistence() {
    let (db, service) = setup().await;

    let result = service.process_sale(1, "ST-0010", "", 500).await;
    assert!(matches!(result, TransactionResult::ValidationError { .. }));

    assert_eq!(db.sales().count().await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_item_fails_all_or_nothing() {
    let (db, service) = setup().await;

    let result = service.process_sale(1, "ST-0010", "1,99999", 500).await;
    let TransactionResult::ValidationError { message } = result else {
        panic!("expected validation error, got {result:?}");
    };
    assert!(message.contains("99999"), "message: {message}");

    assert_eq!(db.sales().count().await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_staff_is_a_validation_error() {
    let (db, service) = setup().await;

    let result = service.process_sale(1, "ST-9999", "1", 500).await;
    let TransactionResult::ValidationError { message } = result else {
        panic!("expected validation error, got {result:?}");
    };
    assert!(message.contains("ST-9999"), "message: {message}");

    assert_eq!(db.sales().count().await.unwrap(), 0);
}

#[tokio::test]
async fn nonpositive_store_id_is_rejected() {
    let (db, service) = setup().await;

    let result = service.process_sale(0, "ST-0010", "1", 500).await;
    assert!(matches!(result, TransactionResult::ValidationError { .. }));
    assert_eq!(db.sales().count().await.unwrap(), 0);
}

#[tokio::test]
async fn barcode_identifiers_resolve_too() {
    let (_db, service) = setup().await;

    let barcode = format!("49{:011}", 3);
    let result = service.process_sale(1, "ST-0010", &barcode, 50).await;
    let TransactionResult::Success { sale, .. } = result else {
        panic!("expected success, got {result:?}");
    };
    assert_eq!(sale.amount, 50);
}

#[tokio::test]
async fn concurrent_sales_never_share_an_id() {
    let (_db, service) = setup().await;
    let service = std::sync::Arc::new(service);

    let a = {
        let service = std::sync::Arc::clone(&service);
        tokio::spawn(async move { service.process_sale(1, "ST-0010", "1", 100).await })
    };
    let b = {
        let service = std::sync::Arc::clone(&service);
        tokio::spawn(async move { service.process_sale(1, "ST-0010", "2", 200).await })
    };

    let (a, b) = (a.await.unwrap(), b.await.unwrap());
    let (sale_a, sale_b) = match (&a, &b) {
        (
            TransactionResult::Success { sale: sa, .. },
            TransactionResult::Success { sale: sb, .. },
        ) => (sa, sb),
        other => panic!("expected two successes, got {other:?}"),
    };

    assert_ne!(sale_a.id, sale_b.id);
}

#[tokio::test]
async fn printer_status_reflects_directory() {
    let (_db, service) = setup().await;

    assert!(service.is_printer_configured(1).await);
    assert!(!service.is_printer_configured(2).await);
    assert!(!service.is_printer_configured(42).await);
}
