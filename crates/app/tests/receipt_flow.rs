//! End-to-end receipt lifecycle against the in-memory store.

use std::sync::Arc;

use chrono::NaiveDate;

use siwaras_app::{AppServices, ServiceError};
use siwaras_audit::MemoryAuditSink;
use siwaras_catalog::MovementMeta;
use siwaras_core::{DomainError, ItemCode, Session, Tenant};
use siwaras_ledger::LedgerError;
use siwaras_receipt::{ReceiptStatus, RecipientField};
use siwaras_store::InMemoryRecordStore;

type Services = AppServices<InMemoryRecordStore, Arc<MemoryAuditSink>>;

fn setup() -> (Arc<InMemoryRecordStore>, Arc<MemoryAuditSink>, Services) {
    let store = Arc::new(InMemoryRecordStore::new());
    let audit = Arc::new(MemoryAuditSink::new());
    let services = AppServices::new(
        Tenant::Wisuda,
        Session::new("admin1", "admin").with_admin_id("ADM-01"),
        Arc::clone(&store),
        Arc::clone(&audit),
    );
    (store, audit, services)
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn meta(name: &str) -> MovementMeta {
    MovementMeta {
        item_name: name.to_string(),
        unit: "pcs".to_string(),
        date: date(),
        note: String::new(),
        created_by: "admin1".to_string(),
    }
}

async fn seed(services: &Services, code: &str, name: &str, quantity: i64) -> ItemCode {
    let code = ItemCode::new(code).unwrap();
    services
        .record_inbound(&code, quantity, &meta(name))
        .await
        .unwrap();
    code
}

#[tokio::test]
async fn finalize_deducts_stock_and_links_movements() {
    let (store, audit, services) = setup();
    let code = seed(&services, "A001", "Toga Wisuda", 10).await;

    let mut receipt = services.create_receipt(date(), "Wisuda periode I").await.unwrap();
    assert_eq!(receipt.id().as_str(), "TT-001");

    services.add_line_item(&mut receipt, &code, 4).await.unwrap();

    // A second line with the same code never reaches the store.
    let err = services.add_line_item(&mut receipt, &code, 2).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::DuplicateItem(_))));
    assert_eq!(receipt.line_items().len(), 1);

    services
        .update_recipient_field(&mut receipt, RecipientField::Name, "Budi Santoso")
        .await
        .unwrap();
    services
        .update_recipient_field(&mut receipt, RecipientField::IdNumber, "19870101")
        .await
        .unwrap();

    services.finalize_receipt(&mut receipt).await.unwrap();
    assert_eq!(receipt.status(), ReceiptStatus::Finalized);
    assert_eq!(store.stock_of(Tenant::Wisuda, "A001"), Some(6));

    let outbound = services.list_outbound().await.unwrap();
    assert_eq!(outbound.len(), 1);
    assert_eq!(outbound[0].receipt_id.as_ref(), Some(receipt.id()));
    assert_eq!(outbound[0].quantity, 4);
    assert_eq!(outbound[0].note, "Barang keluar untuk: Wisuda periode I");

    // The stored header agrees with the in-memory aggregate.
    let reloaded = services.load_receipt(receipt.id()).await.unwrap();
    assert_eq!(reloaded, receipt);

    let actions = audit.actions();
    assert!(actions.contains(&"CREATE_TANDA_TERIMA".to_string()));
    assert!(actions.contains(&"ADD_BARANG_TANDA_TERIMA".to_string()));
    assert!(actions.contains(&"VALIDATE_TANDA_TERIMA".to_string()));
}

#[tokio::test]
async fn finalize_stops_at_first_failure_and_keeps_earlier_deductions() {
    let (store, _, services) = setup();
    let toga = seed(&services, "A001", "Toga Wisuda", 10).await;
    let map = seed(&services, "A002", "Map Ijazah", 5).await;

    let mut receipt = services.create_receipt(date(), "Wisuda periode II").await.unwrap();
    services.add_line_item(&mut receipt, &toga, 4).await.unwrap();
    services.add_line_item(&mut receipt, &map, 5).await.unwrap();
    services
        .update_recipient_field(&mut receipt, RecipientField::Name, "Siti Rahma")
        .await
        .unwrap();
    services
        .update_recipient_field(&mut receipt, RecipientField::IdNumber, "19900202")
        .await
        .unwrap();

    // Someone else takes maps between add and finalize.
    services.record_outbound(&map, 3, &meta("Map Ijazah")).await.unwrap();
    assert_eq!(store.stock_of(Tenant::Wisuda, "A002"), Some(2));

    let err = services.finalize_receipt(&mut receipt).await.unwrap_err();
    match err {
        ServiceError::FinalizeFailed { failed_item, deducted, source } => {
            assert_eq!(failed_item, "A002");
            assert_eq!(deducted, 1);
            assert!(matches!(
                source,
                LedgerError::Domain(DomainError::InsufficientStock { .. })
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // The first line was already deducted and stays deducted.
    assert_eq!(store.stock_of(Tenant::Wisuda, "A001"), Some(6));
    assert_eq!(store.stock_of(Tenant::Wisuda, "A002"), Some(2));
    assert_eq!(receipt.status(), ReceiptStatus::Draft);

    let reloaded = services.load_receipt(receipt.id()).await.unwrap();
    assert_eq!(reloaded.status(), ReceiptStatus::Draft);

    // Fixing the list and retrying deducts the surviving lines again.
    services.remove_line_item(&mut receipt, &map).await.unwrap();
    services.finalize_receipt(&mut receipt).await.unwrap();
    assert_eq!(store.stock_of(Tenant::Wisuda, "A001"), Some(2));
    assert_eq!(receipt.status(), ReceiptStatus::Finalized);
}

#[tokio::test]
async fn add_line_item_checks_the_stock_snapshot() {
    let (_, _, services) = setup();
    let code = seed(&services, "A001", "Toga Wisuda", 3).await;

    let mut receipt = services.create_receipt(date(), "Wisuda").await.unwrap();

    let err = services.add_line_item(&mut receipt, &code, 5).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::ExceedsStock { available: 3, .. })
    ));

    // An unknown code gets a zero-stock snapshot, so any quantity fails
    // the same check.
    let unknown = ItemCode::new("Z999").unwrap();
    let err = services.add_line_item(&mut receipt, &unknown, 1).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::ExceedsStock { available: 0, .. })
    ));
    assert!(receipt.line_items().is_empty());
}

#[tokio::test]
async fn deleting_a_draft_cascades_but_finalized_is_permanent() {
    let (store, _, services) = setup();
    let code = seed(&services, "A001", "Toga Wisuda", 10).await;

    let mut draft = services.create_receipt(date(), "Draft to drop").await.unwrap();
    services.add_line_item(&mut draft, &code, 2).await.unwrap();
    services
        .update_recipient_field(&mut draft, RecipientField::Name, "Budi")
        .await
        .unwrap();

    services.delete_receipt(&draft).await.unwrap();
    assert!(matches!(
        services.load_receipt(draft.id()).await.unwrap_err(),
        ServiceError::ReceiptNotFound(_)
    ));
    // Deleting a draft never touches stock.
    assert_eq!(store.stock_of(Tenant::Wisuda, "A001"), Some(10));

    let mut kept = services.create_receipt(date(), "Kept").await.unwrap();
    services.add_line_item(&mut kept, &code, 2).await.unwrap();
    services
        .update_recipient_field(&mut kept, RecipientField::Name, "Budi")
        .await
        .unwrap();
    services
        .update_recipient_field(&mut kept, RecipientField::IdNumber, "19870101")
        .await
        .unwrap();
    services.finalize_receipt(&mut kept).await.unwrap();

    assert!(matches!(
        services.delete_receipt(&kept).await.unwrap_err(),
        ServiceError::Domain(DomainError::InvalidState(_))
    ));
    assert!(services.load_receipt(kept.id()).await.is_ok());
}

#[tokio::test]
async fn recipient_edits_persist_and_normalize() {
    let (_, _, services) = setup();
    let mut receipt = services.create_receipt(date(), "  ").await.unwrap();
    assert_eq!(receipt.description(), "-");

    services
        .update_recipient_field(&mut receipt, RecipientField::Name, "  Budi  ")
        .await
        .unwrap();
    services
        .update_recipient_field(&mut receipt, RecipientField::Note, "")
        .await
        .unwrap();

    let reloaded = services.load_receipt(receipt.id()).await.unwrap();
    assert_eq!(reloaded.recipient().name, "Budi");
    assert_eq!(reloaded.recipient().note, "-");
}

#[tokio::test]
async fn tenants_do_not_see_each_other() {
    let (store, audit, wisuda) = setup();
    let sosprom = AppServices::new(
        Tenant::Sosprom,
        Session::new("admin2", "admin"),
        Arc::clone(&store),
        Arc::clone(&audit),
    );

    seed(&wisuda, "A001", "Toga Wisuda", 10).await;
    seed(&sosprom, "P001", "Brosur", 200).await;

    let wisuda_items = wisuda.list_items().await.unwrap();
    assert_eq!(wisuda_items.len(), 1);
    assert_eq!(wisuda_items[0].code.as_str(), "A001");

    let receipt = sosprom.create_receipt(date(), "Sosprom daerah").await.unwrap();
    assert!(wisuda.list_receipts().await.unwrap().is_empty());
    assert!(matches!(
        wisuda.load_receipt(receipt.id()).await.unwrap_err(),
        ServiceError::ReceiptNotFound(_)
    ));
}

#[tokio::test]
async fn rendering_needs_a_finalized_receipt() {
    let (_, audit, services) = setup();
    let code = seed(&services, "A001", "Toga Wisuda", 10).await;

    let mut receipt = services.create_receipt(date(), "Wisuda periode I").await.unwrap();
    services.add_line_item(&mut receipt, &code, 4).await.unwrap();
    services
        .update_recipient_field(&mut receipt, RecipientField::Name, "Budi Santoso")
        .await
        .unwrap();
    services
        .update_recipient_field(&mut receipt, RecipientField::IdNumber, "19870101")
        .await
        .unwrap();

    let printed_at = date().and_hms_opt(9, 0, 0).unwrap();
    assert!(matches!(
        services.render_receipt(&receipt, printed_at).await.unwrap_err(),
        ServiceError::Domain(DomainError::InvalidState(_))
    ));

    services.finalize_receipt(&mut receipt).await.unwrap();
    let document = services.render_receipt(&receipt, printed_at).await.unwrap();
    let text = document.to_text();
    assert!(text.contains("TANDA TERIMA BARANG KELUAR"));
    assert!(text.contains("Toga Wisuda"));
    assert!(audit.actions().contains(&"GENERATE_PDF_TANDA_TERIMA".to_string()));
}
