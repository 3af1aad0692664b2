//! Stock overview for one tenant, printed to stdout.
//!
//! Reads the endpoint from `SIWARAS_STORE_URL`; the tenant is the first
//! argument (`wisuda` or `sosprom`, default `wisuda`).

use std::sync::Arc;

use siwaras_app::AppServices;
use siwaras_audit::StoreAuditSink;
use siwaras_core::{Session, Tenant};
use siwaras_store::HttpRecordStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    siwaras_observability::init();

    let tenant: Tenant = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "wisuda".to_string())
        .parse()?;

    let store = Arc::new(HttpRecordStore::from_env()?);
    let audit = StoreAuditSink::new(Arc::clone(&store));
    let services = AppServices::new(tenant, Session::new("cli", "admin"), store, audit);

    let items = services.list_items().await?;
    tracing::info!(%tenant, count = items.len(), "master barang loaded");
    println!("Stok {tenant}:");
    for item in &items {
        println!(
            "  {:<10} {:<32} {:>6} {}",
            item.code, item.name, item.quantity_on_hand, item.unit
        );
    }

    let receipts = services.list_receipts().await?;
    println!("\nTanda terima ({}):", receipts.len());
    for header in &receipts {
        println!(
            "  {:<8} {} {:?} {}",
            header.id, header.date, header.status, header.description
        );
    }

    Ok(())
}
