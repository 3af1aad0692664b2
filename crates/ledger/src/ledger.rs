use serde_json::json;
use thiserror::Error;

use siwaras_catalog::{InboundMovement, Item, MovementMeta, OutboundMovement};
use siwaras_core::{DomainError, ItemCode, MovementId, ReceiptId, Tenant};
use siwaras_store::{decode_rows, ops, RecordStore, StoreError};

/// Row limit used for catalog and movement reads.
const READ_LIMIT: &str = "1000";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Stock ledger for one record store.
///
/// All operations are tenant-scoped; the ledger itself holds no state
/// beyond the store handle.
#[derive(Debug, Clone)]
pub struct StockLedger<S> {
    store: S,
}

impl<S: RecordStore> StockLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list_items(&self, tenant: Tenant) -> Result<Vec<Item>, LedgerError> {
        let rows = self
            .store
            .fetch(ops::READ_MASTER_BARANG, &[("limit", READ_LIMIT.into())], tenant)
            .await?;
        Ok(decode_rows(rows)?)
    }

    pub async fn find_item(
        &self,
        tenant: Tenant,
        code: &ItemCode,
    ) -> Result<Option<Item>, LedgerError> {
        let items = self.list_items(tenant).await?;
        Ok(items.into_iter().find(|item| item.code == *code))
    }

    /// Quantity-on-hand as the store currently reports it; 0 for an item
    /// the catalog does not know.
    pub async fn current_stock(&self, tenant: Tenant, code: &ItemCode) -> Result<i64, LedgerError> {
        Ok(self
            .find_item(tenant, code)
            .await?
            .map(|item| item.quantity_on_hand)
            .unwrap_or(0))
    }

    pub async fn list_inbound(&self, tenant: Tenant) -> Result<Vec<InboundMovement>, LedgerError> {
        let rows = self
            .store
            .fetch(ops::READ_BARANG_MASUK, &[("limit", READ_LIMIT.into())], tenant)
            .await?;
        Ok(decode_rows(rows)?)
    }

    pub async fn list_outbound(
        &self,
        tenant: Tenant,
    ) -> Result<Vec<OutboundMovement>, LedgerError> {
        let rows = self
            .store
            .fetch(ops::READ_BARANG_KELUAR, &[("limit", READ_LIMIT.into())], tenant)
            .await?;
        Ok(decode_rows(rows)?)
    }

    /// Record goods coming in. First-seen item codes create the catalog
    /// entry (name and unit from `meta`); known codes increment it.
    pub async fn record_inbound(
        &self,
        tenant: Tenant,
        code: &ItemCode,
        quantity: i64,
        meta: &MovementMeta,
    ) -> Result<InboundMovement, LedgerError> {
        if quantity <= 0 {
            return Err(DomainError::validation("inbound quantity must be positive").into());
        }

        let payload = json!({
            "tanggal": meta.date,
            "kodeBarang": code,
            "namaBarang": meta.item_name,
            "jumlah": quantity,
            "satuan": meta.unit,
            "keterangan": meta.note,
            "createdBy": meta.created_by,
        });
        let result = self.store.submit(ops::BARANG_MASUK, payload, tenant).await?;
        let id = assigned_id(&result, "id_bm")?;

        tracing::info!(%tenant, %code, quantity, %id, "inbound movement recorded");
        Ok(InboundMovement {
            id,
            item_code: code.clone(),
            item_name: meta.item_name.clone(),
            quantity,
            unit: meta.unit.clone(),
            date: meta.date,
            note: meta.note.clone(),
            created_by: meta.created_by.clone(),
        })
    }

    /// Record goods going out, optionally linked to a finalized receipt.
    ///
    /// The sufficiency check compares against a fresh read of the catalog,
    /// but nothing holds that figure stable until the movement posts: two
    /// callers can both pass the check and both deduct, leaving the store
    /// negative. Known and accepted at this tool's scale; do not paper
    /// over it here.
    pub async fn record_outbound(
        &self,
        tenant: Tenant,
        code: &ItemCode,
        quantity: i64,
        meta: &MovementMeta,
        receipt_id: Option<&ReceiptId>,
    ) -> Result<OutboundMovement, LedgerError> {
        if quantity <= 0 {
            return Err(DomainError::validation("outbound quantity must be positive").into());
        }

        let available = self.current_stock(tenant, code).await?;
        if quantity > available {
            return Err(DomainError::InsufficientStock {
                code: code.to_string(),
                requested: quantity,
                available,
            }
            .into());
        }

        let mut payload = json!({
            "tanggal": meta.date,
            "kodeBarang": code,
            "namaBarang": meta.item_name,
            "jumlah": quantity,
            "satuan": meta.unit,
            "keterangan": meta.note,
            "createdBy": meta.created_by,
        });
        if let Some(receipt_id) = receipt_id {
            payload["id_tt"] = json!(receipt_id);
        }
        let result = self.store.submit(ops::BARANG_KELUAR, payload, tenant).await?;
        let id = assigned_id(&result, "id_bk")?;

        tracing::info!(%tenant, %code, quantity, %id, "outbound movement recorded");
        Ok(OutboundMovement {
            id,
            receipt_id: receipt_id.cloned(),
            item_code: code.clone(),
            item_name: meta.item_name.clone(),
            quantity,
            unit: meta.unit.clone(),
            date: meta.date,
            note: meta.note.clone(),
            created_by: meta.created_by.clone(),
        })
    }

    /// Rewrite an inbound movement in place (explicit update-with-audit
    /// path). The store adjusts the item's stock by the quantity delta.
    pub async fn update_inbound(
        &self,
        tenant: Tenant,
        movement: &InboundMovement,
    ) -> Result<(), LedgerError> {
        let payload = serde_json::to_value(movement)
            .map_err(|e| StoreError::MalformedRow(e.to_string()))?;
        self.store
            .submit(ops::UPDATE_BARANG_MASUK, payload, tenant)
            .await?;
        Ok(())
    }

    pub async fn delete_inbound(
        &self,
        tenant: Tenant,
        id: &MovementId,
        deleted_by: &str,
    ) -> Result<(), LedgerError> {
        self.store
            .submit(
                ops::DELETE_BARANG_MASUK,
                json!({ "id_bm": id, "deletedBy": deleted_by }),
                tenant,
            )
            .await?;
        Ok(())
    }

    /// Explicit catalog entry with zero opening stock.
    pub async fn create_item(
        &self,
        tenant: Tenant,
        code: &ItemCode,
        name: &str,
        unit: &str,
    ) -> Result<(), LedgerError> {
        self.store
            .submit(
                ops::MASTER_BARANG,
                json!({ "kodeBarang": code, "namaBarang": name, "satuan": unit, "stok": 0 }),
                tenant,
            )
            .await?;
        Ok(())
    }

    /// Rename an item / change its unit. Stock is never edited this way.
    pub async fn update_item(
        &self,
        tenant: Tenant,
        code: &ItemCode,
        name: &str,
        unit: &str,
        updated_by: &str,
    ) -> Result<(), LedgerError> {
        self.store
            .submit(
                ops::UPDATE_MASTER_BARANG,
                json!({
                    "kodeBarang": code,
                    "namaBarang": name,
                    "satuan": unit,
                    "updatedBy": updated_by,
                }),
                tenant,
            )
            .await?;
        Ok(())
    }

    /// Destructive admin action; the caller confirms, the ledger obeys.
    pub async fn delete_item(
        &self,
        tenant: Tenant,
        code: &ItemCode,
        deleted_by: &str,
    ) -> Result<(), LedgerError> {
        self.store
            .submit(
                ops::DELETE_MASTER_BARANG,
                json!({ "kodeBarang": code, "deletedBy": deleted_by }),
                tenant,
            )
            .await?;
        Ok(())
    }
}

fn assigned_id(result: &serde_json::Value, key: &str) -> Result<MovementId, StoreError> {
    result
        .get(key)
        .and_then(serde_json::Value::as_str)
        .map(MovementId::from)
        .ok_or_else(|| StoreError::request_failed(format!("response missing {key}")))
}
