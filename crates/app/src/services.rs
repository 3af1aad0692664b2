use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use siwaras_audit::{actions, AuditSink};
use siwaras_catalog::{InboundMovement, Item, ItemSnapshot, MovementMeta, OutboundMovement};
use siwaras_core::{ItemCode, MovementId, ReceiptId, Session, Tenant};
use siwaras_ledger::StockLedger;
use siwaras_receipt::{LineItem, Receipt, ReceiptHeader, Recipient, RecipientField};
use siwaras_render::{render_receipt, Letterhead, RenderedDocument};
use siwaras_store::{decode_rows, ops, RecordStore, StoreError};

use crate::ServiceError;

/// Rows fetched per list read.
const READ_LIMIT: &str = "1000";

/// Application services for one tenant and one signed-in admin.
///
/// Mutations follow the same shape throughout: validate on the aggregate,
/// post to the store, mutate the in-memory copy, then audit. The audit write
/// is best effort and runs after the operation already succeeded.
pub struct AppServices<S, A> {
    tenant: Tenant,
    session: Session,
    store: Arc<S>,
    ledger: StockLedger<Arc<S>>,
    audit: A,
    letterhead: Letterhead,
}

impl<S: RecordStore, A: AuditSink> AppServices<S, A> {
    pub fn new(tenant: Tenant, session: Session, store: Arc<S>, audit: A) -> Self {
        Self {
            tenant,
            session,
            ledger: StockLedger::new(Arc::clone(&store)),
            store,
            audit,
            letterhead: Letterhead::default(),
        }
    }

    pub fn tenant(&self) -> Tenant {
        self.tenant
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn ledger(&self) -> &StockLedger<Arc<S>> {
        &self.ledger
    }

    async fn log(&self, action: &str, details: String) {
        self.audit
            .log_action(self.tenant, &self.session, action, &details)
            .await;
    }

    // ---- tanda terima ----

    /// Create an empty draft. The store assigns the id.
    pub async fn create_receipt(
        &self,
        date: NaiveDate,
        description: &str,
    ) -> Result<Receipt, ServiceError> {
        let description = non_empty_or_dash(description);
        let result = self
            .store
            .submit(
                ops::TANDA_TERIMA,
                json!({
                    "tanggal": date,
                    "keterangan": description,
                    "status": "Draft",
                    "createdBy": self.session.username,
                }),
                self.tenant,
            )
            .await?;
        let id = result
            .get("id_tt")
            .and_then(serde_json::Value::as_str)
            .map(ReceiptId::new)
            .ok_or_else(|| StoreError::request_failed("response missing id_tt"))?;

        tracing::info!(tenant = %self.tenant, %id, "tanda terima created");
        self.log(
            actions::CREATE_TANDA_TERIMA,
            format!("Tambah tanda terima: {description}"),
        )
        .await;
        Ok(Receipt::new(id, date, description, &self.session.username))
    }

    pub async fn list_receipts(&self) -> Result<Vec<ReceiptHeader>, ServiceError> {
        let rows = self
            .store
            .fetch(
                ops::READ_TANDA_TERIMA,
                &[("limit", READ_LIMIT.into())],
                self.tenant,
            )
            .await?;
        Ok(decode_rows(rows)?)
    }

    /// Rehydrate a receipt from its three stored parts.
    pub async fn load_receipt(&self, id: &ReceiptId) -> Result<Receipt, ServiceError> {
        let filter = [("id_tt", id.to_string())];

        let headers = self
            .store
            .fetch(ops::READ_TANDA_TERIMA, &filter, self.tenant)
            .await?;
        let header: ReceiptHeader = decode_rows(headers)?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::ReceiptNotFound(id.clone()))?;

        let lines = self
            .store
            .fetch(ops::READ_TANDA_TERIMA_BARANG, &filter, self.tenant)
            .await?;
        let line_items: Vec<LineItem> = decode_rows(lines)?;

        let form_rows = self
            .store
            .fetch(ops::READ_TANDA_TERIMA_FORM_DATA, &filter, self.tenant)
            .await?;
        let recipient = decode_rows::<Recipient>(form_rows)?
            .into_iter()
            .next()
            .unwrap_or_default();

        Ok(Receipt::from_parts(header, line_items, recipient))
    }

    /// Add a line item to a draft.
    ///
    /// The stock figure checked here is whatever the catalog reports right
    /// now; nothing reserves it. An unknown code still gets a snapshot
    /// (placeholder name, stock 0) so the error is the stock check, not a
    /// lookup failure.
    pub async fn add_line_item(
        &self,
        receipt: &mut Receipt,
        code: &ItemCode,
        quantity: i64,
    ) -> Result<(), ServiceError> {
        let snapshot = self
            .ledger
            .find_item(self.tenant, code)
            .await?
            .map(|item| item.snapshot())
            .unwrap_or_else(|| ItemSnapshot::missing(code.clone()));

        let line = receipt.prepare_line_item(&snapshot, quantity)?;

        let mut payload = serde_json::to_value(&line)
            .map_err(|e| StoreError::MalformedRow(e.to_string()))?;
        payload["id_tt"] = json!(receipt.id());
        self.store
            .submit(ops::TANDA_TERIMA_BARANG, payload, self.tenant)
            .await?;

        self.log(
            actions::ADD_BARANG_TANDA_TERIMA,
            format!(
                "Tambah barang {} ke tanda terima {}",
                line.item_code,
                receipt.id()
            ),
        )
        .await;
        receipt.apply_line_item(line);
        Ok(())
    }

    /// Remove a line by code; a code that is not on the receipt is a no-op.
    pub async fn remove_line_item(
        &self,
        receipt: &mut Receipt,
        code: &ItemCode,
    ) -> Result<bool, ServiceError> {
        receipt.ensure_draft("remove line item")?;

        self.store
            .submit(
                ops::DELETE_TANDA_TERIMA_BARANG,
                json!({ "id_tt": receipt.id(), "kodeBarang": code }),
                self.tenant,
            )
            .await?;

        let removed = receipt.remove_line_item(code)?;
        if removed {
            self.log(
                actions::DELETE_BARANG_TANDA_TERIMA,
                format!("Hapus barang {code} dari tanda terima {}", receipt.id()),
            )
            .await;
        }
        Ok(removed)
    }

    /// Replace one recipient field and persist the whole form-data row.
    pub async fn update_recipient_field(
        &self,
        receipt: &mut Receipt,
        field: RecipientField,
        value: &str,
    ) -> Result<(), ServiceError> {
        receipt.update_recipient_field(field, value)?;

        let mut payload = serde_json::to_value(receipt.recipient())
            .map_err(|e| StoreError::MalformedRow(e.to_string()))?;
        payload["id_tt"] = json!(receipt.id());
        self.store
            .submit(ops::UPDATE_TANDA_TERIMA_FORM_DATA, payload, self.tenant)
            .await?;

        self.log(
            actions::UPDATE_FORM_DATA_TANDA_TERIMA,
            format!(
                "Update {} tanda terima {}",
                field.wire_name(),
                receipt.id()
            ),
        )
        .await;
        Ok(())
    }

    /// Finalize a draft: deduct stock for every line, then flip the status.
    ///
    /// Deduction is sequential and stops at the first failure. Lines already
    /// deducted stay deducted; the receipt stays Draft so the admin can fix
    /// the list and try again. There is no rollback.
    pub async fn finalize_receipt(&self, receipt: &mut Receipt) -> Result<(), ServiceError> {
        receipt.finalize_preconditions()?;

        let note = format!("Barang keluar untuk: {}", receipt.description());
        let lines: Vec<LineItem> = receipt.line_items().to_vec();
        for (deducted, line) in lines.iter().enumerate() {
            let meta = MovementMeta {
                item_name: line.item_name.clone(),
                unit: line.unit.clone(),
                date: receipt.date(),
                note: note.clone(),
                created_by: self.session.username.clone(),
            };
            if let Err(source) = self
                .ledger
                .record_outbound(
                    self.tenant,
                    &line.item_code,
                    line.quantity,
                    &meta,
                    Some(receipt.id()),
                )
                .await
            {
                tracing::warn!(
                    tenant = %self.tenant,
                    id = %receipt.id(),
                    failed_item = %line.item_code,
                    deducted,
                    "finalize stopped partway, receipt stays draft"
                );
                return Err(ServiceError::FinalizeFailed {
                    failed_item: line.item_code.to_string(),
                    deducted,
                    source,
                });
            }
        }

        self.store
            .submit(
                ops::UPDATE_TANDA_TERIMA_STATUS,
                json!({
                    "id_tt": receipt.id(),
                    "status": "Selesai",
                    "updatedBy": self.session.username,
                }),
                self.tenant,
            )
            .await?;
        receipt.mark_finalized()?;

        tracing::info!(tenant = %self.tenant, id = %receipt.id(), "tanda terima finalized");
        self.log(
            actions::VALIDATE_TANDA_TERIMA,
            format!("Validasi dan finalisasi tanda terima {}", receipt.id()),
        )
        .await;
        Ok(())
    }

    /// Delete a draft and its line items and form data. Finalized receipts
    /// are permanent.
    pub async fn delete_receipt(&self, receipt: &Receipt) -> Result<(), ServiceError> {
        receipt.ensure_deletable()?;

        self.store
            .submit(
                ops::DELETE_TANDA_TERIMA,
                json!({ "id_tt": receipt.id() }),
                self.tenant,
            )
            .await?;

        self.log(
            actions::DELETE_TANDA_TERIMA,
            format!("Hapus tanda terima {}", receipt.id()),
        )
        .await;
        Ok(())
    }

    /// Render the printable document for a finalized receipt.
    pub async fn render_receipt(
        &self,
        receipt: &Receipt,
        printed_at: NaiveDateTime,
    ) -> Result<RenderedDocument, ServiceError> {
        let document = render_receipt(receipt, &self.letterhead, printed_at)?;
        self.log(
            actions::GENERATE_PDF_TANDA_TERIMA,
            format!("Generate PDF tanda terima {}", receipt.id()),
        )
        .await;
        Ok(document)
    }

    // ---- stock and catalog ----

    pub async fn list_items(&self) -> Result<Vec<Item>, ServiceError> {
        Ok(self.ledger.list_items(self.tenant).await?)
    }

    pub async fn current_stock(&self, code: &ItemCode) -> Result<i64, ServiceError> {
        Ok(self.ledger.current_stock(self.tenant, code).await?)
    }

    pub async fn list_inbound(&self) -> Result<Vec<InboundMovement>, ServiceError> {
        Ok(self.ledger.list_inbound(self.tenant).await?)
    }

    pub async fn list_outbound(&self) -> Result<Vec<OutboundMovement>, ServiceError> {
        Ok(self.ledger.list_outbound(self.tenant).await?)
    }

    pub async fn record_inbound(
        &self,
        code: &ItemCode,
        quantity: i64,
        meta: &MovementMeta,
    ) -> Result<InboundMovement, ServiceError> {
        let movement = self
            .ledger
            .record_inbound(self.tenant, code, quantity, meta)
            .await?;
        self.log(
            actions::CREATE_BARANG_MASUK,
            format!("Tambah barang masuk {code} ({quantity} {})", meta.unit),
        )
        .await;
        Ok(movement)
    }

    pub async fn update_inbound(&self, movement: &InboundMovement) -> Result<(), ServiceError> {
        self.ledger.update_inbound(self.tenant, movement).await?;
        self.log(
            actions::UPDATE_BARANG_MASUK,
            format!("Update barang masuk {}", movement.id),
        )
        .await;
        Ok(())
    }

    pub async fn delete_inbound(&self, id: &MovementId) -> Result<(), ServiceError> {
        self.ledger
            .delete_inbound(self.tenant, id, &self.session.username)
            .await?;
        self.log(
            actions::DELETE_BARANG_MASUK,
            format!("Hapus barang masuk {id}"),
        )
        .await;
        Ok(())
    }

    /// Standalone outbound movement, not tied to a receipt.
    pub async fn record_outbound(
        &self,
        code: &ItemCode,
        quantity: i64,
        meta: &MovementMeta,
    ) -> Result<OutboundMovement, ServiceError> {
        Ok(self
            .ledger
            .record_outbound(self.tenant, code, quantity, meta, None)
            .await?)
    }

    pub async fn update_item(
        &self,
        code: &ItemCode,
        name: &str,
        unit: &str,
    ) -> Result<(), ServiceError> {
        self.ledger
            .update_item(self.tenant, code, name, unit, &self.session.username)
            .await?;
        self.log(
            actions::UPDATE_MASTER_BARANG,
            format!("Update master barang {code}"),
        )
        .await;
        Ok(())
    }

    pub async fn delete_item(&self, code: &ItemCode) -> Result<(), ServiceError> {
        self.ledger
            .delete_item(self.tenant, code, &self.session.username)
            .await?;
        self.log(
            actions::DELETE_MASTER_BARANG,
            format!("Hapus master barang {code}"),
        )
        .await;
        Ok(())
    }

    pub async fn create_item(
        &self,
        code: &ItemCode,
        name: &str,
        unit: &str,
    ) -> Result<(), ServiceError> {
        Ok(self.ledger.create_item(self.tenant, code, name, unit).await?)
    }
}

fn non_empty_or_dash(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "-".to_string()
    } else {
        trimmed.to_string()
    }
}
