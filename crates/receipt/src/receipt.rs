use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use siwaras_catalog::ItemSnapshot;
use siwaras_core::{DomainError, DomainResult, ItemCode, ReceiptId};

/// Canonical empty marker for recipient fields.
///
/// The store keeps `"-"` where a field has never been filled; finalize
/// treats it the same as empty.
pub const PLACEHOLDER: &str = "-";

/// Receipt lifecycle. The only transition is Draft → Finalized, one way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptStatus {
    Draft,
    /// Stored as `Selesai` by the backing sheet.
    #[serde(rename = "Selesai")]
    Finalized,
}

/// One item-code/quantity pair attached to a receipt.
///
/// Name and unit are value copies captured when the line was added, so a
/// later catalog rename does not rewrite finalized history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "kodeBarang")]
    pub item_code: ItemCode,
    #[serde(rename = "namaBarang")]
    pub item_name: String,
    #[serde(rename = "satuan")]
    pub unit: String,
    #[serde(rename = "jumlah")]
    pub quantity: i64,
}

/// Who received the goods. Mutable only while the receipt is Draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "nip")]
    pub id_number: String,
    #[serde(rename = "keterangan")]
    pub note: String,
}

impl Default for Recipient {
    fn default() -> Self {
        Self {
            name: PLACEHOLDER.to_string(),
            id_number: PLACEHOLDER.to_string(),
            note: PLACEHOLDER.to_string(),
        }
    }
}

impl Recipient {
    pub fn is_complete(&self) -> bool {
        !is_placeholder(&self.name) && !is_placeholder(&self.id_number)
    }

    /// Copy with one field replaced; empty input normalizes to `"-"`.
    pub fn with_field(&self, field: RecipientField, value: &str) -> Self {
        let normalized = normalize(value);
        let mut updated = self.clone();
        match field {
            RecipientField::Name => updated.name = normalized,
            RecipientField::IdNumber => updated.id_number = normalized,
            RecipientField::Note => updated.note = normalized,
        }
        updated
    }
}

fn is_placeholder(value: &str) -> bool {
    value.trim().is_empty() || value.trim() == PLACEHOLDER
}

fn normalize(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Editable recipient fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecipientField {
    Name,
    IdNumber,
    Note,
}

impl RecipientField {
    /// Column name in the store's form-data rows.
    pub fn wire_name(&self) -> &'static str {
        match self {
            RecipientField::Name => "nama",
            RecipientField::IdNumber => "nip",
            RecipientField::Note => "keterangan",
        }
    }
}

/// Header row of a receipt as stored (no line items or recipient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptHeader {
    #[serde(rename = "id_tt")]
    pub id: ReceiptId,
    #[serde(rename = "tanggal")]
    pub date: NaiveDate,
    #[serde(rename = "keterangan")]
    pub description: String,
    pub status: ReceiptStatus,
    #[serde(rename = "createdBy")]
    pub created_by: String,
}

/// Aggregate root: one tanda terima with its line items and recipient.
///
/// Decision methods (`prepare_line_item`, `ensure_draft`,
/// `finalize_preconditions`, `ensure_deletable`) never mutate; mutation
/// happens through the `apply_*` / `mark_*` methods or the convenience
/// wrappers that compose both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    id: ReceiptId,
    date: NaiveDate,
    description: String,
    status: ReceiptStatus,
    created_by: String,
    line_items: Vec<LineItem>,
    recipient: Recipient,
}

impl Receipt {
    /// A freshly created receipt: Draft, no line items, placeholder recipient.
    pub fn new(
        id: ReceiptId,
        date: NaiveDate,
        description: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date,
            description: description.into(),
            status: ReceiptStatus::Draft,
            created_by: created_by.into(),
            line_items: Vec::new(),
            recipient: Recipient::default(),
        }
    }

    /// Rehydrate from stored rows (header + detail + form data).
    pub fn from_parts(
        header: ReceiptHeader,
        line_items: Vec<LineItem>,
        recipient: Recipient,
    ) -> Self {
        Self {
            id: header.id,
            date: header.date,
            description: header.description,
            status: header.status,
            created_by: header.created_by,
            line_items,
            recipient,
        }
    }

    pub fn id(&self) -> &ReceiptId {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> ReceiptStatus {
        self.status
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn is_draft(&self) -> bool {
        self.status == ReceiptStatus::Draft
    }

    pub fn ensure_draft(&self, action: &str) -> DomainResult<()> {
        if self.is_draft() {
            Ok(())
        } else {
            Err(DomainError::invalid_state(format!(
                "cannot {action}: receipt {} is finalized",
                self.id
            )))
        }
    }

    /// Decide whether a line can be added; returns the denormalized line.
    ///
    /// The stock check runs against the snapshot's figure, i.e. the stock
    /// visible when the caller fetched the item, not a re-resolved value.
    pub fn prepare_line_item(
        &self,
        snapshot: &ItemSnapshot,
        quantity: i64,
    ) -> DomainResult<LineItem> {
        self.ensure_draft("add line item")?;

        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if self
            .line_items
            .iter()
            .any(|line| line.item_code == snapshot.code)
        {
            return Err(DomainError::DuplicateItem(snapshot.code.to_string()));
        }
        if quantity > snapshot.stock {
            return Err(DomainError::ExceedsStock {
                code: snapshot.code.to_string(),
                requested: quantity,
                available: snapshot.stock,
            });
        }

        Ok(LineItem {
            item_code: snapshot.code.clone(),
            item_name: snapshot.name.clone(),
            unit: snapshot.unit.clone(),
            quantity,
        })
    }

    /// Append a line previously validated by [`Receipt::prepare_line_item`].
    pub fn apply_line_item(&mut self, line: LineItem) {
        self.line_items.push(line);
    }

    /// Validate and append in one step.
    pub fn add_line_item(&mut self, snapshot: &ItemSnapshot, quantity: i64) -> DomainResult<()> {
        let line = self.prepare_line_item(snapshot, quantity)?;
        self.apply_line_item(line);
        Ok(())
    }

    /// Remove a line by item code. Returns whether anything was removed; an
    /// absent code is a no-op, not an error.
    pub fn remove_line_item(&mut self, code: &ItemCode) -> DomainResult<bool> {
        self.ensure_draft("remove line item")?;
        let before = self.line_items.len();
        self.line_items.retain(|line| line.item_code != *code);
        Ok(self.line_items.len() != before)
    }

    /// Replace one recipient field; empty input normalizes to `"-"`.
    pub fn update_recipient_field(
        &mut self,
        field: RecipientField,
        value: &str,
    ) -> DomainResult<()> {
        self.ensure_draft("update recipient")?;
        self.recipient = self.recipient.with_field(field, value);
        Ok(())
    }

    /// Checks run before any stock is deducted, in the documented order:
    /// line items present, recipient complete, receipt still Draft.
    pub fn finalize_preconditions(&self) -> DomainResult<()> {
        if self.line_items.is_empty() {
            return Err(DomainError::EmptyLineItems);
        }
        if !self.recipient.is_complete() {
            return Err(DomainError::incomplete_recipient(
                "recipient name and id number must be filled in",
            ));
        }
        self.ensure_draft("finalize")?;
        Ok(())
    }

    /// Flip to Finalized. Permanent; there is no way back to Draft.
    pub fn mark_finalized(&mut self) -> DomainResult<()> {
        self.ensure_draft("finalize")?;
        self.status = ReceiptStatus::Finalized;
        Ok(())
    }

    pub fn ensure_deletable(&self) -> DomainResult<()> {
        if self.is_draft() {
            Ok(())
        } else {
            Err(DomainError::invalid_state(format!(
                "finalized receipt {} cannot be deleted",
                self.id
            )))
        }
    }
}
