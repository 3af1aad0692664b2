use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use siwaras_core::{ItemCode, MovementId, ReceiptId};

/// Caller-supplied context for a new movement: the denormalized item fields
/// plus bookkeeping metadata. Name and unit come from the caller (form input
/// for a new item, catalog snapshot for an existing one), mirroring how the
/// store rows are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementMeta {
    pub item_name: String,
    pub unit: String,
    pub date: NaiveDate,
    pub note: String,
    pub created_by: String,
}

/// A ledger entry increasing an item's stock.
///
/// Immutable once created except for the explicit update/delete-with-audit
/// path exposed by the ledger service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMovement {
    #[serde(rename = "id_bm")]
    pub id: MovementId,
    #[serde(rename = "kodeBarang")]
    pub item_code: ItemCode,
    #[serde(rename = "namaBarang")]
    pub item_name: String,
    #[serde(rename = "jumlah")]
    pub quantity: i64,
    #[serde(rename = "satuan")]
    pub unit: String,
    #[serde(rename = "tanggal")]
    pub date: NaiveDate,
    #[serde(rename = "keterangan")]
    pub note: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
}

/// A ledger entry decreasing an item's stock.
///
/// Created either directly or as a side effect of receipt finalization, in
/// which case `receipt_id` links back to the finalized receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMovement {
    #[serde(rename = "id_bk")]
    pub id: MovementId,
    #[serde(rename = "id_tt", skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<ReceiptId>,
    #[serde(rename = "kodeBarang")]
    pub item_code: ItemCode,
    #[serde(rename = "namaBarang")]
    pub item_name: String,
    #[serde(rename = "jumlah")]
    pub quantity: i64,
    #[serde(rename = "satuan")]
    pub unit: String,
    #[serde(rename = "tanggal")]
    pub date: NaiveDate,
    #[serde(rename = "keterangan")]
    pub note: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbound_row_round_trips_with_receipt_link() {
        let movement = OutboundMovement {
            id: MovementId::new("BK-003"),
            receipt_id: Some(ReceiptId::new("TT-001")),
            item_code: ItemCode::new("A001").unwrap(),
            item_name: "Toga".to_string(),
            quantity: 4,
            unit: "pcs".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            note: "Barang keluar untuk: Wisuda periode I".to_string(),
            created_by: "admin1".to_string(),
        };

        let value = serde_json::to_value(&movement).unwrap();
        assert_eq!(value["id_bk"], "BK-003");
        assert_eq!(value["id_tt"], "TT-001");
        assert_eq!(value["jumlah"], 4);

        let back: OutboundMovement = serde_json::from_value(value).unwrap();
        assert_eq!(back, movement);
    }

    #[test]
    fn direct_outbound_omits_receipt_id() {
        let movement = OutboundMovement {
            id: MovementId::new("BK-001"),
            receipt_id: None,
            item_code: ItemCode::new("B002").unwrap(),
            item_name: "Spanduk".to_string(),
            quantity: 1,
            unit: "lembar".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(),
            note: String::new(),
            created_by: "admin2".to_string(),
        };

        let value = serde_json::to_value(&movement).unwrap();
        assert!(value.get("id_tt").is_none());
    }
}
