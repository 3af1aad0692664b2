use serde::{Deserialize, Serialize};

use siwaras_core::ItemCode;

/// Master catalog row: one item and its running quantity-on-hand.
///
/// Created on first inbound movement (or explicit catalog entry) and mutated
/// by every movement. `quantity_on_hand` is what the backing store last
/// reported; it can be stale by the time it is acted on (see the ledger's
/// concurrency notes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "kodeBarang")]
    pub code: ItemCode,
    #[serde(rename = "namaBarang")]
    pub name: String,
    #[serde(rename = "satuan")]
    pub unit: String,
    #[serde(rename = "stok")]
    pub quantity_on_hand: i64,
}

impl Item {
    pub fn is_available(&self) -> bool {
        self.quantity_on_hand > 0
    }

    /// Denormalized view captured for a receipt line item.
    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            code: self.code.clone(),
            name: self.name.clone(),
            unit: self.unit.clone(),
            stock: self.quantity_on_hand,
        }
    }
}

/// Point-in-time view of an item used when adding a receipt line.
///
/// Name and unit are copied into the line item at add time so later catalog
/// renames do not rewrite history; `stock` is the figure the stock-sufficiency
/// check runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub code: ItemCode,
    pub name: String,
    pub unit: String,
    pub stock: i64,
}

impl ItemSnapshot {
    /// Snapshot for an item the catalog does not know yet (stock 0).
    pub fn missing(code: ItemCode) -> Self {
        Self {
            code,
            name: "-".to_string(),
            unit: "-".to_string(),
            stock: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(stock: i64) -> Item {
        Item {
            code: ItemCode::new("A001").unwrap(),
            name: "Toga".to_string(),
            unit: "pcs".to_string(),
            quantity_on_hand: stock,
        }
    }

    #[test]
    fn deserializes_sheet_row() {
        let row = serde_json::json!({
            "kodeBarang": "A001",
            "namaBarang": "Toga",
            "satuan": "pcs",
            "stok": 12,
        });
        let parsed: Item = serde_json::from_value(row).unwrap();
        assert_eq!(parsed, item(12));
    }

    #[test]
    fn snapshot_copies_name_and_unit() {
        let snap = item(5).snapshot();
        assert_eq!(snap.name, "Toga");
        assert_eq!(snap.unit, "pcs");
        assert_eq!(snap.stock, 5);
    }

    #[test]
    fn zero_stock_is_not_available() {
        assert!(!item(0).is_available());
        assert!(item(1).is_available());
    }
}
