//! In-memory implementation of [`RecordStore`].
//!
//! Behavioural stand-in for the remote sheet backend, used by tests and
//! local wiring. It reproduces the backend's row semantics per tenant:
//! sequential human-readable ids (`TT-001`, `BM-001`, `BK-001`), stock
//! adjustment on movement writes, and cascade deletion of a receipt's
//! detail rows.
//!
//! Deliberately, movement writes adjust `stok` **without** re-checking
//! sufficiency; the sufficiency check is the caller's stale read. Two
//! overlapping outbound writes can therefore drive `stok` negative here,
//! exactly as they can against the real backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value};

use siwaras_core::Tenant;

use crate::error::StoreError;
use crate::ops;
use crate::record_store::RecordStore;

#[derive(Debug, Default)]
struct TenantTables {
    master_barang: Vec<Value>,
    barang_masuk: Vec<Value>,
    barang_keluar: Vec<Value>,
    tanda_terima: Vec<Value>,
    tanda_terima_barang: Vec<Value>,
    tanda_terima_form_data: Vec<Value>,
    audit: Vec<Value>,
    next_bm: u32,
    next_bk: u32,
    next_tt: u32,
}

/// In-memory record store, isolated per tenant.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: Mutex<HashMap<Tenant, TenantTables>>,
}

fn str_field<'a>(row: &'a Value, key: &str) -> Option<&'a str> {
    row.get(key).and_then(Value::as_str)
}

fn i64_field(row: &Value, key: &str) -> i64 {
    row.get(key).and_then(Value::as_i64).unwrap_or(0)
}

fn required_str<'a>(payload: &'a Value, key: &str) -> Result<&'a str, StoreError> {
    str_field(payload, key)
        .ok_or_else(|| StoreError::request_failed(format!("payload missing {key}")))
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current `stok` of an item, as the backend would report it.
    /// Test-support accessor.
    pub fn stock_of(&self, tenant: Tenant, code: &str) -> Option<i64> {
        let guard = self.inner.lock().ok()?;
        let tables = guard.get(&tenant)?;
        tables
            .master_barang
            .iter()
            .find(|row| str_field(row, "kodeBarang") == Some(code))
            .map(|row| i64_field(row, "stok"))
    }

    /// Number of audit rows recorded for a tenant. Test-support accessor.
    pub fn audit_len(&self, tenant: Tenant) -> usize {
        self.inner
            .lock()
            .ok()
            .and_then(|guard| guard.get(&tenant).map(|t| t.audit.len()))
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Tenant, TenantTables>>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::request_failed("store lock poisoned"))
    }
}

impl TenantTables {
    fn adjust_stock(&mut self, code: &str, name: &str, unit: &str, delta: i64) {
        let existing = self
            .master_barang
            .iter_mut()
            .find(|row| str_field(row, "kodeBarang") == Some(code));

        match existing {
            Some(row) => {
                let stok = i64_field(row, "stok") + delta;
                row["stok"] = json!(stok);
            }
            None => {
                // First-seen semantics: the movement introduces the item.
                self.master_barang.push(json!({
                    "kodeBarang": code,
                    "namaBarang": name,
                    "satuan": unit,
                    "stok": delta,
                }));
            }
        }
    }

    fn apply(&mut self, operation: &str, data: Value) -> Result<Value, StoreError> {
        if !data.is_object() {
            return Err(StoreError::request_failed("payload must be an object"));
        }

        match operation {
            ops::MASTER_BARANG => {
                let code = required_str(&data, "kodeBarang")?.to_string();
                if self
                    .master_barang
                    .iter()
                    .any(|row| str_field(row, "kodeBarang") == Some(&code))
                {
                    return Err(StoreError::request_failed(format!(
                        "barang {code} already exists"
                    )));
                }
                self.master_barang.push(json!({
                    "kodeBarang": code,
                    "namaBarang": data.get("namaBarang").cloned().unwrap_or(json!("")),
                    "satuan": data.get("satuan").cloned().unwrap_or(json!("")),
                    "stok": data.get("stok").cloned().unwrap_or(json!(0)),
                }));
                Ok(json!({ "kodeBarang": code }))
            }

            ops::UPDATE_MASTER_BARANG => {
                let code = required_str(&data, "kodeBarang")?.to_string();
                let row = self
                    .master_barang
                    .iter_mut()
                    .find(|row| str_field(row, "kodeBarang") == Some(&code))
                    .ok_or_else(|| {
                        StoreError::request_failed(format!("barang {code} not found"))
                    })?;
                if let Some(name) = data.get("namaBarang") {
                    row["namaBarang"] = name.clone();
                }
                if let Some(unit) = data.get("satuan") {
                    row["satuan"] = unit.clone();
                }
                Ok(json!({ "kodeBarang": code }))
            }

            ops::DELETE_MASTER_BARANG => {
                let code = required_str(&data, "kodeBarang")?;
                self.master_barang
                    .retain(|row| str_field(row, "kodeBarang") != Some(code));
                Ok(json!({ "deleted": true }))
            }

            ops::BARANG_MASUK => {
                self.next_bm += 1;
                let id = format!("BM-{:03}", self.next_bm);
                let code = required_str(&data, "kodeBarang")?.to_string();
                let quantity = i64_field(&data, "jumlah");
                let name = str_field(&data, "namaBarang").unwrap_or("").to_string();
                let unit = str_field(&data, "satuan").unwrap_or("").to_string();

                let mut row = data;
                row["id_bm"] = json!(id);
                self.barang_masuk.push(row);
                self.adjust_stock(&code, &name, &unit, quantity);
                Ok(json!({ "id_bm": id }))
            }

            ops::UPDATE_BARANG_MASUK => {
                let id = required_str(&data, "id_bm")?.to_string();
                let row = self
                    .barang_masuk
                    .iter_mut()
                    .find(|row| str_field(row, "id_bm") == Some(&id))
                    .ok_or_else(|| {
                        StoreError::request_failed(format!("barang masuk {id} not found"))
                    })?;

                let code = str_field(row, "kodeBarang").unwrap_or("").to_string();
                let name = str_field(row, "namaBarang").unwrap_or("").to_string();
                let unit = str_field(row, "satuan").unwrap_or("").to_string();
                let delta = i64_field(&data, "jumlah") - i64_field(row, "jumlah");

                for key in ["tanggal", "jumlah", "keterangan"] {
                    if let Some(value) = data.get(key) {
                        row[key] = value.clone();
                    }
                }
                self.adjust_stock(&code, &name, &unit, delta);
                Ok(json!({ "id_bm": id }))
            }

            ops::DELETE_BARANG_MASUK => {
                let id = required_str(&data, "id_bm")?;
                let position = self
                    .barang_masuk
                    .iter()
                    .position(|row| str_field(row, "id_bm") == Some(id))
                    .ok_or_else(|| {
                        StoreError::request_failed(format!("barang masuk {id} not found"))
                    })?;
                let row = self.barang_masuk.remove(position);
                let code = str_field(&row, "kodeBarang").unwrap_or("").to_string();
                let name = str_field(&row, "namaBarang").unwrap_or("").to_string();
                let unit = str_field(&row, "satuan").unwrap_or("").to_string();
                self.adjust_stock(&code, &name, &unit, -i64_field(&row, "jumlah"));
                Ok(json!({ "deleted": true }))
            }

            ops::BARANG_KELUAR => {
                self.next_bk += 1;
                let id = format!("BK-{:03}", self.next_bk);
                let code = required_str(&data, "kodeBarang")?.to_string();
                let quantity = i64_field(&data, "jumlah");
                let name = str_field(&data, "namaBarang").unwrap_or("").to_string();
                let unit = str_field(&data, "satuan").unwrap_or("").to_string();

                let mut row = data;
                row["id_bk"] = json!(id);
                self.barang_keluar.push(row);
                // No sufficiency re-check here; see the module docs.
                self.adjust_stock(&code, &name, &unit, -quantity);
                Ok(json!({ "id_bk": id }))
            }

            ops::TANDA_TERIMA => {
                self.next_tt += 1;
                let id = format!("TT-{:03}", self.next_tt);
                let mut row = data;
                row["id_tt"] = json!(id);
                self.tanda_terima.push(row);
                Ok(json!({ "id_tt": id }))
            }

            ops::TANDA_TERIMA_BARANG => {
                let id = required_str(&data, "id_tt")?.to_string();
                if !self
                    .tanda_terima
                    .iter()
                    .any(|row| str_field(row, "id_tt") == Some(&id))
                {
                    return Err(StoreError::request_failed(format!(
                        "tanda terima {id} not found"
                    )));
                }
                self.tanda_terima_barang.push(data);
                Ok(json!({ "id_tt": id }))
            }

            ops::DELETE_TANDA_TERIMA_BARANG => {
                let id = required_str(&data, "id_tt")?;
                let code = required_str(&data, "kodeBarang")?;
                self.tanda_terima_barang.retain(|row| {
                    str_field(row, "id_tt") != Some(id)
                        || str_field(row, "kodeBarang") != Some(code)
                });
                Ok(json!({ "deleted": true }))
            }

            ops::UPDATE_TANDA_TERIMA_FORM_DATA => {
                let id = required_str(&data, "id_tt")?.to_string();
                self.tanda_terima_form_data
                    .retain(|row| str_field(row, "id_tt") != Some(&id));
                self.tanda_terima_form_data.push(data);
                Ok(json!({ "id_tt": id }))
            }

            ops::UPDATE_TANDA_TERIMA_STATUS => {
                let id = required_str(&data, "id_tt")?.to_string();
                let status = required_str(&data, "status")?.to_string();
                let row = self
                    .tanda_terima
                    .iter_mut()
                    .find(|row| str_field(row, "id_tt") == Some(&id))
                    .ok_or_else(|| {
                        StoreError::request_failed(format!("tanda terima {id} not found"))
                    })?;
                row["status"] = json!(status);
                Ok(json!({ "id_tt": id, "status": status }))
            }

            ops::DELETE_TANDA_TERIMA => {
                let id = required_str(&data, "id_tt")?;
                self.tanda_terima
                    .retain(|row| str_field(row, "id_tt") != Some(id));
                self.tanda_terima_barang
                    .retain(|row| str_field(row, "id_tt") != Some(id));
                self.tanda_terima_form_data
                    .retain(|row| str_field(row, "id_tt") != Some(id));
                Ok(json!({ "deleted": true }))
            }

            ops::AUDIT_LOG => {
                let mut row = data;
                row["timestamp"] = json!(chrono::Utc::now().to_rfc3339());
                self.audit.push(row);
                Ok(json!({ "logged": true }))
            }

            other => Err(StoreError::request_failed(format!(
                "unknown operation: {other}"
            ))),
        }
    }

    fn rows_of(&self, record_type: &str) -> Result<&Vec<Value>, StoreError> {
        match record_type {
            ops::READ_MASTER_BARANG => Ok(&self.master_barang),
            ops::READ_BARANG_MASUK => Ok(&self.barang_masuk),
            ops::READ_BARANG_KELUAR => Ok(&self.barang_keluar),
            ops::READ_TANDA_TERIMA => Ok(&self.tanda_terima),
            ops::READ_TANDA_TERIMA_BARANG => Ok(&self.tanda_terima_barang),
            ops::READ_TANDA_TERIMA_FORM_DATA => Ok(&self.tanda_terima_form_data),
            ops::READ_AUDIT => Ok(&self.audit),
            other => Err(StoreError::request_failed(format!(
                "unknown record type: {other}"
            ))),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch(
        &self,
        record_type: &str,
        filters: &[(&str, String)],
        tenant: Tenant,
    ) -> Result<Vec<Value>, StoreError> {
        let mut guard = self.lock()?;
        let tables = guard.entry(tenant).or_default();
        let mut rows: Vec<Value> = tables.rows_of(record_type)?.clone();

        let mut limit = None;
        for (key, value) in filters {
            if *key == "limit" {
                limit = value.parse::<usize>().ok();
                continue;
            }
            rows.retain(|row| str_field(row, key) == Some(value.as_str()));
        }
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn submit(
        &self,
        operation: &str,
        payload: Value,
        tenant: Tenant,
    ) -> Result<Value, StoreError> {
        let mut guard = self.lock()?;
        let tables = guard.entry(tenant).or_default();
        tables.apply(operation, payload)
    }
}
