//! Record types and operation names understood by the backing store.
//!
//! Read names are passed to [`RecordStore::fetch`](crate::RecordStore::fetch),
//! write names to [`RecordStore::submit`](crate::RecordStore::submit). The
//! strings are the store's own protocol vocabulary and are kept verbatim.

// Reads (GET).
pub const READ_MASTER_BARANG: &str = "readMasterBarang";
pub const READ_BARANG_MASUK: &str = "readBarangMasuk";
pub const READ_BARANG_KELUAR: &str = "readBarangKeluar";
pub const READ_TANDA_TERIMA: &str = "readTandaTerima";
pub const READ_TANDA_TERIMA_BARANG: &str = "readTandaTerimaBarang";
pub const READ_TANDA_TERIMA_FORM_DATA: &str = "readTandaTerimaFormData";
pub const READ_AUDIT: &str = "readAudit";

// Writes (POST).
pub const MASTER_BARANG: &str = "masterBarang";
pub const UPDATE_MASTER_BARANG: &str = "updateMasterBarang";
pub const DELETE_MASTER_BARANG: &str = "deleteMasterBarang";
pub const BARANG_MASUK: &str = "barangMasuk";
pub const UPDATE_BARANG_MASUK: &str = "updateBarangMasuk";
pub const DELETE_BARANG_MASUK: &str = "deleteBarangMasuk";
pub const BARANG_KELUAR: &str = "barangKeluar";
pub const TANDA_TERIMA: &str = "tandaTerima";
pub const TANDA_TERIMA_BARANG: &str = "tandaTerimaBarang";
pub const DELETE_TANDA_TERIMA_BARANG: &str = "deleteTandaTerimaBarang";
pub const UPDATE_TANDA_TERIMA_FORM_DATA: &str = "updateTandaTerimaFormData";
pub const UPDATE_TANDA_TERIMA_STATUS: &str = "updateTandaTerimaStatus";
pub const DELETE_TANDA_TERIMA: &str = "deleteTandaTerima";
pub const AUDIT_LOG: &str = "audit_Log";
