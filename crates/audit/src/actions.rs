//! Action names recorded in the audit trail.

pub const CREATE_TANDA_TERIMA: &str = "CREATE_TANDA_TERIMA";
pub const ADD_BARANG_TANDA_TERIMA: &str = "ADD_BARANG_TANDA_TERIMA";
pub const DELETE_BARANG_TANDA_TERIMA: &str = "DELETE_BARANG_TANDA_TERIMA";
pub const UPDATE_FORM_DATA_TANDA_TERIMA: &str = "UPDATE_FORM_DATA_TANDA_TERIMA";
pub const VALIDATE_TANDA_TERIMA: &str = "VALIDATE_TANDA_TERIMA";
pub const DELETE_TANDA_TERIMA: &str = "DELETE_TANDA_TERIMA";
pub const GENERATE_PDF_TANDA_TERIMA: &str = "GENERATE_PDF_TANDA_TERIMA";

pub const CREATE_BARANG_MASUK: &str = "CREATE_BARANG_MASUK";
pub const UPDATE_BARANG_MASUK: &str = "UPDATE_BARANG_MASUK";
pub const DELETE_BARANG_MASUK: &str = "DELETE_BARANG_MASUK";

pub const UPDATE_MASTER_BARANG: &str = "UPDATE_MASTER_BARANG";
pub const DELETE_MASTER_BARANG: &str = "DELETE_MASTER_BARANG";
