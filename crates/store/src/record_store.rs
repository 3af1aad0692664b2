use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use siwaras_core::Tenant;

use crate::error::StoreError;

/// Request/response interface to one tenant-scoped tabular store.
///
/// `fetch` reads the rows of one record type (optionally filtered), `submit`
/// applies one named write operation. Both may fail with
/// [`StoreError::RequestFailed`]; callers must treat a missing result field
/// as failure, not as empty-but-successful.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch(
        &self,
        record_type: &str,
        filters: &[(&str, String)],
        tenant: Tenant,
    ) -> Result<Vec<Value>, StoreError>;

    async fn submit(
        &self,
        operation: &str,
        payload: Value,
        tenant: Tenant,
    ) -> Result<Value, StoreError>;
}

#[async_trait]
impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    async fn fetch(
        &self,
        record_type: &str,
        filters: &[(&str, String)],
        tenant: Tenant,
    ) -> Result<Vec<Value>, StoreError> {
        (**self).fetch(record_type, filters, tenant).await
    }

    async fn submit(
        &self,
        operation: &str,
        payload: Value,
        tenant: Tenant,
    ) -> Result<Value, StoreError> {
        (**self).submit(operation, payload, tenant).await
    }
}

/// Decode raw rows into a typed record, surfacing the first bad row.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, StoreError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| StoreError::MalformedRow(e.to_string())))
        .collect()
}
