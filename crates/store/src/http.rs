//! HTTP implementation of [`RecordStore`].
//!
//! Protocol: GET encodes `{type, db, ...filters}` as query parameters; POST
//! sends `{type, db, data}` as a JSON body with Content-Type `text/plain`
//! (the backing Apps-Script endpoint rejects preflighted requests, so the
//! original client ships JSON under a simple content type and the server
//! parses it regardless). Responses are `{ok, result?, error?}` envelopes.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use siwaras_core::Tenant;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::record_store::RecordStore;

const POST_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

#[derive(Debug, Deserialize)]
struct Envelope {
    ok: bool,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

impl Envelope {
    fn into_result(self) -> Result<Value, StoreError> {
        if !self.ok {
            return Err(StoreError::RequestFailed(
                self.error.unwrap_or_else(|| "request failed".to_string()),
            ));
        }
        self.result
            .ok_or_else(|| StoreError::request_failed("response missing result"))
    }
}

/// Record store client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url,
        }
    }

    pub fn from_env() -> Result<Self, StoreError> {
        Ok(Self::new(StoreConfig::from_env()?))
    }

    async fn read_envelope(response: reqwest::Response) -> Result<Value, StoreError> {
        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;
        envelope.into_result()
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn fetch(
        &self,
        record_type: &str,
        filters: &[(&str, String)],
        tenant: Tenant,
    ) -> Result<Vec<Value>, StoreError> {
        tracing::debug!(record_type, %tenant, "store fetch");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("type", record_type), ("db", tenant.as_str())])
            .query(filters)
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        let result = Self::read_envelope(response).await?;
        match result.get("rows") {
            Some(Value::Array(rows)) => Ok(rows.clone()),
            _ => Err(StoreError::request_failed("response missing rows")),
        }
    }

    async fn submit(
        &self,
        operation: &str,
        payload: Value,
        tenant: Tenant,
    ) -> Result<Value, StoreError> {
        tracing::debug!(operation, %tenant, "store submit");

        let body = json!({
            "type": operation,
            "db": tenant.as_str(),
            "data": payload,
        });

        let response = self
            .client
            .post(&self.base_url)
            .header(reqwest::header::CONTENT_TYPE, POST_CONTENT_TYPE)
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        Self::read_envelope(response).await
    }
}
