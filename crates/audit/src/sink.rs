use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use siwaras_core::{Session, Tenant};
use siwaras_store::{ops, RecordStore};

/// Receives audit entries from the app layer.
///
/// Logging is infallible by contract: implementations swallow their own
/// failures so that audit trouble never breaks the operation being audited.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn log_action(&self, tenant: Tenant, session: &Session, action: &str, details: &str);
}

#[async_trait]
impl<A: AuditSink> AuditSink for Arc<A> {
    async fn log_action(&self, tenant: Tenant, session: &Session, action: &str, details: &str) {
        self.as_ref().log_action(tenant, session, action, details).await;
    }
}

/// Persists audit entries through the record store.
pub struct StoreAuditSink<S> {
    store: S,
}

impl<S: RecordStore> StoreAuditSink<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: RecordStore> AuditSink for StoreAuditSink<S> {
    async fn log_action(&self, tenant: Tenant, session: &Session, action: &str, details: &str) {
        let entry = json!({
            "id_admin": session.admin_id.as_deref().unwrap_or("-"),
            "username": session.username,
            "action": action,
            "details": details,
        });
        if let Err(err) = self.store.submit(ops::AUDIT_LOG, entry, tenant).await {
            tracing::warn!(%tenant, action, error = %err, "audit write dropped");
        }
    }
}

/// Collects entries in memory, for tests.
#[derive(Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<(Tenant, String, String)>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Tenant, String, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(_, action, _)| action.clone())
            .collect()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn log_action(&self, tenant: Tenant, _session: &Session, action: &str, details: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((tenant, action.to_string(), details.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siwaras_store::InMemoryRecordStore;

    #[tokio::test]
    async fn store_sink_posts_entry() {
        let store = Arc::new(InMemoryRecordStore::new());
        let sink = StoreAuditSink::new(Arc::clone(&store));
        let session = Session::new("budi", "admin").with_admin_id("ADM-01");

        sink.log_action(
            Tenant::Wisuda,
            &session,
            crate::actions::CREATE_TANDA_TERIMA,
            "Membuat tanda terima TT-001",
        )
        .await;

        assert_eq!(store.audit_len(Tenant::Wisuda), 1);
        assert_eq!(store.audit_len(Tenant::Sosprom), 0);
    }

    #[tokio::test]
    async fn memory_sink_records_in_order() {
        let sink = MemoryAuditSink::new();
        let session = Session::new("siti", "staf");

        sink.log_action(Tenant::Sosprom, &session, "A", "first").await;
        sink.log_action(Tenant::Sosprom, &session, "B", "second").await;

        assert_eq!(sink.actions(), vec!["A", "B"]);
    }
}
