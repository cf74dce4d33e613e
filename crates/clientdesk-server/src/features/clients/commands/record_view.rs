//! Tracked read: bump the view counter and record a READ audit

use uuid::Uuid;

use crate::audit::{best_effort, tables, AuditOrigin, AuditWriter};
use crate::db::StoreError;
use crate::features::clients::store::ClientStore;
use crate::features::clients::types::Client;

#[derive(Debug, thiserror::Error)]
pub enum RecordViewError {
    #[error("Client '{0}' not found")]
    NotFound(Uuid),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

#[tracing::instrument(skip(store, audit, origin), fields(client_id = %id))]
pub async fn handle(
    store: &dyn ClientStore,
    audit: &AuditWriter,
    origin: &AuditOrigin,
    id: Uuid,
) -> Result<Client, RecordViewError> {
    let client = store
        .increment_views(id)
        .await?
        .ok_or(RecordViewError::NotFound(id))?;

    best_effort(audit.log_read(tables::CLIENTS, id, origin)).await;

    tracing::debug!(client_id = %id, view_count = client.view_count, "Client view recorded");

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditAction, AuditStore, InMemoryAuditStore};
    use crate::features::clients::store::InMemoryClientStore;
    use crate::features::clients::types::NewClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_view_increments_and_writes_one_read_audit() {
        let clients = InMemoryClientStore::new();
        let audits = Arc::new(InMemoryAuditStore::new());
        let writer = AuditWriter::new(audits.clone());
        let client = clients
            .insert(NewClient {
                name: "Acme".into(),
                salary: 1,
                company_value: 2,
            })
            .await
            .unwrap();

        let viewed = handle(&clients, &writer, &AuditOrigin::default(), client.id)
            .await
            .unwrap();

        assert_eq!(viewed.view_count, 1);
        let history = audits.find_record_history(tables::CLIENTS, client.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, AuditAction::Read);
        assert!(history[0].previous_state.is_none());
        assert!(history[0].new_state.is_none());
    }

    #[tokio::test]
    async fn test_view_of_missing_client() {
        let clients = InMemoryClientStore::new();
        let writer = AuditWriter::new(Arc::new(InMemoryAuditStore::new()));

        let err = handle(&clients, &writer, &AuditOrigin::default(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, RecordViewError::NotFound(_)));
    }
}
