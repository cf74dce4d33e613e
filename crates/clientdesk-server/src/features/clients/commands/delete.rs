//! Delete client command (soft delete)

use serde::Serialize;
use uuid::Uuid;

use crate::audit::{best_effort, tables, AuditOrigin, AuditWriter};
use crate::db::StoreError;
use crate::features::clients::store::ClientStore;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeleteClientResponse {
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteClientError {
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
) -> Result<DeleteClientResponse, DeleteClientError> {
    let client = store
        .find_active(id)
        .await?
        .ok_or(DeleteClientError::NotFound(id))?;
    let previous_state = client.snapshot();

    if !store.soft_delete(id).await? {
        return Err(DeleteClientError::NotFound(id));
    }

    best_effort(audit.log_delete(tables::CLIENTS, id, previous_state, origin)).await;

    tracing::info!(client_id = %id, "Client deleted");

    Ok(DeleteClientResponse { deleted: true })
}
