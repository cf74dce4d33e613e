//! Get a single client. Untracked: no audit, no view increment.

use uuid::Uuid;

use crate::db::StoreError;
use crate::features::clients::store::ClientStore;
use crate::features::clients::types::Client;

#[derive(Debug, thiserror::Error)]
pub enum GetClientError {
    #[error("Client '{0}' not found")]
    NotFound(Uuid),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

pub async fn handle(store: &dyn ClientStore, id: Uuid) -> Result<Client, GetClientError> {
    store
        .find_active(id)
        .await?
        .ok_or(GetClientError::NotFound(id))
}
