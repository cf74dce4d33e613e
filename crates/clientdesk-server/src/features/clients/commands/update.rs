//! Update client command
//!
//! Partially updates a client. Only the provided fields change.

use serde::Deserialize;
use uuid::Uuid;

use crate::audit::{best_effort, tables, AuditOrigin, AuditWriter};
use crate::db::StoreError;
use crate::features::clients::store::ClientStore;
use crate::features::clients::types::{Client, ClientChanges, MAX_CLIENT_NAME_LENGTH};
use crate::features::shared::{validate_amount, validate_name, NameValidationError};

/// At least one field must be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientCommand {
    pub name: Option<String>,
    pub salary: Option<i64>,
    pub company_value: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateClientError {
    #[error("At least one field must be provided for update")]
    NoFieldsToUpdate,
    #[error(transparent)]
    Name(#[from] NameValidationError),
    #[error("{0}")]
    Amount(String),
    #[error("Client '{0}' not found")]
    NotFound(Uuid),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl UpdateClientCommand {
    pub fn validate(&self) -> Result<(), UpdateClientError> {
        if self.changes().is_empty() {
            return Err(UpdateClientError::NoFieldsToUpdate);
        }
        if let Some(name) = &self.name {
            validate_name(name, MAX_CLIENT_NAME_LENGTH)?;
        }
        if let Some(salary) = self.salary {
            validate_amount("salary", salary).map_err(UpdateClientError::Amount)?;
        }
        if let Some(company_value) = self.company_value {
            validate_amount("companyValue", company_value).map_err(UpdateClientError::Amount)?;
        }
        Ok(())
    }

    fn changes(&self) -> ClientChanges {
        ClientChanges {
            name: self.name.as_ref().map(|n| n.trim().to_string()),
            salary: self.salary,
            company_value: self.company_value,
        }
    }
}

#[tracing::instrument(skip(store, audit, origin, command), fields(client_id = %id))]
pub async fn handle(
    store: &dyn ClientStore,
    audit: &AuditWriter,
    origin: &AuditOrigin,
    id: Uuid,
    command: UpdateClientCommand,
) -> Result<Client, UpdateClientError> {
    command.validate()?;

    // previous state must be captured before the write
    let before = store
        .find_active(id)
        .await?
        .ok_or(UpdateClientError::NotFound(id))?;
    let previous_state = before.snapshot();

    let updated = store
        .update(id, &command.changes())
        .await?
        .ok_or(UpdateClientError::NotFound(id))?;

    best_effort(audit.log_update(
        tables::CLIENTS,
        id,
        previous_state,
        updated.snapshot(),
        origin,
    ))
    .await;

    tracing::info!(client_id = %id, "Client updated");

    Ok(updated)
}
